//! Persistence ports for the reconciliation table.
//!
//! A store holds exactly one serialized blob. It knows nothing about the JSON
//! inside; parsing and recovery from malformed contents live in the cache.

use super::errors::{StoreError, StoreResult};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_arch = "wasm32"))]
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Durable key/value slot holding the serialized mapping table.
pub trait MappingStore {
    /// Read the stored blob, `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> StoreResult<Option<String>>;

    /// Replace the stored blob.
    ///
    /// # Errors
    /// Returns an error if the write is refused or fails.
    fn save(&self, serialized: &str) -> StoreResult<()>;

    /// Delete the stored blob. Removing an absent blob succeeds.
    ///
    /// # Errors
    /// Returns an error if the removal is refused or fails.
    fn remove(&self) -> StoreResult<()>;
}

impl<S: MappingStore + ?Sized> MappingStore for &S {
    fn load(&self) -> StoreResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, serialized: &str) -> StoreResult<()> {
        (**self).save(serialized)
    }

    fn remove(&self) -> StoreResult<()> {
        (**self).remove()
    }
}

/// In-process store, used by tests and as a fallback when no durable store exists.
///
/// Reads, writes and removals can be made to fail on demand to exercise the
/// degraded paths of the cache.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    reject_reads: AtomicBool,
    reject_writes: AtomicBool,
    reject_removes: AtomicBool,
}

const MEMORY_KEY: &str = "memory";

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `contents` already stored, valid JSON or not.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(contents.into())),
            ..Self::default()
        }
    }

    /// Make subsequent `load` calls fail.
    pub fn reject_reads(&self, reject: bool) {
        self.reject_reads.store(reject, Ordering::SeqCst);
    }

    /// Make subsequent `save` calls fail.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Make subsequent `remove` calls fail.
    pub fn reject_removes(&self, reject: bool) {
        self.reject_removes.store(reject, Ordering::SeqCst);
    }

    /// Overwrite the stored blob directly, bypassing failure injection.
    pub fn put_raw(&self, contents: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(contents.into());
        }
    }

    /// The currently stored blob.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl MappingStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<String>> {
        if self.reject_reads.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("memory store reads disabled"));
        }
        let slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, serialized: &str) -> StoreResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write_rejected(MEMORY_KEY, "quota exceeded"));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        *slot = Some(serialized.to_owned());
        Ok(())
    }

    fn remove(&self) -> StoreResult<()> {
        if self.reject_removes.load(Ordering::SeqCst) {
            return Err(StoreError::remove_rejected(MEMORY_KEY, "access denied"));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

/// Store backed by a single JSON file on disk.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user's config directory, named after `storage_key`.
    #[must_use]
    pub fn in_config_dir(storage_key: &str) -> Self {
        Self::new(default_store_path(storage_key))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `<config_dir>/relaychat/<storage_key>.json`, or the working directory when
/// no home directory can be determined.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn default_store_path(storage_key: &str) -> PathBuf {
    let file_name = format!("{storage_key}.json");
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".").join(&file_name),
        |dirs| dirs.config_dir().join("relaychat").join(&file_name),
    )
}

#[cfg(not(target_arch = "wasm32"))]
impl MappingStore for FileStore {
    fn load(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(&self.path, err)),
        }
    }

    fn save(&self, serialized: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        fs::write(&self.path, serialized).map_err(|err| StoreError::io(&self.path, err))
    }

    fn remove(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(&self.path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_memory_store_save_then_remove() {
        let store = MemoryStore::new();
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
        store.remove().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.remove().unwrap();
    }

    #[test]
    fn test_memory_store_rejects_writes_on_demand() {
        let store = MemoryStore::with_contents("{\"a\":\"b\"}");
        store.reject_writes(true);
        assert!(matches!(
            store.save("{}"),
            Err(StoreError::WriteRejected { .. })
        ));
        assert_eq!(store.contents().as_deref(), Some("{\"a\":\"b\"}"));

        store.reject_writes(false);
        store.save("{}").unwrap();
        assert_eq!(store.contents().as_deref(), Some("{}"));
    }

    #[test]
    fn test_memory_store_rejects_reads_on_demand() {
        let store = MemoryStore::with_contents("{}");
        store.reject_reads(true);
        assert!(matches!(store.load(), Err(StoreError::Unavailable { .. })));
        assert_eq!(store.contents().as_deref(), Some("{}"));

        store.reject_reads(false);
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_put_raw_bypasses_rejection() {
        let store = MemoryStore::new();
        store.reject_writes(true);
        store.put_raw("garbage");
        assert_eq!(store.contents().as_deref(), Some("garbage"));
    }

    #[test]
    fn test_memory_store_rejects_removes_on_demand() {
        let store = MemoryStore::with_contents("{}");
        store.reject_removes(true);
        assert!(store.remove().is_err());
        assert!(store.contents().is_some());
    }

    #[test]
    fn test_file_store_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("threadUuidMap.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("relaychat").join("map.json");
        let store = FileStore::new(&path);
        store.save("{\"x\":\"y\"}").unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap().as_deref(), Some("{\"x\":\"y\"}"));
    }

    #[test]
    fn test_file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("map.json"));
        store.save("{}").unwrap();
        store.remove().unwrap();
        store.remove().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_read_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_default_store_path_uses_storage_key() {
        let path = default_store_path("threadUuidMap");
        assert!(path.ends_with("threadUuidMap.json"));
    }
}
