//! Browser `localStorage` access.
//!
//! The thread id table goes through a fallible accessor so a disabled or full
//! storage area only costs persistence. The auth keys written by the login
//! flow use the same accessor; without storage a request simply goes out
//! anonymous.

use crate::config::FrontendConfig;
use shared::ids::{MappingStore, ReconciliationCache, StoreError, StoreResult};
use tracing::{debug, warn};
use wasm_bindgen::JsValue;

const TOKEN_KEYS: [&str; 2] = ["token", "accessToken"];
const USER_ID_KEY: &str = "userId";
const USER_KEY: &str = "user";

/// Keys removed when the gateway rejects the session.
pub const SESSION_KEYS: [&str; 4] = ["token", "accessToken", USER_ID_KEY, USER_KEY];

/// [`MappingStore`] over one `localStorage` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// Store over the `localStorage` entry named `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The `localStorage` key holding the table.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl MappingStore for LocalStorageStore {
    fn load(&self) -> StoreResult<Option<String>> {
        browser_storage()?
            .get_item(&self.key)
            .map_err(|err| StoreError::unavailable(js_message(&err)))
    }

    fn save(&self, serialized: &str) -> StoreResult<()> {
        browser_storage()?
            .set_item(&self.key, serialized)
            .map_err(|err| StoreError::write_rejected(&self.key, js_message(&err)))
    }

    fn remove(&self) -> StoreResult<()> {
        browser_storage()?
            .remove_item(&self.key)
            .map_err(|err| StoreError::remove_rejected(&self.key, js_message(&err)))
    }
}

/// Reconciliation cache over the configured `localStorage` key.
pub fn thread_id_cache() -> ReconciliationCache<LocalStorageStore> {
    let config = FrontendConfig::new();
    ReconciliationCache::new(LocalStorageStore::new(config.storage_key()))
}

fn browser_storage() -> StoreResult<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| StoreError::unavailable("no window"))?;
    window
        .local_storage()
        .map_err(|err| StoreError::unavailable(js_message(&err)))?
        .ok_or_else(|| StoreError::unavailable("localStorage is disabled"))
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Bearer token saved at login, `token` first then `accessToken`.
pub fn session_token() -> Option<String> {
    token_from(session_item)
}

/// User id saved at login.
pub fn session_user_id() -> Option<String> {
    session_item(USER_ID_KEY)
}

/// Forget the stored session. Keys that cannot be removed are logged and skipped.
pub fn clear_session() {
    let storage = match browser_storage() {
        Ok(storage) => storage,
        Err(err) => {
            warn!(error = %err, "cannot clear session");
            return;
        }
    };
    for key in SESSION_KEYS {
        if let Err(err) = storage.remove_item(key) {
            warn!(key, error = %js_message(&err), "failed to remove session key");
        }
    }
}

fn token_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_KEYS.iter().find_map(|key| lookup(key))
}

// Empty values count as absent.
fn session_item(key: &str) -> Option<String> {
    let item = browser_storage().and_then(|storage| {
        storage
            .get_item(key)
            .map_err(|err| StoreError::unavailable(js_message(&err)))
    });
    match item {
        Ok(value) => value.filter(|value| !value.is_empty()),
        Err(err) => {
            debug!(key, error = %err, "session key unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_prefers_token_key() {
        let token = token_from(|key| match key {
            "token" => Some("primary".to_string()),
            "accessToken" => Some("secondary".to_string()),
            _ => None,
        });
        assert_eq!(token.as_deref(), Some("primary"));
    }

    #[test]
    fn test_token_falls_back_to_access_token() {
        let token = token_from(|key| (key == "accessToken").then(|| "secondary".to_string()));
        assert_eq!(token.as_deref(), Some("secondary"));
    }

    #[test]
    fn test_no_token_without_storage() {
        assert_eq!(token_from(|_| None), None);
    }

    #[test]
    fn test_session_keys_cover_login_state() {
        for key in TOKEN_KEYS {
            assert!(SESSION_KEYS.contains(&key));
        }
        assert!(SESSION_KEYS.contains(&USER_ID_KEY));
        assert!(SESSION_KEYS.contains(&USER_KEY));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use shared::ids::is_canonical;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let store = LocalStorageStore::new("relaychat-test-store");
        store.remove().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
        store.remove().unwrap();
    }

    #[wasm_bindgen_test]
    fn test_cache_over_local_storage() {
        let cache = ReconciliationCache::new(LocalStorageStore::new("relaychat-test-cache"));
        cache.clear();
        let local_id = cache.resolve(Some("507f1f77bcf86cd799439011")).unwrap();
        assert!(is_canonical(&local_id));

        let reopened = ReconciliationCache::new(LocalStorageStore::new("relaychat-test-cache"));
        assert_eq!(
            reopened.resolve(Some("507f1f77bcf86cd799439011")),
            Some(local_id)
        );
        reopened.clear();
        assert!(reopened.entries().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_local_storage_entry() {
        let store = LocalStorageStore::new("relaychat-test-corrupt");
        store.save("}{ definitely not json").unwrap();
        let cache = ReconciliationCache::new(store);
        assert!(cache.resolve(Some("fresh")).is_some());
        cache.clear();
    }

    #[wasm_bindgen_test]
    fn test_session_keys_cleared() {
        let storage = browser_storage().unwrap();
        storage.set_item("token", "").unwrap();
        storage.set_item("accessToken", "abc").unwrap();
        storage.set_item("userId", "42").unwrap();
        assert_eq!(session_token().as_deref(), Some("abc"));
        assert_eq!(session_user_id().as_deref(), Some("42"));
        clear_session();
        assert_eq!(session_token(), None);
        assert_eq!(session_user_id(), None);
    }
}
