//! # Store Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for persistence operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a [`MappingStore`](super::MappingStore).
///
/// None of these ever reach callers of the reconciliation cache; they are
/// logged and the cache degrades to an ephemeral mapping instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached at all
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    /// The store refused the write (quota exceeded, access denied)
    #[error("Storage rejected write for key {key}: {message}")]
    WriteRejected { key: String, message: String },

    /// The store refused to delete the entry
    #[error("Storage rejected removal of key {key}: {message}")]
    RemoveRejected { key: String, message: String },

    /// Filesystem errors from file-backed stores
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create a new unavailable-store error
    pub fn unavailable<T: Into<String>>(message: T) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new rejected-write error
    pub fn write_rejected<K: Into<String>, T: Into<String>>(key: K, message: T) -> Self {
        Self::WriteRejected {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new rejected-removal error
    pub fn remove_rejected<K: Into<String>, T: Into<String>>(key: K, message: T) -> Self {
        Self::RemoveRejected {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Wrap an IO error with the path it occurred on
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_rejected_display() {
        let error = StoreError::write_rejected("threadUuidMap", "quota exceeded");
        assert_eq!(
            error.to_string(),
            "Storage rejected write for key threadUuidMap: quota exceeded"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = StoreError::io(
            "/tmp/map.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.to_string().contains("/tmp/map.json"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
