//! Key-value storage contract.
//!
//! A [`Storage`] is a string-to-string area scoped to one visitor, shaped
//! like browser local storage. The storefront backs it with the visitor's
//! session. [`MemoryStorage`] is a self-contained implementation for tests
//! and tooling.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

/// Errors raised by a storage area.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// The write would push the area past its size limit.
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes the area would hold after the write.
        needed: usize,
        /// Size limit of the area.
        quota: usize,
    },
    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A value could not be encoded for storage.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A visitor-scoped key-value area.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value stored under `key`.
    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete `key`. Deleting a missing key succeeds.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: Storage> Storage for Arc<S> {
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).get_item(key)
    }

    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).remove_item(key)
    }
}

/// In-process storage area with an optional byte quota.
///
/// The quota counts the bytes of every key and value held, like the
/// per-origin limit of browser storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an unbounded storage area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage area limited to `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(quota),
        }
    }

    /// Current raw value under `key`, without going through the async API.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Write a raw value, bypassing the quota. Useful for seeding.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }
}

impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    quota,
                });
            }
        }

        entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("hc-cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v".to_string()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));

        storage.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        // Removing again is fine
        storage.remove_item("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345".to_string()).await.unwrap();

        let err = storage
            .set_item("k", "0123456789".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 11,
                quota: 10,
                ..
            }
        ));

        // Previous value retained
        assert_eq!(storage.peek("k").as_deref(), Some("12345"));
    }

    #[tokio::test]
    async fn test_quota_counts_other_keys() {
        let storage = MemoryStorage::with_quota(8);
        storage.set_item("a", "123".to_string()).await.unwrap();
        assert!(storage.set_item("b", "1234".to_string()).await.is_err());
        assert!(storage.set_item("b", "12".to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn test_arc_storage_shares_state() {
        let storage = Arc::new(MemoryStorage::new());
        let handle = Arc::clone(&storage);
        handle.set_item("k", "v".to_string()).await.unwrap();
        assert_eq!(storage.peek("k").as_deref(), Some("v"));
    }
}
