//! Session-backed storage area.
//!
//! Each visitor gets one key-value area, carried by their session cookie.
//! Values are plain strings; the cart and theme layers in `hc-core` decide
//! what goes in them.

use hc_core::{Storage, StorageError};
use tower_sessions::Session;

/// A visitor's storage area, backed by their tower-sessions session.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    session: Session,
    quota: usize,
}

impl SessionStorage {
    /// Wrap `session`, rejecting single entries larger than `quota` bytes.
    #[must_use]
    pub const fn new(session: Session, quota: usize) -> Self {
        Self { session, quota }
    }
}

fn unavailable(err: tower_sessions::session::Error) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

impl Storage for SessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.session.get::<String>(key).await.map_err(unavailable)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let needed = key.len() + value.len();
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                needed,
                quota: self.quota,
            });
        }
        self.session.insert(key, value).await.map_err(unavailable)
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.session
            .remove_value(key)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
