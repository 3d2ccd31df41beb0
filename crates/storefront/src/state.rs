//! Application state shared across handlers.

use std::sync::Arc;

use tower_sessions::Session;

use hc_core::CartStore;

use crate::config::StorefrontConfig;
use crate::menu::Menu;
use crate::storage::SessionStorage;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the menu.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    menu: Menu,
}

impl AppState {
    /// Create a new application state serving the house menu.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_menu(config, Menu::house())
    }

    /// Create application state with a custom menu.
    #[must_use]
    pub fn with_menu(config: StorefrontConfig, menu: Menu) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, menu }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu.
    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.inner.menu
    }

    /// The visitor's storage area, backed by their session.
    #[must_use]
    pub fn storage(&self, session: &Session) -> SessionStorage {
        SessionStorage::new(session.clone(), self.inner.config.storage_quota_bytes)
    }

    /// A cart store over the visitor's storage area.
    #[must_use]
    pub fn cart_store(&self, session: &Session) -> CartStore<SessionStorage> {
        CartStore::new(self.storage(session))
    }
}
