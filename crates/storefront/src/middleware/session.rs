//! Session middleware configuration.
//!
//! The session is the visitor's storage area: the cart, theme and pending
//! toast all live in it. Sessions are held in a bounded `moka` cache, so a
//! restart empties every cart, and once `session_capacity` is reached the
//! least recently used sessions are evicted. Records also leave the cache
//! when their expiry date passes.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "hc_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the bounded in-memory session store.
#[must_use]
pub fn create_session_store(config: &StorefrontConfig) -> MokaStore {
    MokaStore::new(Some(config.session_capacity))
}

/// Create the session layer over `store`.
#[must_use]
pub fn create_session_layer(
    store: MokaStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
