//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request and its span)
//! 4. Security headers (CSP, framing, referrer)
//! 5. Session layer (tower-sessions over a bounded moka store)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
