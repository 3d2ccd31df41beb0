//! HC Burgers Storefront library.
//!
//! This crate provides the public site as a library, so the binary and the
//! integration tests build the exact same router through [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod badge;
pub mod config;
pub mod context;
pub mod error;
pub mod filters;
pub mod menu;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod toast;

use axum::{Router, extract::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are not included; the binary wraps them around this router.
pub fn app(state: AppState) -> Router {
    let session_store = middleware::create_session_store(state.config());
    let session_layer = middleware::create_session_layer(session_store, state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
