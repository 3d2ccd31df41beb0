//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /cardapio               - Menu (?produto=<name> opens the product modal)
//!
//! # Contact
//! GET  /contato                - Contact form
//! POST /contato                - Submit contact form
//!
//! # Cart
//! GET  /pedido                 - Cart page
//! POST /pedido/adicionar       - Add item (name, price, return_to)
//! POST /pedido/quantidade      - Set quantity (name, quantity)
//! POST /pedido/remover         - Remove item (name)
//! POST /pedido/finalizar       - Simulated checkout
//! GET  /pedido/contagem        - Cart count badge (fragment)
//!
//! # Preferences
//! POST /tema                   - Toggle light/dark theme (return_to)
//!
//! # Anything else
//! *                            - 404 Not found: <path>
//! ```
//!
//! Form posts answer with `303 See Other` back to a page, which re-reads the
//! cart and renders it in full.

pub mod cart;
pub mod contact;
pub mod home;
pub mod menu;
pub mod theme;

use axum::{
    Router,
    extract::OriginalUri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/pedido", get(cart::show))
        .route("/pedido/adicionar", post(cart::add))
        .route("/pedido/quantidade", post(cart::update))
        .route("/pedido/remover", post(cart::remove))
        .route("/pedido/finalizar", post(cart::checkout))
        .route("/pedido/contagem", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/cardapio", get(menu::index))
        .route("/contato", get(contact::show).post(contact::submit))
        .route("/tema", post(theme::toggle))
        .merge(cart_routes())
        .fallback(not_found)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Answer unknown paths with a 404.
async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Resolve a `return_to` form field to a same-site path.
///
/// Only absolute paths on this site are accepted. Anything that could leave
/// the site (`//host`, `https://...`, backslashes) falls back to `default`.
pub(crate) fn return_path(requested: Option<&str>, default: &str) -> String {
    requested
        .map(str::trim)
        .filter(|path| {
            path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control)
        })
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::StorefrontConfig;

    async fn get_path(path: &str) -> (StatusCode, String) {
        let app = routes().with_state(AppState::new(StorefrontConfig::default()));
        let response = app
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, body) = get_path("/cardapio/pizza?tamanho=g").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found: /cardapio/pizza");
    }

    #[tokio::test]
    async fn test_health_still_routed() {
        let (status, body) = get_path("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[test]
    fn test_return_path_accepts_site_paths() {
        assert_eq!(return_path(Some("/pedido"), "/"), "/pedido");
        assert_eq!(
            return_path(Some("/cardapio?produto=X-Burger"), "/"),
            "/cardapio?produto=X-Burger"
        );
    }

    #[test]
    fn test_return_path_rejects_offsite() {
        assert_eq!(return_path(Some("https://evil.example"), "/cardapio"), "/cardapio");
        assert_eq!(return_path(Some("//evil.example"), "/cardapio"), "/cardapio");
        assert_eq!(return_path(Some("/\\evil.example"), "/cardapio"), "/cardapio");
        assert_eq!(return_path(Some("/a\r\nSet-Cookie: x"), "/"), "/");
        assert_eq!(return_path(Some(""), "/"), "/");
        assert_eq!(return_path(None, "/contato"), "/contato");
    }
}
