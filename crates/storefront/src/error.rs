//! Unified error handling with Sentry integration.
//!
//! Cart and theme operations never fail outward; they degrade and log. What
//! is left for `AppError` is the HTTP edge itself: a broken session or a
//! missing page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// No page at this path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, message) = match &self {
            // Don't expose internal error details to clients
            Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for visitor actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        String::from_utf8_lossy(&body).into_owned()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/cardapio/pizza".to_string());
        assert_eq!(err.to_string(), "Not found: /cardapio/pizza");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = AppError::NotFound("/nada".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not found: /nada");
    }

    #[tokio::test]
    async fn test_session_details_hidden() {
        let err = AppError::Session(tower_sessions::session::Error::Store(
            tower_sessions::session_store::Error::Backend("store offline at 10.0.0.3".to_string()),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }
}
