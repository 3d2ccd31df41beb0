//! Per-page context shared by every full-page template.
//!
//! Header and footer need the same things on every page: the active nav
//! link, the visitor's theme, the cart badge and any pending toast. The
//! [`PageContext`] extractor gathers them in one place, so the badge is
//! recomputed from the stored cart on every page load.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
};
use tower_sessions::Session;

use hc_core::{Theme, load_theme};

use crate::badge::BadgeView;
use crate::state::AppState;
use crate::toast::{self, ToastView};

/// Shared layout data for page templates.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Request path, used for nav highlighting.
    pub path: String,
    pub theme: Theme,
    pub badge: BadgeView,
    pub toast: Option<ToastView>,
}

impl PageContext {
    /// Returns true when `href` is the page being rendered.
    #[must_use]
    pub fn is_active(&self, href: &str) -> bool {
        self.path == href
    }

    /// Class for the `<html>` element.
    #[must_use]
    pub const fn html_class(&self) -> &'static str {
        if self.theme.is_light() { "light" } else { "" }
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        let storage = state.storage(&session);

        let count = state.cart_store(&session).item_count().await;
        let theme = load_theme(&storage).await;
        let toast = toast::take(&session, state.config().toast_ms).await;

        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |original| original.0.path())
            .to_string();

        Ok(Self {
            path,
            theme,
            badge: BadgeView::from_count(count),
            toast,
        })
    }
}
