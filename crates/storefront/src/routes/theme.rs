//! Theme preference route handler.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use hc_core::toggle_theme;

use crate::routes::return_path;
use crate::state::AppState;

/// Theme toggle form data.
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Flip between light and dark, then go back to the page the visitor was on.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ThemeForm>,
) -> Redirect {
    let theme = toggle_theme(&state.storage(&session)).await;
    tracing::debug!(%theme, "Theme toggled");
    Redirect::to(&return_path(form.return_to.as_deref(), "/"))
}
