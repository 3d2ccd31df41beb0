//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::context::PageContext;
use crate::filters;
use crate::menu::{Category, Menu};
use crate::routes::menu::MenuItemView;
use crate::state::AppState;

/// Number of dishes highlighted on the home page.
const FEATURED_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<MenuItemView>,
}

/// Lead dish of each section, in section order.
fn featured(menu: &Menu) -> Vec<MenuItemView> {
    Category::ALL
        .into_iter()
        .filter_map(|category| menu.in_category(category).next())
        .take(FEATURED_COUNT)
        .map(MenuItemView::from)
        .collect()
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    HomeTemplate {
        page,
        featured: featured(state.menu()),
    }
}
