//! Menu route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::context::PageContext;
use crate::filters;
use crate::menu::{Category, Menu, MenuItem};
use crate::state::AppState;

/// Menu card display data for templates.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub name: String,
    pub description: String,
    /// Price text posted back to the cart (`25,90`).
    pub price: String,
    /// Price as displayed (`R$ 25,90`).
    pub display_price: String,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        let display_price = item
            .parsed_price()
            .map_or_else(|| format!("R$ {}", item.price), |price| price.to_string());
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.clone(),
            display_price,
        }
    }
}

/// One menu section.
#[derive(Debug, Clone)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: Vec<MenuItemView>,
}

/// Build the sections shown on the menu page, skipping empty ones.
pub fn sections(menu: &Menu) -> Vec<MenuSection> {
    Category::ALL
        .into_iter()
        .map(|category| MenuSection {
            title: category.label(),
            items: menu.in_category(category).map(MenuItemView::from).collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect()
}

/// Query parameters for the menu page.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Name of the product whose modal is open.
    pub produto: Option<String>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub page: PageContext,
    pub sections: Vec<MenuSection>,
    /// Product shown in the modal, if one was requested.
    pub selected: Option<MenuItemView>,
}

/// Display the menu, with the product modal open when `?produto=` names a dish.
#[instrument(skip(state, page))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
    page: PageContext,
) -> impl IntoResponse {
    let menu = state.menu();
    let selected = query.produto.as_deref().and_then(|name| {
        let found = menu.find(name.trim());
        if found.is_none() {
            tracing::debug!(produto = name, "Unknown product requested");
        }
        found.map(MenuItemView::from)
    });

    MenuTemplate {
        page,
        sections: sections(menu),
        selected,
    }
}
