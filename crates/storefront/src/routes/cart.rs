//! Cart route handlers.
//!
//! The cart lives in the visitor's session storage area under `hc-cart`.
//! Every mutation goes through [`CartStore`], then redirects to a page that
//! re-reads and fully redraws the cart.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use hc_core::{
    Cart, CartItem, CartItemError, CheckoutOutcome, ItemName, ItemNameError, Price, PriceError,
    checkout as place_order,
};

use crate::badge::{BadgeRefresh, BadgeView};
use crate::context::PageContext;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::return_path;
use crate::state::AppState;
use crate::toast;

const CART_PATH: &str = "/pedido";
const MENU_PATH: &str = "/cardapio";

/// Cart row display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.name().to_string(),
            quantity: item.quantity(),
            unit_price: item.price().to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
///
/// Fields mirror the menu markup: the item's name and its printed price.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub name: String,
}

/// Why an add-to-cart request was refused.
#[derive(Debug, Error)]
enum AddItemError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error(transparent)]
    Name(#[from] ItemNameError),
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error(transparent)]
    Item(#[from] CartItemError),
}

impl AddToCartForm {
    /// Build one unit of the posted item.
    fn to_item(&self) -> std::result::Result<CartItem, AddItemError> {
        let name = self.name.as_deref().ok_or(AddItemError::Missing("name"))?;
        let price = self.price.as_deref().ok_or(AddItemError::Missing("price"))?;
        Ok(CartItem::new(
            ItemName::parse(name)?,
            Price::parse(price)?,
            1,
        )?)
    }
}

/// Read a quantity field the way a number input reports it.
///
/// Blank or non-numeric input counts as 1; the store clamps the rest.
fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(1)
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: BadgeView,
}

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
) -> impl IntoResponse {
    let cart = state.cart_store(&session).load().await;
    CartShowTemplate {
        page,
        cart: CartView::from(&cart),
    }
}

/// Add one unit of an item to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let target = return_path(form.return_to.as_deref(), MENU_PATH);

    let item = match form.to_item() {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected add to cart");
            toast::push(&session, toast::ADD_FAILED).await?;
            return Ok(Redirect::to(&target));
        }
    };

    let badge = Arc::new(BadgeRefresh::default());
    let store = state.cart_store(&session).with_listener(badge.clone());
    add_breadcrumb("cart", &format!("Add {}", item.name()));
    store.add_item(item).await;

    let message = if badge.latest().is_some() {
        toast::ITEM_ADDED
    } else {
        toast::SAVE_FAILED
    };
    toast::push(&session, message).await?;
    Ok(Redirect::to(&target))
}

/// Change the quantity of a cart item.
///
/// A name that is not in the cart changes nothing. A write that fails leaves
/// the previous quantity and shows the save-failed toast.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    let quantity = parse_quantity(&form.quantity);

    let badge = Arc::new(BadgeRefresh::default());
    let store = state.cart_store(&session).with_listener(badge.clone());
    if store.load().await.get(name).is_none() {
        return Ok(Redirect::to(CART_PATH));
    }
    store.set_quantity(name, quantity).await;

    if badge.latest().is_none() {
        toast::push(&session, toast::SAVE_FAILED).await?;
    }
    Ok(Redirect::to(CART_PATH))
}

/// Remove an item from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let badge = Arc::new(BadgeRefresh::default());
    let store = state.cart_store(&session).with_listener(badge.clone());
    add_breadcrumb("cart", &format!("Remove {}", form.name.trim()));
    store.remove_item(form.name.trim()).await;

    let message = if badge.latest().is_some() {
        toast::ITEM_REMOVED
    } else {
        toast::SAVE_FAILED
    };
    toast::push(&session, message).await?;
    Ok(Redirect::to(CART_PATH))
}

/// Get cart count badge fragment.
#[instrument(skip_all)]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = state.cart_store(&session).item_count().await;
    CartCountTemplate {
        badge: BadgeView::from_count(count),
    }
}

/// Place the order (simulated) and clear the cart.
#[instrument(skip_all)]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let store = state.cart_store(&session);
    let message = match place_order(&store).await {
        CheckoutOutcome::Empty => toast::CART_EMPTY,
        CheckoutOutcome::Placed(summary) => {
            add_breadcrumb("cart", &format!("Checkout {}", summary.total));
            toast::ORDER_PLACED
        }
    };
    toast::push(&session, message).await?;
    Ok(Redirect::to(CART_PATH))
}
