//! Simulated checkout.
//!
//! Checkout is the terminal transition of a cart: a non-empty cart becomes a
//! placed order and the stored cart is cleared. Nothing leaves the process;
//! payment is collected on delivery.

use tracing::info;

use crate::cart::Cart;
use crate::storage::Storage;
use crate::store::CartStore;
use crate::types::Price;

/// What was ordered, captured before the cart is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Distinct items ordered.
    pub lines: usize,
    /// Total units ordered.
    pub item_count: u32,
    /// Order total.
    pub total: Price,
}

impl From<&Cart> for OrderSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.len(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing changed.
    Empty,
    /// The order was placed and the cart cleared.
    Placed(OrderSummary),
}

/// Place the order held in `store`.
///
/// An empty cart is left alone. Otherwise the cart is summarized, logged and
/// cleared.
pub async fn checkout<S: Storage>(store: &CartStore<S>) -> CheckoutOutcome {
    let cart = store.load().await;
    if cart.is_empty() {
        return CheckoutOutcome::Empty;
    }

    let summary = OrderSummary::from(&cart);
    info!(
        lines = summary.lines,
        item_count = summary.item_count,
        total = %summary.total,
        "Order placed"
    );

    store.clear().await;
    CheckoutOutcome::Placed(summary)
}
