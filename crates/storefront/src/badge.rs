//! Header badge showing how many units are in the cart.

use std::sync::{Mutex, PoisonError};

use hc_core::{Cart, CartListener};

/// Badge display data for templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub count: u32,
    /// A zero count hides the badge entirely.
    pub hidden: bool,
}

impl BadgeView {
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        Self {
            count,
            hidden: count == 0,
        }
    }
}

/// Cart listener that keeps the badge for the most recent change.
///
/// `latest()` stays `None` until the store reports a successful write, which
/// is how handlers tell a saved change from a failed one.
#[derive(Debug, Default)]
pub struct BadgeRefresh {
    latest: Mutex<Option<BadgeView>>,
}

impl BadgeRefresh {
    /// Badge after the last successful change, if any.
    #[must_use]
    pub fn latest(&self) -> Option<BadgeView> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartListener for BadgeRefresh {
    fn cart_changed(&self, cart: &Cart) {
        let view = BadgeView::from_count(cart.item_count());
        tracing::debug!(count = view.count, "Badge refreshed");
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(view);
    }
}
