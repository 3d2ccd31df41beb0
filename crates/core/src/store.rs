//! Cart persistence over a [`Storage`] area.
//!
//! The whole cart lives under one key ([`CART_KEY`]) as a JSON array:
//!
//! ```json
//! [{"name": "X-Burger", "price": 25.9, "qty": 2}]
//! ```
//!
//! Every mutation is a full read/modify/write of that value. Failures never
//! reach the caller: a bad read yields an empty cart and a failed write keeps
//! whatever was stored before. Both are logged.
//!
//! Listeners registered with [`CartStore::subscribe`] run after every
//! successful write or clear, so views stay consistent without callers
//! remembering to refresh them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::{debug, error, warn};

use crate::cart::{Cart, CartItem};
use crate::storage::{Storage, StorageError};
use crate::types::{ItemName, ItemNameError, Price, PriceError};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "hc-cart";

/// Receives the cart after each successful change.
pub trait CartListener: Send + Sync {
    /// Called with the cart as it now stands in storage.
    fn cart_changed(&self, cart: &Cart);
}

impl<F> CartListener for F
where
    F: Fn(&Cart) + Send + Sync,
{
    fn cart_changed(&self, cart: &Cart) {
        self(cart);
    }
}

/// Authoritative holder of the cart for one storage area.
pub struct CartStore<S> {
    storage: S,
    listeners: Vec<Arc<dyn CartListener>>,
}

impl<S> CartStore<S> {
    /// Create a store over `storage` with no listeners.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            listeners: Vec::new(),
        }
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: Arc<dyn CartListener>) {
        self.listeners.push(listener);
    }

    /// Builder form of [`Self::subscribe`].
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn CartListener>) -> Self {
        self.subscribe(listener);
        self
    }

    /// The underlying storage area.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn notify(&self, cart: &Cart) {
        for listener in &self.listeners {
            listener.cart_changed(cart);
        }
    }
}

impl<S: Storage> CartStore<S> {
    /// Read the cart. Never fails: missing or corrupt data reads as empty.
    pub async fn load(&self) -> Cart {
        match self.storage.get_item(CART_KEY).await {
            Ok(Some(raw)) => decode_cart(&raw),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart, treating as empty");
                Cart::new()
            }
        }
    }

    /// Write the full cart and notify listeners.
    ///
    /// Returns false if the write failed; the stored value is then unchanged
    /// and no listener runs.
    pub async fn persist(&self, cart: &Cart) -> bool {
        let encoded = match encode_cart(cart) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                return false;
            }
        };

        if let Err(e) = self.storage.set_item(CART_KEY, encoded).await {
            error!(error = %e, items = cart.len(), "Failed to save cart");
            return false;
        }

        debug!(items = cart.len(), count = cart.item_count(), "Cart saved");
        self.notify(cart);
        true
    }

    /// Add `item`, merging with an existing entry of the same name.
    pub async fn add_item(&self, item: CartItem) {
        let mut cart = self.load().await;
        cart.add(item);
        self.persist(&cart).await;
    }

    /// Remove the entry called `name`. A missing name still rewrites the
    /// unchanged cart.
    pub async fn remove_item(&self, name: &str) {
        let mut cart = self.load().await;
        cart.remove(name);
        self.persist(&cart).await;
    }

    /// Set the quantity of `name`, clamped to at least 1.
    ///
    /// Does nothing, and writes nothing, when `name` is not in the cart.
    pub async fn set_quantity(&self, name: &str, quantity: i64) {
        let mut cart = self.load().await;
        if cart.set_quantity(name, quantity) {
            self.persist(&cart).await;
        }
    }

    /// Delete the stored cart entirely.
    pub async fn clear(&self) {
        match self.storage.remove_item(CART_KEY).await {
            Ok(()) => self.notify(&Cart::new()),
            Err(e) => error!(error = %e, "Failed to clear cart"),
        }
    }

    /// Sum of `price * quantity` over the stored cart.
    pub async fn total(&self) -> Price {
        self.load().await.total()
    }

    /// Sum of quantities over the stored cart.
    pub async fn item_count(&self) -> u32 {
        self.load().await.item_count()
    }
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
struct StoredItemRef<'a> {
    name: &'a str,
    price: Number,
    qty: u32,
}

#[derive(Deserialize)]
struct StoredItem {
    name: String,
    price: Number,
    #[serde(default)]
    qty: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
enum EntryError {
    #[error("malformed entry: {0}")]
    Shape(#[from] serde_json::Error),
    #[error(transparent)]
    Name(#[from] ItemNameError),
    #[error("unreadable price {0}")]
    Number(Number),
    #[error(transparent)]
    Price(#[from] PriceError),
}

fn encode_cart(cart: &Cart) -> Result<String, StorageError> {
    let entries = cart
        .iter()
        .map(|item| {
            Ok(StoredItemRef {
                name: item.name().as_str(),
                price: price_to_number(item.price())?,
                qty: item.quantity(),
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    Ok(serde_json::to_string(&entries)?)
}

fn price_to_number(price: Price) -> Result<Number, serde_json::Error> {
    serde_json::from_str(&price.amount().normalize().to_string())
}

fn decode_cart(raw: &str) -> Cart {
    let entries: Vec<Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Stored cart is not a JSON array, treating as empty");
            return Cart::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match decode_item(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping invalid cart entry");
                None
            }
        })
        .collect()
}

fn decode_item(entry: Value) -> Result<CartItem, EntryError> {
    let stored: StoredItem = serde_json::from_value(entry)?;
    let name = ItemName::parse(&stored.name)?;

    let text = stored.price.to_string();
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| EntryError::Number(stored.price.clone()))?;
    let price = Price::new(amount)?;

    Ok(CartItem::restore(name, price, stored.qty.unwrap_or(1)))
}
