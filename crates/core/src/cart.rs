//! The in-memory cart.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s keyed by name. Order is the
//! order in which names were first added. Two invariants hold for every
//! value reachable through the public API:
//!
//! - at most one item per distinct name
//! - every quantity is at least 1

use crate::types::{ItemName, Price};

/// Errors that can occur when building a [`CartItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartItemError {
    /// The price is zero.
    #[error("price must be greater than zero")]
    ZeroPrice,
    /// The quantity is zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    name: ItemName,
    price: Price,
    quantity: u32,
}

impl CartItem {
    /// Create a validated cart item.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero price or a zero quantity.
    pub fn new(name: ItemName, price: Price, quantity: u32) -> Result<Self, CartItemError> {
        if price.is_zero() {
            return Err(CartItemError::ZeroPrice);
        }
        if quantity == 0 {
            return Err(CartItemError::ZeroQuantity);
        }
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    /// Rebuild an item read back from storage.
    ///
    /// Stored data may predate validation, so a zero quantity reads as 1 and
    /// a zero price is kept.
    pub(crate) fn restore(name: ItemName, price: Price, quantity: u32) -> Self {
        Self {
            name,
            price,
            quantity: quantity.max(1),
        }
    }

    /// The item's name.
    #[must_use]
    pub const fn name(&self) -> &ItemName {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Number of units ordered.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The ordered collection of items awaiting checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns true when the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Look up an item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.name.as_str() == name)
    }

    /// Add an item, merging with an existing entry of the same name.
    ///
    /// A merge adds the quantities and keeps the existing unit price.
    pub fn add(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|i| i.name == item.name) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
    }

    /// Remove the item with `name`. Returns true if something was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.name.as_str() != name);
        self.items.len() != before
    }

    /// Set the quantity of `name`, clamping anything below 1 up to 1.
    ///
    /// Returns false when no item has that name.
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.name.as_str() == name) else {
            return false;
        };
        item.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        true
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        let mut cart = Self::new();
        for item in iter {
            cart.add(item);
        }
        cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(name: &str, cents: u32, quantity: u32) -> CartItem {
        CartItem::new(
            ItemName::parse(name).unwrap(),
            Price::from_cents(cents),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_zero_price() {
        let result = CartItem::new(ItemName::parse("Água").unwrap(), Price::ZERO, 1);
        assert_eq!(result, Err(CartItemError::ZeroPrice));
    }

    #[test]
    fn test_new_rejects_zero_quantity() {
        let result = CartItem::new(
            ItemName::parse("Água").unwrap(),
            Price::from_cents(500),
            0,
        );
        assert_eq!(result, Err(CartItemError::ZeroQuantity));
    }

    #[test]
    fn test_add_same_name_merges() {
        let mut cart = Cart::new();
        cart.add(item("X-Burger", 2590, 1));
        cart.add(item("X-Burger", 2590, 1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("X-Burger").unwrap().quantity(), 2);
        assert_eq!(cart.total(), Price::from_cents(5180));
    }

    #[test]
    fn test_add_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add(item("X-Burger", 2590, 1));
        cart.add(item("X-Burger", 9900, 3));

        let merged = cart.get("X-Burger").unwrap();
        assert_eq!(merged.price(), Price::from_cents(2590));
        assert_eq!(merged.quantity(), 4);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item("Batata", 1200, 1));
        cart.add(item("X-Burger", 2590, 1));
        cart.add(item("Batata", 1200, 2));

        let names: Vec<_> = cart.iter().map(|i| i.name().as_str()).collect();
        assert_eq!(names, ["Batata", "X-Burger"]);
    }

    #[test]
    fn test_add_saturates_quantity() {
        let mut cart = Cart::new();
        cart.add(item("Refri", 600, u32::MAX));
        cart.add(item("Refri", 600, 5));
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(item("Batata", 1200, 1));
        cart.add(item("X-Burger", 2590, 2));

        assert!(cart.remove("Batata"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::from_cents(5180));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(item("Batata", 1200, 1));
        let before = cart.clone();

        assert!(!cart.remove("Milkshake"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add(item("Batata", 1200, 3));

        assert!(cart.set_quantity("Batata", 0));
        assert_eq!(cart.get("Batata").unwrap().quantity(), 1);

        assert!(cart.set_quantity("Batata", -7));
        assert_eq!(cart.get("Batata").unwrap().quantity(), 1);

        assert!(cart.set_quantity("Batata", 4));
        assert_eq!(cart.get("Batata").unwrap().quantity(), 4);
    }

    #[test]
    fn test_set_quantity_missing() {
        let mut cart = Cart::new();
        assert!(!cart.set_quantity("Batata", 2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let cart: Cart = [item("Batata", 1200, 2), item("Refri", 650, 3)]
            .into_iter()
            .collect();
        assert_eq!(cart.total(), Price::from_cents(4350));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_empty_totals() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_from_iter_merges_duplicates() {
        let cart: Cart = [item("Batata", 1200, 1), item("Batata", 1200, 2)]
            .into_iter()
            .collect();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_restore_clamps_quantity() {
        let restored = CartItem::restore(ItemName::parse("Batata").unwrap(), Price::ZERO, 0);
        assert_eq!(restored.quantity(), 1);
        assert!(restored.price().is_zero());
    }
}
