//! HC Burgers Core - cart model and shared types.
//!
//! This crate holds everything the storefront needs to reason about an order
//! without knowing where it is stored:
//!
//! - [`types`] - Validated newtypes for item names, prices and emails
//! - [`cart`] - The in-memory [`Cart`] and its invariants
//! - [`storage`] - The key-value [`Storage`] contract plus an in-memory store
//! - [`store`] - [`CartStore`], the read/modify/write layer over a storage area
//! - [`checkout`] - The simulated checkout transition
//! - [`theme`] - Persisted light/dark preference
//!
//! # Architecture
//!
//! The crate does no I/O of its own. Storage is injected through the
//! [`Storage`] trait so the storefront can back it with the visitor's session
//! and tests can use [`MemoryStorage`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod storage;
pub mod store;
pub mod theme;
pub mod types;

pub use cart::{Cart, CartItem, CartItemError};
pub use checkout::{CheckoutOutcome, OrderSummary, checkout};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use store::{CART_KEY, CartListener, CartStore};
pub use theme::{THEME_KEY, Theme, load_theme, toggle_theme};
pub use types::*;
