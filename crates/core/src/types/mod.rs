//! Core types for HC Burgers.
//!
//! Validated wrappers for the values that arrive as loose text from forms
//! and catalog markup.

pub mod email;
pub mod item_name;
pub mod price;

pub use email::{Email, EmailError};
pub use item_name::{ItemName, ItemNameError};
pub use price::{Price, PriceError};
