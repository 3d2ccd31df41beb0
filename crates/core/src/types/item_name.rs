//! Menu item name, the primary key of a cart entry.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemNameError {
    /// The input is empty or only whitespace.
    #[error("item name cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("item name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The name of a menu item.
///
/// Names are compared exactly (after trimming), so `"X-Burger"` and
/// `"x-burger"` are different items.
///
/// ```
/// use hc_core::ItemName;
///
/// let name = ItemName::parse("  X-Burger ").unwrap();
/// assert_eq!(name.as_str(), "X-Burger");
/// assert!(ItemName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Maximum length of an item name, in characters.
    pub const MAX_LENGTH: usize = 120;

    /// Parse an `ItemName`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, ItemNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ItemNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ItemNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ItemName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ItemName {
    type Err = ItemNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> Self {
        name.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
