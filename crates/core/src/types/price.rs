//! Type-safe price representation using decimal arithmetic.
//!
//! All amounts are Brazilian reais. Catalog markup writes prices the way a
//! customer reads them (`"25,90"`), so parsing accepts the comma form first
//! and falls back to a dot decimal separator.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0:?}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has fractions of a centavo.
    #[error("price has more than two decimal places")]
    TooPrecise,
    /// The amount exceeds [`Price::max`].
    #[error("price exceeds R$ 99999999,99")]
    TooLarge,
}

/// Decimal places a price may carry.
const MAX_DECIMALS: u32 = 2;

/// Largest accepted amount, in centavos.
const MAX_CENTS: i64 = 9_999_999_999;

/// A non-negative amount in reais.
///
/// ## Parsing
///
/// - `"25,90"` and `"25.90"` are the same price
/// - With a comma present, dots are thousands separators: `"1.234,56"`
/// - A leading `R$` and surrounding whitespace are ignored
/// - At most two decimal places and at most `R$ 99999999,99`, so every
///   price is exact as a JSON number
///
/// ## Display
///
/// Always `R$ ` followed by two decimals with a comma separator and no
/// digit grouping.
///
/// ```
/// use hc_core::Price;
///
/// let price = Price::parse("25,90").unwrap();
/// assert_eq!(price, Price::parse("25.90").unwrap());
/// assert_eq!(price.to_string(), "R$ 25,90");
/// assert_eq!(price.times(2).to_string(), "R$ 51,80");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero,
    /// [`PriceError::TooPrecise`] for fractions of a centavo and
    /// [`PriceError::TooLarge`] above [`Price::max`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > MAX_DECIMALS {
            return Err(PriceError::TooPrecise);
        }
        if amount > Self::max().0 {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }

    /// The largest accepted price, `R$ 99999999,99`.
    #[must_use]
    pub fn max() -> Self {
        Self(Decimal::new(MAX_CENTS, MAX_DECIMALS))
    }

    /// Create a price from a whole number of centavos.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price from catalog or form text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, is not a number, has more than
    /// one comma, or is out of range for [`Price::new`].
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_prefix("R$").map_or(trimmed, str::trim_start);
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let normalized = match trimmed.matches(',').count() {
            0 => trimmed.to_owned(),
            1 => trimmed.replace('.', "").replace(',', "."),
            _ => return Err(PriceError::Invalid(trimmed.to_owned())),
        };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true for a zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Line total for `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// The amount with two decimals and a comma separator, without the
    /// currency symbol (e.g. `"25,90"`).
    #[must_use]
    pub fn decimal_text(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}").replace('.', ",")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}", self.decimal_text())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_and_dot_agree() {
        assert_eq!(
            Price::parse("25,90").unwrap(),
            Price::parse("25.90").unwrap()
        );
        assert_eq!(Price::parse("25,90").unwrap(), Price::from_cents(2590));
    }

    #[test]
    fn test_parse_thousands_with_comma_decimal() {
        let price = Price::parse("1.234,56").unwrap();
        assert_eq!(price, Price::from_cents(123_456));
    }

    #[test]
    fn test_parse_currency_prefix_and_whitespace() {
        assert_eq!(Price::parse("  R$ 18,00 ").unwrap(), Price::from_cents(1800));
        assert_eq!(Price::parse("R$9.5").unwrap(), Price::from_cents(950));
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(Price::parse("30").unwrap(), Price::from_cents(3000));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("  R$ "), Err(PriceError::Empty)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse("1,2,3"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-5,00"), Err(PriceError::Negative)));
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative)
        ));
    }

    #[test]
    fn test_zero_is_allowed() {
        let price = Price::parse("0,00").unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_display_formats_brl() {
        assert_eq!(Price::from_cents(2590).to_string(), "R$ 25,90");
        assert_eq!(Price::ZERO.to_string(), "R$ 0,00");
        assert_eq!(Price::parse("7").unwrap().to_string(), "R$ 7,00");
        assert_eq!(Price::parse("1.234,5").unwrap().to_string(), "R$ 1234,50");
    }

    #[test]
    fn test_fractions_of_a_centavo_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(10_005, 3)),
            Err(PriceError::TooPrecise)
        ));
        assert!(matches!(
            Price::parse("0,123456789012345678"),
            Err(PriceError::TooPrecise)
        ));
        // Trailing zeros are not extra precision.
        assert_eq!(Price::parse("25,900").unwrap(), Price::from_cents(2590));
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(
            Price::parse("99999999,99").unwrap().to_string(),
            "R$ 99999999,99"
        );
        assert!(matches!(
            Price::parse("100000000"),
            Err(PriceError::TooLarge)
        ));
        assert!(matches!(
            Price::parse("12345678901234567890,99"),
            Err(PriceError::TooLarge)
        ));
        assert!(Price::from_cents(u32::MAX) <= Price::max());
    }

    #[test]
    fn test_times_and_sum() {
        let burger = Price::parse("25,90").unwrap();
        assert_eq!(burger.times(2), Price::from_cents(5180));

        let total: Price = [burger, Price::from_cents(800)].into_iter().sum();
        assert_eq!(total, Price::from_cents(3390));
    }

    #[test]
    fn test_from_str() {
        let price: Price = "12,00".parse().unwrap();
        assert_eq!(price.decimal_text(), "12,00");
    }
}
