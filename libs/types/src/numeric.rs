//! Fixed-point price and integer quantity types
//!
//! Prices use rust_decimal for deterministic arithmetic (no floating-point
//! errors). Quantities are whole units. Both types can only be built from
//! valid values through their checked constructors; raw order requests
//! carry unchecked numbers until validation converts them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Errors from parsing numeric values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    #[error("invalid decimal: {0}")]
    Parse(String),

    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),
}

/// A strictly positive limit price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, returning None unless the value is > 0
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value.normalize()))
        } else {
            None
        }
    }

    /// Create a whole-number price
    ///
    /// # Panics
    /// Panics if `value` is zero
    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|e| NumericError::Parse(e.to_string()))?;
        Self::try_new(value).ok_or(NumericError::NonPositivePrice(value))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A quantity of whole units
///
/// Zero is representable (a fully-filled remainder); admission requires
/// a positive value no larger than [`Quantity::MAX_ORDER`] via
/// [`Quantity::try_new`]. The cap keeps per-level and per-book totals far
/// below `u64::MAX`: overflowing one would take 2^32 resting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// Largest quantity a single order may carry
    pub const MAX_ORDER: u64 = u32::MAX as u64;

    /// Create a quantity from an unchecked input value, returning None
    /// unless it is in `1..=MAX_ORDER`
    pub fn try_new(value: i64) -> Option<Self> {
        if value > 0 && value as u64 <= Self::MAX_ORDER {
            Some(Self(value as u64))
        } else {
            None
        }
    }

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Subtract, clamping at zero
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    /// # Panics
    /// Panics on underflow; callers subtract at most the current value
    fn sub(self, rhs: Self) -> Self {
        assert!(rhs.0 <= self.0, "Quantity subtraction underflow");
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_none());
        assert!(Price::try_new(Decimal::new(-1, 0)).is_none());
        assert!(Price::try_new(Decimal::new(1, 2)).is_some());
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = "10.50".parse().unwrap();
        assert_eq!(price.as_decimal(), Decimal::new(105, 1));

        assert!(matches!("0".parse::<Price>(), Err(NumericError::NonPositivePrice(_))));
        assert!(matches!("abc".parse::<Price>(), Err(NumericError::Parse(_))));
    }

    #[test]
    fn test_price_scale_does_not_affect_equality() {
        let a: Price = "10.0".parse().unwrap();
        let b = Price::from_u64(10);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "10");
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::from_u64(9) < "9.5".parse::<Price>().unwrap());
    }

    #[test]
    fn test_quantity_try_new() {
        assert!(Quantity::try_new(0).is_none());
        assert!(Quantity::try_new(-5).is_none());
        assert_eq!(Quantity::try_new(5), Some(Quantity::new(5)));
    }

    #[test]
    fn test_quantity_try_new_caps_size() {
        let max = Quantity::MAX_ORDER as i64;
        assert_eq!(Quantity::try_new(max), Some(Quantity::new(Quantity::MAX_ORDER)));
        assert!(Quantity::try_new(max + 1).is_none());
        assert!(Quantity::try_new(i64::MAX).is_none());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let mut q = Quantity::new(10);
        q -= Quantity::new(4);
        assert_eq!(q, Quantity::new(6));
        q += Quantity::new(1);
        assert_eq!(q.value(), 7);
        assert_eq!(q.saturating_sub(Quantity::new(100)), Quantity::zero());
    }

    #[test]
    #[should_panic(expected = "Quantity subtraction underflow")]
    fn test_quantity_underflow_panics() {
        let _ = Quantity::new(1) - Quantity::new(2);
    }

    proptest! {
        #[test]
        fn price_equal_values_hash_equal(units in 1i64..1_000_000, scale in 0u32..6) {
            let raw = Decimal::new(units, scale);
            let rescaled = Decimal::new(units * 10, scale + 1);
            prop_assert_eq!(Price::try_new(raw), Price::try_new(rescaled));
        }
    }
}
