//! Percent - Non-negative interest/commission rate
//!
//! Stored as the percent figure itself (3 means 3%); `fraction` yields
//! the multiplier used by accrual arithmetic.

use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative percent figure.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor
/// and survives deserialization.
///
/// # Example
/// ```
/// use multibank_core::Percent;
/// use rust_decimal::Decimal;
///
/// let rate = Percent::new(Decimal::new(3, 0)).unwrap();
/// assert_eq!(rate.fraction(), Decimal::new(3, 2)); // 0.03
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Percent from a percent figure (3 = 3%).
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, CoreError> {
        if value < Decimal::ZERO {
            Err(CoreError::NegativePercent(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create a Percent from whole percent points.
    pub fn from_points(points: i64) -> Result<Self, CoreError> {
        Self::new(Decimal::from(points))
    }

    /// Get the percent figure (3 = 3%)
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Get the multiplier form (3% -> 0.03)
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for Decimal {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_fraction() {
        let rate = Percent::from_points(3).unwrap();
        assert_eq!(rate.value(), dec!(3));
        assert_eq!(rate.fraction(), dec!(0.03));
    }

    #[test]
    fn test_percent_fractional_points() {
        let rate = Percent::new(dec!(2.5)).unwrap();
        assert_eq!(rate.fraction(), dec!(0.025));
    }

    #[test]
    fn test_percent_negative_rejected() {
        let result = Percent::new(dec!(-1));
        assert!(matches!(result, Err(CoreError::NegativePercent(_))));
    }

    #[test]
    fn test_display() {
        let rate = Percent::from_points(7).unwrap();
        assert_eq!(rate.to_string(), "7%");
    }

    #[test]
    fn test_serde_rejects_negative() {
        let parsed: Result<Percent, _> = serde_json::from_str("\"-2\"");
        assert!(parsed.is_err());
    }
}
