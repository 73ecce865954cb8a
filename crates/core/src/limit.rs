//! Limit - Non-negative per-transaction ceiling
//!
//! Used for the dubious-client limit shared by every account of a bank.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative amount ceiling in whole currency units.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor
/// and survives deserialization.
///
/// # Example
/// ```
/// use multibank_core::Limit;
///
/// let limit = Limit::new(50_000).unwrap();
/// assert_eq!(limit.value(), 50_000);
///
/// assert!(Limit::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Limit(i64);

impl Limit {
    /// Zero limit constant
    pub const ZERO: Self = Self(0);

    /// Create a new Limit from whole currency units.
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if value < 0 {
            Err(CoreError::NegativeLimit(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Get the inner value
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// True if `sum` exceeds this limit
    #[inline]
    pub fn is_exceeded_by(&self, sum: i64) -> bool {
        sum > self.0
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Limit {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        limit.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::ZERO
    }
}
