//! DepositPercent - Interest rate for a balance bracket
//!
//! A deposit account earns a rate chosen by where its balance falls in a
//! list of `[left, right)` brackets.

use crate::error::CoreError;
use crate::percent::Percent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel right border meaning "no upper bound".
pub const OPEN_END: i64 = i64::MAX;

/// An interest rate applicable to the balance range `[left, right)`.
///
/// # Invariant
/// `0 <= left < right`. Enforced by the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPercent {
    percent: Percent,
    left: i64,
    right: i64,
}

impl DepositPercent {
    /// Create a bracket `[left, right)` with the given rate.
    pub fn new(percent: Percent, left: i64, right: i64) -> Result<Self, CoreError> {
        if left < 0 || right < 0 || left >= right {
            return Err(CoreError::InvalidBracket { left, right });
        }
        Ok(Self {
            percent,
            left,
            right,
        })
    }

    /// Create a bracket `[left, OPEN_END)` with no upper bound.
    pub fn open_ended(percent: Percent, left: i64) -> Result<Self, CoreError> {
        Self::new(percent, left, OPEN_END)
    }

    /// The rate for this bracket
    #[inline]
    pub const fn percent(&self) -> Percent {
        self.percent
    }

    /// Inclusive left border
    #[inline]
    pub const fn left(&self) -> i64 {
        self.left
    }

    /// Exclusive right border (`OPEN_END` when unbounded)
    #[inline]
    pub const fn right(&self) -> i64 {
        self.right
    }

    /// True if `balance` falls inside `[left, right)`
    #[inline]
    pub fn contains(&self, balance: i64) -> bool {
        self.left <= balance && balance < self.right
    }
}

impl fmt::Display for DepositPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.right == OPEN_END {
            write!(f, "[{}, ...): {}", self.left, self.percent)
        } else {
            write!(f, "[{}, {}): {}", self.left, self.right, self.percent)
        }
    }
}
