//! Core validation errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the monetary value types at construction time.
///
/// Validation failures are fatal to object creation; no invalid value
/// type instance ever exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Limit cannot be negative: {0}")]
    NegativeLimit(i64),

    #[error("Percent cannot be negative: {0}")]
    NegativePercent(Decimal),

    #[error("Invalid deposit bracket: left {left} must satisfy 0 <= left < right {right}")]
    InvalidBracket { left: i64, right: i64 },

    #[error("Deposit configuration requires at least one bracket")]
    EmptyDepositRates,

    #[error("Deposit brackets overlap at balance {boundary}")]
    OverlappingBrackets { boundary: i64 },

    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}
