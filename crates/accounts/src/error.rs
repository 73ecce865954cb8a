//! Account and transaction errors
//!
//! Structured so a failed transaction can carry its reason as data:
//! every variant is `Clone + PartialEq + Eq` and tests assert on kinds,
//! not message strings.

use multibank_core::{CoreError, TransactionId};
use thiserror::Error;

/// Errors raised by balance operations, commands, and the transaction
/// state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be positive: {0}")]
    InvalidAmount(i64),

    #[error("Not enough money: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },

    #[error("Sum {requested} exceeds the limit {limit} for a dubious client")]
    LimitExceeded { limit: i64, requested: i64 },

    #[error("Deposit has not matured yet")]
    PeriodNotExpired,

    #[error("Deposit period is over")]
    PeriodExpired,

    #[error("No deposit bracket covers balance {balance}")]
    NoApplicableRate { balance: i64 },

    #[error("Transaction {0} is already recorded on this account")]
    DuplicateTransaction(TransactionId),

    #[error("Transaction {0} is not recorded on this account")]
    TransactionNotFound(TransactionId),

    #[error("Transaction cannot be executed from its current state")]
    TransactionAlreadyInProgress,

    #[error("Transaction cannot be undone from its current state")]
    TransactionNotUndoable,

    #[error("Transfer leg failed: {source}")]
    TransferFailed { source: Box<AccountError> },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Value(#[from] CoreError),
}
