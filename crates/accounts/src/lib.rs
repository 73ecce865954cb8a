//! MultiBank Accounts - the ledger core
//!
//! Accounts of three kinds (credit, debit, deposit) with per-kind
//! withdrawal rules, reversible balance-operation commands, and the
//! transaction state machine that records every outcome — including
//! failures — as data.

pub mod account;
pub mod command;
pub mod config;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountHandle, AccountKind, AccountType, ClockHandle};
pub use command::{BalanceOperation, Income, Transfer, Withdraw};
pub use config::{BankConfiguration, ConfigHandle, CreditConfig, DebitConfig, DepositConfig};
pub use error::AccountError;
pub use transaction::{BankTransaction, TransactionHandle, TransactionState};
