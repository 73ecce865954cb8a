//! MultiBank Core - Domain types
//!
//! This crate contains the fundamental types used across MultiBank:
//! - `Limit`: Non-negative per-transaction ceiling
//! - `Percent`: Non-negative interest/commission rate
//! - `DepositPercent`: Rate for a `[left, right)` balance bracket
//! - Strongly-typed uuid identifiers

pub mod bracket;
pub mod error;
pub mod id;
pub mod limit;
pub mod percent;

pub use bracket::{DepositPercent, OPEN_END};
pub use error::CoreError;
pub use id::{AccountId, BankId, ClientId, TransactionId};
pub use limit::Limit;
pub use percent::Percent;
