//! MultiBank Bank - orchestration and the central ledger service
//!
//! `Bank` owns accounts and product terms; `CentralLedger` indexes banks
//! and clients, routes cross-bank transfers, and drives the daily payoff
//! sweep from the rewind clock.

pub mod bank;
pub mod central;
pub mod error;

pub use bank::Bank;
pub use central::{BankHandle, CentralLedger};
pub use error::BankError;
