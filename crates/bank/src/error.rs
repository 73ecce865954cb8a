//! Bank and central ledger errors

use multibank_accounts::AccountError;
use multibank_clients::ClientError;
use multibank_clock::ClockError;
use multibank_core::{AccountId, BankId, ClientId, CoreError};
use thiserror::Error;

/// Errors raised by bank orchestration and the central ledger service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Bank name cannot be empty")]
    EmptyBankName,

    #[error("Bank {0} does not exist")]
    BankNotFound(BankId),

    #[error("Bank with name '{0}' does not exist")]
    BankNameNotFound(String),

    #[error("Bank with name '{0}' already exists")]
    DuplicateBank(String),

    #[error("Account {0} does not exist in this bank")]
    AccountNotFound(AccountId),

    #[error("Client {0} is not registered")]
    ClientNotFound(ClientId),

    #[error("Client {0} is already subscribed")]
    AlreadySubscribed(ClientId),

    #[error("Client {0} is not subscribed")]
    NotSubscribed(ClientId),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Value(#[from] CoreError),

    #[error(transparent)]
    Clock(#[from] ClockError),
}
