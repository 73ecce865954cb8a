//! Client errors

use thiserror::Error;

/// Errors that can occur when building or mutating a client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Client requires a name")]
    MissingName,

    #[error("Client requires a surname")]
    MissingSurname,

    #[error("Address cannot be empty")]
    InvalidAddress,

    #[error("Invalid passport number: {0}")]
    InvalidPassport(u64),

    #[error("Passport number is already set")]
    PassportAlreadySet,
}
