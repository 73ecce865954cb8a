//! MultiBank Clients - Client identity and notification contract
//!
//! A client is "dubious" while their address or passport number is unset;
//! dubious clients are subject to a lower per-transaction limit. Clients
//! also receive configuration-change notices through the `ConfigObserver`
//! contract.

pub mod builder;
pub mod client;
pub mod error;
pub mod observer;

pub use builder::ClientBuilder;
pub use client::{Client, ClientHandle};
pub use error::ClientError;
pub use observer::ConfigObserver;
