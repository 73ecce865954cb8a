//! Fluent builder for `Client`

use crate::client::Client;
use crate::error::ClientError;

/// Assembles a `Client` field by field.
///
/// Name and surname are mandatory; address and passport may be supplied
/// later through the client's setters (until then the client is dubious).
///
/// # Example
/// ```
/// use multibank_clients::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .name("Anna")
///     .surname("Flint")
///     .address("7 Dock Road")
///     .passport(7700_123_456)
///     .build()
///     .unwrap();
/// assert!(!client.is_dubious());
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    name: Option<String>,
    surname: Option<String>,
    address: Option<String>,
    passport: Option<u64>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn passport(mut self, passport: u64) -> Self {
        self.passport = Some(passport);
        self
    }

    /// Build the client; fails when a mandatory field is missing.
    pub fn build(self) -> Result<Client, ClientError> {
        let name = self.name.filter(|n| !n.is_empty()).ok_or(ClientError::MissingName)?;
        let surname = self
            .surname
            .filter(|s| !s.is_empty())
            .ok_or(ClientError::MissingSurname)?;
        Ok(Client::new(name, surname, self.address, self.passport))
    }
}
