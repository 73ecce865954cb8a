//! Client - the owner of accounts

use crate::error::ClientError;
use crate::observer::ConfigObserver;
use multibank_core::ClientId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a client.
///
/// Clients are referenced by the central registry and by every account
/// they own; the design is single-threaded, so `Rc<RefCell<...>>`.
pub type ClientHandle = Rc<RefCell<Client>>;

/// A bank client.
///
/// Address and passport number are optional at registration. While either
/// is missing the client is *dubious* and every account kind applies the
/// bank's dubious-client limit to their withdrawals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: String,
    surname: String,
    address: Option<String>,
    passport: Option<u64>,
    notices: Vec<String>,
}

impl Client {
    pub(crate) fn new(
        name: String,
        surname: String,
        address: Option<String>,
        passport: Option<u64>,
    ) -> Self {
        Self {
            id: ClientId::new(),
            name,
            surname,
            address,
            passport,
            notices: Vec::new(),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn passport(&self) -> Option<u64> {
        self.passport
    }

    /// True while address or passport is unset.
    pub fn is_dubious(&self) -> bool {
        self.address.is_none() || self.passport.is_none()
    }

    /// Set the address, clearing half of the dubious condition.
    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), ClientError> {
        let address = address.into();
        if address.is_empty() {
            return Err(ClientError::InvalidAddress);
        }
        self.address = Some(address);
        Ok(())
    }

    /// Set the passport number once; it is immutable afterwards.
    pub fn set_passport(&mut self, passport: u64) -> Result<(), ClientError> {
        if self.passport.is_some() {
            return Err(ClientError::PassportAlreadySet);
        }
        if passport == 0 {
            return Err(ClientError::InvalidPassport(passport));
        }
        self.passport = Some(passport);
        Ok(())
    }

    /// Configuration-change notices received so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Wrap into the shared handle form used by the registry and accounts.
    pub fn into_handle(self) -> ClientHandle {
        Rc::new(RefCell::new(self))
    }
}

impl ConfigObserver for Client {
    fn update(&mut self, notice: &str) {
        self.notices.push(notice.to_string());
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.surname, self.id)
    }
}
