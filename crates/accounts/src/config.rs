//! Bank configuration
//!
//! One `BankConfiguration` is owned by one bank and shared by reference
//! with every account of that bank: changing a rate is instantly visible
//! to all existing accounts of the kind. Only the bank mutates it;
//! accounts hold a read-only handle.

use crate::error::AccountError;
use chrono::Duration;
use multibank_core::{CoreError, DepositPercent, Limit, Percent};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a bank's configuration.
pub type ConfigHandle = Rc<RefCell<BankConfiguration>>;

/// Credit-account terms: commission charged when drawing on the credit
/// line, and the credit limit that is both the opening balance and the
/// balance floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditConfig {
    commission: i64,
    limit: i64,
}

impl CreditConfig {
    pub fn new(commission: i64, limit: i64) -> Result<Self, AccountError> {
        if commission < 0 || limit <= 0 {
            return Err(AccountError::InvalidConfiguration(format!(
                "credit commission {commission}, credit limit {limit}"
            )));
        }
        Ok(Self { commission, limit })
    }

    pub fn commission(&self) -> i64 {
        self.commission
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn set_commission(&mut self, commission: i64) -> Result<(), AccountError> {
        if commission < 0 {
            return Err(AccountError::InvalidConfiguration(format!(
                "credit commission {commission}"
            )));
        }
        self.commission = commission;
        Ok(())
    }

    pub fn set_limit(&mut self, limit: i64) -> Result<(), AccountError> {
        if limit < 0 {
            return Err(AccountError::InvalidConfiguration(format!(
                "credit limit {limit}"
            )));
        }
        self.limit = limit;
        Ok(())
    }
}

/// Debit-account terms: the annual interest rate shared by every debit
/// account of the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitConfig {
    percent: Percent,
}

impl DebitConfig {
    pub fn new(percent: Percent) -> Self {
        Self { percent }
    }

    pub fn percent(&self) -> Percent {
        self.percent
    }

    pub fn set_percent(&mut self, percent: Percent) {
        self.percent = percent;
    }
}

/// Deposit-account terms: tiered rate brackets plus the default term in
/// whole days (accrual runs on a daily tick, so day granularity is the
/// natural unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositConfig {
    brackets: Vec<DepositPercent>,
    term_days: i64,
}

impl DepositConfig {
    pub fn new(brackets: Vec<DepositPercent>, term_days: i64) -> Result<Self, AccountError> {
        if term_days < 0 {
            return Err(AccountError::InvalidConfiguration(format!(
                "deposit term {term_days} days"
            )));
        }
        let brackets = Self::validate_brackets(brackets)?;
        Ok(Self {
            brackets,
            term_days,
        })
    }

    pub fn brackets(&self) -> &[DepositPercent] {
        &self.brackets
    }

    pub fn term(&self) -> Duration {
        Duration::days(self.term_days)
    }

    pub fn set_brackets(&mut self, brackets: Vec<DepositPercent>) -> Result<(), AccountError> {
        self.brackets = Self::validate_brackets(brackets)?;
        Ok(())
    }

    /// First bracket containing the balance. Brackets are sorted and
    /// non-overlapping, so the first match is also the only one.
    pub fn rate_for(&self, balance: i64) -> Option<&DepositPercent> {
        self.brackets.iter().find(|b| b.contains(balance))
    }

    fn validate_brackets(
        mut brackets: Vec<DepositPercent>,
    ) -> Result<Vec<DepositPercent>, AccountError> {
        if brackets.is_empty() {
            return Err(CoreError::EmptyDepositRates.into());
        }
        brackets.sort_by_key(|b| b.left());
        for pair in brackets.windows(2) {
            if pair[1].left() < pair[0].right() {
                return Err(CoreError::OverlappingBrackets {
                    boundary: pair[1].left(),
                }
                .into());
            }
        }
        Ok(brackets)
    }
}

/// All product terms of one bank, plus the shared dubious-client limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfiguration {
    credit: CreditConfig,
    debit: DebitConfig,
    deposit: DepositConfig,
    dubious_client_limit: Limit,
}

impl BankConfiguration {
    pub fn new(
        credit: CreditConfig,
        debit: DebitConfig,
        deposit: DepositConfig,
        dubious_client_limit: Limit,
    ) -> Self {
        Self {
            credit,
            debit,
            deposit,
            dubious_client_limit,
        }
    }

    pub fn credit(&self) -> &CreditConfig {
        &self.credit
    }

    pub fn debit(&self) -> &DebitConfig {
        &self.debit
    }

    pub fn deposit(&self) -> &DepositConfig {
        &self.deposit
    }

    pub fn dubious_client_limit(&self) -> Limit {
        self.dubious_client_limit
    }

    pub fn credit_mut(&mut self) -> &mut CreditConfig {
        &mut self.credit
    }

    pub fn debit_mut(&mut self) -> &mut DebitConfig {
        &mut self.debit
    }

    pub fn deposit_mut(&mut self) -> &mut DepositConfig {
        &mut self.deposit
    }

    pub fn set_dubious_client_limit(&mut self, limit: Limit) {
        self.dubious_client_limit = limit;
    }

    /// Wrap into the shared handle form held by the bank and its accounts.
    pub fn into_handle(self) -> ConfigHandle {
        Rc::new(RefCell::new(self))
    }
}
