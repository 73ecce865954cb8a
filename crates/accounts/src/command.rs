//! Balance-operation commands
//!
//! Every balance change goes through a command so it can be undone: the
//! `cancel` of each command is the exact structural inverse of its
//! `execute`. Commands hold handles to the accounts involved and the sum;
//! they keep no copy of pre-operation balances.

use crate::account::AccountHandle;
use crate::error::AccountError;

/// A reversible balance mutation.
///
/// Construction never touches account state; only `execute`/`cancel` do.
pub trait BalanceOperation {
    fn execute(&self) -> Result<(), AccountError>;
    fn cancel(&self) -> Result<(), AccountError>;
}

/// Replenish one account.
pub struct Income {
    account: AccountHandle,
    sum: i64,
}

impl Income {
    pub fn new(account: AccountHandle, sum: i64) -> Result<Self, AccountError> {
        if sum < 0 {
            return Err(AccountError::InvalidAmount(sum));
        }
        Ok(Self { account, sum })
    }
}

impl BalanceOperation for Income {
    fn execute(&self) -> Result<(), AccountError> {
        self.account.borrow_mut().increase_amount(self.sum)
    }

    /// May fail at undo time when the balance no longer covers the sum.
    fn cancel(&self) -> Result<(), AccountError> {
        self.account.borrow_mut().decrease_amount(self.sum)
    }
}

/// Withdraw from one account.
pub struct Withdraw {
    account: AccountHandle,
    sum: i64,
}

impl Withdraw {
    pub fn new(account: AccountHandle, sum: i64) -> Result<Self, AccountError> {
        if sum < 0 {
            return Err(AccountError::InvalidAmount(sum));
        }
        Ok(Self { account, sum })
    }
}

impl BalanceOperation for Withdraw {
    fn execute(&self) -> Result<(), AccountError> {
        self.account.borrow_mut().decrease_amount(self.sum)
    }

    fn cancel(&self) -> Result<(), AccountError> {
        self.account.borrow_mut().increase_amount(self.sum)
    }
}

/// Move a sum between two accounts, possibly of different banks.
pub struct Transfer {
    to: AccountHandle,
    from: AccountHandle,
    sum: i64,
}

impl Transfer {
    pub fn new(to: AccountHandle, from: AccountHandle, sum: i64) -> Result<Self, AccountError> {
        if sum < 0 {
            return Err(AccountError::InvalidAmount(sum));
        }
        Ok(Self { to, from, sum })
    }

    fn move_sum(
        source: &AccountHandle,
        destination: &AccountHandle,
        sum: i64,
    ) -> Result<(), AccountError> {
        if let Err(err) = source.borrow_mut().decrease_amount(sum) {
            // Compensate the source leg and re-signal. decrease_amount
            // mutates only on full success; a kind that mutated before
            // failing would make this re-increase a double credit.
            source.borrow_mut().increase_amount(sum)?;
            return Err(AccountError::TransferFailed {
                source: Box::new(err),
            });
        }
        destination.borrow_mut().increase_amount(sum)
    }
}

impl BalanceOperation for Transfer {
    fn execute(&self) -> Result<(), AccountError> {
        Self::move_sum(&self.from, &self.to, self.sum)
    }

    fn cancel(&self) -> Result<(), AccountError> {
        Self::move_sum(&self.to, &self.from, self.sum)
    }
}
