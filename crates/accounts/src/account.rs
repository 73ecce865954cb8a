//! Account - balance, history, and the per-kind withdrawal rules
//!
//! The three account kinds form a closed tagged variant. Balance moves
//! only through `increase_amount`/`decrease_amount`; the kind decides the
//! withdrawal rule and the daily payoff behavior.

use crate::config::ConfigHandle;
use crate::error::AccountError;
use crate::transaction::TransactionHandle;
use chrono::{DateTime, Duration, Utc};
use multibank_clients::ClientHandle;
use multibank_clock::calendar::{days_in_current_month, days_in_current_year};
use multibank_clock::TimeSource;
use multibank_core::{AccountId, TransactionId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use strum_macros::{Display, EnumString};

/// Shared handle to the injected time source.
pub type ClockHandle = Rc<dyn TimeSource>;

/// Shared handle to an account.
///
/// Accounts are referenced by their bank and by the commands issued
/// against them; single-threaded, so `Rc<RefCell<...>>`.
pub type AccountHandle = Rc<RefCell<Account>>;

/// Account kind tag, used for creation and notification filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Credit,
    Debit,
    Deposit,
}

/// Kind-specific state.
///
/// - `Credit` carries no extra state; its terms live in the shared
///   configuration.
/// - `Debit` accrues fractional interest daily and folds it into the
///   balance when the monthly counter runs out.
/// - `Deposit` accrues against its rate bracket until the fixed maturity
///   instant, then pays out once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Credit,
    Debit {
        accrued: Decimal,
        days_left: u32,
    },
    Deposit {
        accrued: Decimal,
        matures_at: DateTime<Utc>,
        matured: bool,
    },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Credit => AccountType::Credit,
            AccountKind::Debit { .. } => AccountType::Debit,
            AccountKind::Deposit { .. } => AccountType::Deposit,
        }
    }
}

/// One account: identity, owner, balance, and the transactions issued
/// against it.
pub struct Account {
    id: AccountId,
    client: ClientHandle,
    kind: AccountKind,
    balance: i64,
    config: ConfigHandle,
    clock: ClockHandle,
    history: Vec<TransactionHandle>,
}

impl Account {
    /// Open a credit account. It starts at the configured credit limit,
    /// which is also its balance floor.
    pub fn open_credit(
        client: ClientHandle,
        config: ConfigHandle,
        clock: ClockHandle,
    ) -> AccountHandle {
        let balance = config.borrow().credit().limit();
        Self::into_handle(Self {
            id: AccountId::new(),
            client,
            kind: AccountKind::Credit,
            balance,
            config,
            clock,
            history: Vec::new(),
        })
    }

    /// Open a debit account at zero balance. The monthly fold counter
    /// starts at the length of the clock's current month.
    pub fn open_debit(
        client: ClientHandle,
        config: ConfigHandle,
        clock: ClockHandle,
    ) -> AccountHandle {
        let days_left = days_in_current_month(clock.current_time());
        Self::into_handle(Self {
            id: AccountId::new(),
            client,
            kind: AccountKind::Debit {
                accrued: Decimal::ZERO,
                days_left,
            },
            balance: 0,
            config,
            clock,
            history: Vec::new(),
        })
    }

    /// Open a deposit account at zero balance, maturing `term` after the
    /// clock's current instant.
    pub fn open_deposit(
        client: ClientHandle,
        config: ConfigHandle,
        clock: ClockHandle,
        term: Duration,
    ) -> AccountHandle {
        let matures_at = clock.current_time() + term;
        Self::into_handle(Self {
            id: AccountId::new(),
            client,
            kind: AccountKind::Deposit {
                accrued: Decimal::ZERO,
                matures_at,
                matured: false,
            },
            balance: 0,
            config,
            clock,
            history: Vec::new(),
        })
    }

    fn into_handle(account: Account) -> AccountHandle {
        Rc::new(RefCell::new(account))
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn client(&self) -> ClientHandle {
        Rc::clone(&self.client)
    }

    /// Maturity instant, for deposit accounts.
    pub fn maturity(&self) -> Option<DateTime<Utc>> {
        match &self.kind {
            AccountKind::Deposit { matures_at, .. } => Some(*matures_at),
            _ => None,
        }
    }

    /// Add `sum` to the balance. No upper bound; kind-specific rules only
    /// apply to withdrawals.
    pub fn increase_amount(&mut self, sum: i64) -> Result<(), AccountError> {
        if sum <= 0 {
            return Err(AccountError::InvalidAmount(sum));
        }
        self.balance += sum;
        Ok(())
    }

    /// Take `sum` from the balance under the kind's rule.
    ///
    /// The balance is mutated only on full success; every failure path
    /// leaves it untouched.
    pub fn decrease_amount(&mut self, sum: i64) -> Result<(), AccountError> {
        if sum <= 0 {
            return Err(AccountError::InvalidAmount(sum));
        }

        match self.kind {
            AccountKind::Credit => {
                self.check_dubious_limit(sum)?;
                let (commission, floor) = {
                    let config = self.config.borrow();
                    (config.credit().commission(), config.credit().limit())
                };
                if sum > self.balance && self.balance - sum + commission < floor {
                    return Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: sum,
                    });
                }
                // Commission applies only to the portion financed by the
                // credit line, not to spending from a positive balance.
                self.balance = if sum <= self.balance {
                    self.balance - sum
                } else {
                    self.balance - sum + commission
                };
                Ok(())
            }
            AccountKind::Debit { .. } => {
                if self.balance < sum {
                    return Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: sum,
                    });
                }
                self.check_dubious_limit(sum)?;
                self.balance -= sum;
                Ok(())
            }
            AccountKind::Deposit { matures_at, .. } => {
                if self.clock.current_time() < matures_at {
                    return Err(AccountError::PeriodNotExpired);
                }
                self.check_dubious_limit(sum)?;
                if self.balance < sum {
                    return Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: sum,
                    });
                }
                self.balance -= sum;
                Ok(())
            }
        }
    }

    fn check_dubious_limit(&self, sum: i64) -> Result<(), AccountError> {
        if self.client.borrow().is_dubious() {
            let limit = self.config.borrow().dubious_client_limit();
            if limit.is_exceeded_by(sum) {
                return Err(AccountError::LimitExceeded {
                    limit: limit.value(),
                    requested: sum,
                });
            }
        }
        Ok(())
    }

    /// One simulated day of interest.
    ///
    /// Debit accounts accrue daily and capitalize once per month; deposit
    /// accounts accrue against their rate bracket and pay out exactly at
    /// maturity. Credit accounts have no daily component.
    pub fn daily_payoff(&mut self) -> Result<(), AccountError> {
        let now = self.clock.current_time();
        let balance = self.balance;
        let config = Rc::clone(&self.config);

        match &mut self.kind {
            AccountKind::Credit => Ok(()),
            AccountKind::Debit { accrued, days_left } => {
                let rate = config.borrow().debit().percent().fraction();
                *accrued +=
                    Decimal::from(balance) * rate / Decimal::from(days_in_current_year(now));
                *days_left -= 1;

                if *days_left == 0 {
                    self.balance += accrued.trunc().to_i64().unwrap_or(0);
                    *accrued = Decimal::ZERO;
                    *days_left = days_in_current_month(now);
                }
                Ok(())
            }
            AccountKind::Deposit {
                accrued,
                matures_at,
                matured,
            } => {
                if now > *matures_at {
                    return Err(AccountError::PeriodExpired);
                }
                if now == *matures_at {
                    if !*matured {
                        self.balance += accrued.trunc().to_i64().unwrap_or(0);
                        *accrued = Decimal::ZERO;
                        *matured = true;
                    }
                    return Ok(());
                }

                let bracket = config
                    .borrow()
                    .deposit()
                    .rate_for(balance)
                    .copied()
                    .ok_or(AccountError::NoApplicableRate { balance })?;
                // Deposit brackets apply their whole percent figure per
                // daily tick (a 3% bracket accrues balance * 3 / 366),
                // unlike the debit rate which applies the fraction.
                *accrued += Decimal::from(balance) * bracket.percent().value()
                    / Decimal::from(days_in_current_year(now));
                Ok(())
            }
        }
    }

    /// Record a transaction on this account's history.
    ///
    /// The same transaction must not be recorded twice on one account;
    /// failed transactions are recorded too, as an audit trail.
    pub fn save_changes(&mut self, transaction: TransactionHandle) -> Result<(), AccountError> {
        let id = transaction.borrow().id();
        if self.history.iter().any(|t| t.borrow().id() == id) {
            return Err(AccountError::DuplicateTransaction(id));
        }
        self.history.push(transaction);
        Ok(())
    }

    /// Look up a recorded transaction by id.
    pub fn transaction(&self, id: TransactionId) -> Result<TransactionHandle, AccountError> {
        self.history
            .iter()
            .find(|t| t.borrow().id() == id)
            .map(Rc::clone)
            .ok_or(AccountError::TransactionNotFound(id))
    }

    /// Recorded transactions, oldest first.
    pub fn transactions(&self) -> &[TransactionHandle] {
        &self.history
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("type", &self.account_type())
            .field("balance", &self.balance)
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BankConfiguration, CreditConfig, DebitConfig, DepositConfig};
    use chrono::TimeZone;
    use multibank_clients::ClientBuilder;
    use multibank_clock::RewindClock;
    use multibank_core::{DepositPercent, Limit, Percent};
    use rust_decimal_macros::dec;

    fn clock() -> Rc<RewindClock> {
        // January: 31-day fold cycle, 366-day year.
        Rc::new(RewindClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ))
    }

    fn config() -> ConfigHandle {
        BankConfiguration::new(
            CreditConfig::new(100, 200_000).unwrap(),
            DebitConfig::new(Percent::from_points(3).unwrap()),
            DepositConfig::new(
                vec![DepositPercent::open_ended(Percent::from_points(3).unwrap(), 0).unwrap()],
                90,
            )
            .unwrap(),
            Limit::new(10_000).unwrap(),
        )
        .into_handle()
    }

    fn trusted_client() -> ClientHandle {
        ClientBuilder::new()
            .name("Iris")
            .surname("Hale")
            .address("1 Pier Lane")
            .passport(555_001)
            .build()
            .unwrap()
            .into_handle()
    }

    fn dubious_client() -> ClientHandle {
        ClientBuilder::new()
            .name("Iris")
            .surname("Hale")
            .build()
            .unwrap()
            .into_handle()
    }

    #[test]
    fn test_increase_then_decrease_restores_balance() {
        let account = Account::open_debit(trusted_client(), config(), clock());
        let mut account = account.borrow_mut();
        account.increase_amount(5_000).unwrap();
        account.decrease_amount(5_000).unwrap();
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_increase_rejects_non_positive() {
        let account = Account::open_debit(trusted_client(), config(), clock());
        let mut account = account.borrow_mut();
        assert_eq!(
            account.increase_amount(0),
            Err(AccountError::InvalidAmount(0))
        );
        assert_eq!(
            account.increase_amount(-7),
            Err(AccountError::InvalidAmount(-7))
        );
    }

    #[test]
    fn test_debit_never_goes_negative() {
        let account = Account::open_debit(trusted_client(), config(), clock());
        let mut account = account.borrow_mut();
        account.increase_amount(100).unwrap();
        assert_eq!(
            account.decrease_amount(101),
            Err(AccountError::InsufficientFunds {
                balance: 100,
                requested: 101
            })
        );
        assert_eq!(account.balance(), 100);
    }

    #[test]
    fn test_credit_opens_at_limit_and_charges_commission_past_zero() {
        let account = Account::open_credit(trusted_client(), config(), clock());
        let mut account = account.borrow_mut();
        assert_eq!(account.balance(), 200_000);

        // Ordinary spending from a positive balance: no commission.
        account.decrease_amount(50_000).unwrap();
        assert_eq!(account.balance(), 150_000);

        // Drawing past the balance adds the commission back.
        account.increase_amount(50_000).unwrap();
        account.decrease_amount(200_001).unwrap();
        assert_eq!(account.balance(), 200_000 - 200_001 + 100);
    }

    #[test]
    fn test_credit_floor_enforced() {
        // The opening balance equals the floor, so an overdraw of 101
        // passes only with commission >= 101; commission here is 100.
        let account = Account::open_credit(trusted_client(), config(), clock());
        let mut account = account.borrow_mut();
        assert!(matches!(
            account.decrease_amount(200_000 + 101),
            Err(AccountError::InsufficientFunds { .. })
        ));
        assert_eq!(account.balance(), 200_000);
    }

    #[test]
    fn test_credit_commission_covers_exact_boundary() {
        // commission 100 exactly covers an overdraw of 100 past the floor.
        let account = Account::open_credit(trusted_client(), config(), clock());
        let mut account = account.borrow_mut();
        account.decrease_amount(200_000 + 100).unwrap();
        assert_eq!(account.balance(), 200_000 - 200_100 + 100);
    }

    #[test]
    fn test_dubious_limit_applies_to_credit_and_debit() {
        let clock = clock();
        for account in [
            Account::open_credit(dubious_client(), config(), Rc::clone(&clock) as ClockHandle),
            Account::open_debit(dubious_client(), config(), Rc::clone(&clock) as ClockHandle),
        ] {
            let mut account = account.borrow_mut();
            account.increase_amount(50_000).unwrap();
            assert!(matches!(
                account.decrease_amount(10_001),
                Err(AccountError::LimitExceeded {
                    limit: 10_000,
                    requested: 10_001
                })
            ));
        }
    }

    #[test]
    fn test_dubious_limit_applies_to_matured_deposit() {
        let clock = clock();
        let account = Account::open_deposit(
            dubious_client(),
            config(),
            Rc::clone(&clock) as ClockHandle,
            Duration::days(1),
        );
        account.borrow_mut().increase_amount(50_000).unwrap();
        clock.advance(Duration::days(2)).unwrap();
        assert!(matches!(
            account.borrow_mut().decrease_amount(10_001),
            Err(AccountError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_deposit_locked_before_maturity() {
        let clock = clock();
        let account = Account::open_deposit(
            trusted_client(),
            config(),
            Rc::clone(&clock) as ClockHandle,
            Duration::days(90),
        );
        account.borrow_mut().increase_amount(10_000).unwrap();
        assert_eq!(
            account.borrow_mut().decrease_amount(1_000),
            Err(AccountError::PeriodNotExpired)
        );

        clock.advance(Duration::days(91)).unwrap();
        account.borrow_mut().decrease_amount(1_000).unwrap();
        assert_eq!(account.borrow().balance(), 9_000);
    }

    #[test]
    fn test_debit_accrual_folds_at_month_end() {
        let clock = clock();
        let account =
            Account::open_debit(trusted_client(), config(), Rc::clone(&clock) as ClockHandle);
        account.borrow_mut().increase_amount(1_000_000).unwrap();

        // 3% of 1,000,000 over a 366-day year, 31 daily ticks.
        for _ in 0..30 {
            account.borrow_mut().daily_payoff().unwrap();
            assert_eq!(account.borrow().balance(), 1_000_000);
        }
        account.borrow_mut().daily_payoff().unwrap();

        let daily = dec!(1_000_000) * dec!(0.03) / dec!(366);
        let expected = (daily * dec!(31)).trunc().to_i64().unwrap();
        assert_eq!(account.borrow().balance(), 1_000_000 + expected);
    }

    #[test]
    fn test_deposit_accrues_and_pays_out_at_maturity() {
        let clock = clock();
        let account = Account::open_deposit(
            trusted_client(),
            config(),
            Rc::clone(&clock) as ClockHandle,
            Duration::days(3),
        );
        account.borrow_mut().increase_amount(100_000).unwrap();

        for _ in 0..3 {
            account.borrow_mut().daily_payoff().unwrap();
            clock.advance(Duration::days(1)).unwrap();
        }
        // Now exactly at maturity: the accumulator folds once.
        account.borrow_mut().daily_payoff().unwrap();

        // balance * 3 / 366 per day, three days, truncated.
        let daily = dec!(100_000) * dec!(3) / dec!(366);
        let expected = (daily * dec!(3)).trunc().to_i64().unwrap();
        assert_eq!(account.borrow().balance(), 100_000 + expected);

        // A repeated tick at the same instant does not pay out twice.
        let settled = account.borrow().balance();
        account.borrow_mut().daily_payoff().unwrap();
        assert_eq!(account.borrow().balance(), settled);

        // Strictly past maturity the tick is an error.
        clock.advance(Duration::days(1)).unwrap();
        assert_eq!(
            account.borrow_mut().daily_payoff(),
            Err(AccountError::PeriodExpired)
        );
    }

    #[test]
    fn test_deposit_with_no_matching_bracket() {
        let clock = clock();
        let config = BankConfiguration::new(
            CreditConfig::new(100, 200_000).unwrap(),
            DebitConfig::new(Percent::from_points(3).unwrap()),
            DepositConfig::new(
                vec![
                    DepositPercent::new(Percent::from_points(3).unwrap(), 1_000, 2_000).unwrap(),
                ],
                90,
            )
            .unwrap(),
            Limit::new(10_000).unwrap(),
        )
        .into_handle();
        let account = Account::open_deposit(
            trusted_client(),
            config,
            Rc::clone(&clock) as ClockHandle,
            Duration::days(90),
        );
        assert_eq!(
            account.borrow_mut().daily_payoff(),
            Err(AccountError::NoApplicableRate { balance: 0 })
        );
    }

    #[test]
    fn test_rate_change_is_visible_to_existing_accounts() {
        let clock = clock();
        let config = config();
        let account = Account::open_debit(
            trusted_client(),
            Rc::clone(&config),
            Rc::clone(&clock) as ClockHandle,
        );
        account.borrow_mut().increase_amount(1_000_000).unwrap();

        config
            .borrow_mut()
            .debit_mut()
            .set_percent(Percent::from_points(6).unwrap());

        for _ in 0..31 {
            account.borrow_mut().daily_payoff().unwrap();
        }
        let daily = dec!(1_000_000) * dec!(0.06) / dec!(366);
        let expected = (daily * dec!(31)).trunc().to_i64().unwrap();
        assert_eq!(account.borrow().balance(), 1_000_000 + expected);
    }
}
