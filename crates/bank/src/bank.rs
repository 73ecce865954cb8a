//! Bank - owns accounts and product terms
//!
//! A bank creates accounts over its shared configuration, issues
//! income/withdraw transactions against them, and pushes configuration
//! changes to subscribed clients. Subscribers are tracked by id only and
//! resolved through the accounts' client handles at notification time.

use crate::error::BankError;
use chrono::Duration;
use multibank_accounts::{
    Account, AccountHandle, AccountType, BankConfiguration, BankTransaction, ClockHandle,
    ConfigHandle, Income, TransactionHandle, Withdraw,
};
use multibank_clients::{ClientHandle, ConfigObserver};
use multibank_core::{AccountId, BankId, ClientId, DepositPercent, Limit, Percent};
use std::rc::Rc;
use tracing::{debug, info};

/// One bank: identity, accounts, configuration, and subscribers.
pub struct Bank {
    id: BankId,
    name: String,
    accounts: Vec<AccountHandle>,
    subscribers: Vec<ClientId>,
    config: ConfigHandle,
    clock: ClockHandle,
}

impl Bank {
    pub fn new(
        name: impl Into<String>,
        clock: ClockHandle,
        config: BankConfiguration,
    ) -> Result<Self, BankError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BankError::EmptyBankName);
        }
        Ok(Self {
            id: BankId::new(),
            name,
            accounts: Vec::new(),
            subscribers: Vec::new(),
            config: config.into_handle(),
            clock,
        })
    }

    pub fn id(&self) -> BankId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the shared configuration. Mutation goes through
    /// the `change_*` methods so subscribers get notified.
    pub fn configuration(&self) -> ConfigHandle {
        Rc::clone(&self.config)
    }

    /// Open an account of the given kind for the client.
    ///
    /// Multiple accounts per client and kind are allowed. `term` applies
    /// to deposit accounts and defaults to the configured deposit term.
    pub fn create_account(
        &mut self,
        account_type: AccountType,
        client: ClientHandle,
        term: Option<Duration>,
    ) -> AccountHandle {
        let account = match account_type {
            AccountType::Credit => Account::open_credit(
                client,
                Rc::clone(&self.config),
                Rc::clone(&self.clock),
            ),
            AccountType::Debit => Account::open_debit(
                client,
                Rc::clone(&self.config),
                Rc::clone(&self.clock),
            ),
            AccountType::Deposit => {
                let term = term.unwrap_or_else(|| self.config.borrow().deposit().term());
                Account::open_deposit(
                    client,
                    Rc::clone(&self.config),
                    Rc::clone(&self.clock),
                    term,
                )
            }
        };
        info!(
            bank = %self.name,
            account = %account.borrow().id(),
            kind = %account_type,
            "account created"
        );
        self.accounts.push(Rc::clone(&account));
        account
    }

    /// Find an account by id.
    pub fn find_account(&self, account_id: AccountId) -> Option<AccountHandle> {
        self.accounts
            .iter()
            .find(|a| a.borrow().id() == account_id)
            .map(Rc::clone)
    }

    /// Get an account by id, failing when absent.
    pub fn account(&self, account_id: AccountId) -> Result<AccountHandle, BankError> {
        self.find_account(account_id)
            .ok_or(BankError::AccountNotFound(account_id))
    }

    /// Issue an income transaction against an account.
    ///
    /// The transaction is recorded on the account even when it failed;
    /// the history is an audit trail, not a success log.
    pub fn income(&self, account_id: AccountId, sum: i64) -> Result<TransactionHandle, BankError> {
        let account = self.account(account_id)?;
        let command = Income::new(Rc::clone(&account), sum)?;
        let transaction = BankTransaction::new(Box::new(command)).into_handle();
        transaction.borrow_mut().execute()?;
        account.borrow_mut().save_changes(Rc::clone(&transaction))?;
        info!(bank = %self.name, account = %account_id, sum, "income issued");
        Ok(transaction)
    }

    /// Issue a withdraw transaction against an account.
    pub fn withdraw(
        &self,
        account_id: AccountId,
        sum: i64,
    ) -> Result<TransactionHandle, BankError> {
        let account = self.account(account_id)?;
        let command = Withdraw::new(Rc::clone(&account), sum)?;
        let transaction = BankTransaction::new(Box::new(command)).into_handle();
        transaction.borrow_mut().execute()?;
        account.borrow_mut().save_changes(Rc::clone(&transaction))?;
        info!(bank = %self.name, account = %account_id, sum, "withdraw issued");
        Ok(transaction)
    }

    /// Subscribe a client to configuration-change notices.
    pub fn subscribe(&mut self, client_id: ClientId) -> Result<(), BankError> {
        if self.subscribers.contains(&client_id) {
            return Err(BankError::AlreadySubscribed(client_id));
        }
        self.subscribers.push(client_id);
        Ok(())
    }

    /// Remove a client from the subscriber set.
    pub fn unsubscribe(&mut self, client_id: ClientId) -> Result<(), BankError> {
        let before = self.subscribers.len();
        self.subscribers.retain(|id| *id != client_id);
        if self.subscribers.len() == before {
            return Err(BankError::NotSubscribed(client_id));
        }
        Ok(())
    }

    /// Change the debit rate and notify subscribed debit-account holders.
    pub fn change_debit_percent(&mut self, percent: Percent) -> Result<(), BankError> {
        self.config.borrow_mut().debit_mut().set_percent(percent);
        self.notify(AccountType::Debit, &format!("New debit percent: {percent}"));
        Ok(())
    }

    /// Replace the deposit brackets and notify subscribed deposit-account
    /// holders.
    pub fn change_deposit_percents(
        &mut self,
        brackets: Vec<DepositPercent>,
    ) -> Result<(), BankError> {
        self.config
            .borrow_mut()
            .deposit_mut()
            .set_brackets(brackets)?;
        let rendered = self
            .config
            .borrow()
            .deposit()
            .brackets()
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.notify(
            AccountType::Deposit,
            &format!("New deposit percents:\n{rendered}"),
        );
        Ok(())
    }

    /// Change the credit commission and notify subscribed credit-account
    /// holders.
    pub fn change_credit_commission(&mut self, commission: i64) -> Result<(), BankError> {
        self.config
            .borrow_mut()
            .credit_mut()
            .set_commission(commission)?;
        self.notify(
            AccountType::Credit,
            &format!("New credit commission: {commission}"),
        );
        Ok(())
    }

    /// Change the credit limit and notify subscribed credit-account
    /// holders.
    pub fn change_credit_limit(&mut self, limit: i64) -> Result<(), BankError> {
        self.config.borrow_mut().credit_mut().set_limit(limit)?;
        self.notify(AccountType::Credit, &format!("New credit limit: {limit}"));
        Ok(())
    }

    /// Change the dubious-client limit; every account kind is affected,
    /// so all subscribed account holders are notified.
    pub fn change_dubious_client_limit(&mut self, limit: Limit) -> Result<(), BankError> {
        self.config.borrow_mut().set_dubious_client_limit(limit);
        let notice = format!("New limit for dubious client: {limit}");
        self.notify(AccountType::Credit, &notice);
        self.notify(AccountType::Debit, &notice);
        self.notify(AccountType::Deposit, &notice);
        Ok(())
    }

    /// Run the daily interest tick over every account.
    ///
    /// Per-account accrual failures (a deposit past maturity, a missing
    /// bracket) are logged and skipped; the sweep never aborts midway.
    pub fn daily_payoff(&self) {
        for account in &self.accounts {
            let result = account.borrow_mut().daily_payoff();
            if let Err(reason) = result {
                debug!(
                    bank = %self.name,
                    account = %account.borrow().id(),
                    %reason,
                    "daily payoff skipped"
                );
            }
        }
    }

    /// Push a notice to subscribed clients holding accounts of the kind,
    /// once per client.
    fn notify(&self, selected: AccountType, notice: &str) {
        let mut notified: Vec<ClientId> = Vec::new();
        for account in &self.accounts {
            if account.borrow().account_type() != selected {
                continue;
            }
            let client = account.borrow().client();
            let client_id = client.borrow().id();
            if !self.subscribers.contains(&client_id) || notified.contains(&client_id) {
                continue;
            }
            client.borrow_mut().update(notice);
            notified.push(client_id);
        }
        debug!(
            bank = %self.name,
            kind = %selected,
            clients = notified.len(),
            "configuration notice delivered"
        );
    }
}
