//! CentralLedger - the service above the banks
//!
//! Indexes banks and clients by id, routes cross-bank transfers, exposes
//! cancel-by-id, and drives the daily payoff sweep from the rewind clock.

use crate::bank::Bank;
use crate::error::BankError;
use chrono::Duration;
use multibank_accounts::{
    AccountHandle, AccountType, BankConfiguration, BankTransaction, ClockHandle, CreditConfig,
    DebitConfig, DepositConfig, TransactionHandle, Transfer,
};
use multibank_clients::{ClientBuilder, ClientHandle};
use multibank_clock::RewindClock;
use multibank_core::{AccountId, BankId, ClientId, DepositPercent, Limit, Percent, TransactionId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::info;

/// Shared handle to a bank.
pub type BankHandle = Rc<RefCell<Bank>>;

/// The central ledger service.
///
/// Owns the bank and client registries and the shared rewind clock. On
/// construction it registers a rewind action that runs the daily payoff
/// sweep across every bank once per simulated day.
pub struct CentralLedger {
    banks: Rc<RefCell<HashMap<BankId, BankHandle>>>,
    clients: HashMap<ClientId, ClientHandle>,
    clock: Rc<RewindClock>,
}

impl CentralLedger {
    pub fn new(clock: Rc<RewindClock>) -> Self {
        let banks: Rc<RefCell<HashMap<BankId, BankHandle>>> =
            Rc::new(RefCell::new(HashMap::new()));

        let sweep = Rc::clone(&banks);
        clock.on_rewind(move |_now| {
            for bank in sweep.borrow().values() {
                bank.borrow().daily_payoff();
            }
        });

        Self {
            banks,
            clients: HashMap::new(),
            clock,
        }
    }

    /// The shared clock driving maturity checks and accrual.
    pub fn clock(&self) -> Rc<RewindClock> {
        Rc::clone(&self.clock)
    }

    /// Advance simulated time day by day; each day runs the payoff sweep.
    pub fn skip_days(&self, days: i64) -> Result<(), BankError> {
        self.clock.advance_days(days)?;
        Ok(())
    }

    /// Register a new client and index it by id.
    pub fn register_client(&mut self, builder: ClientBuilder) -> Result<ClientHandle, BankError> {
        let client = builder.build()?.into_handle();
        let client_id = client.borrow().id();
        self.clients.insert(client_id, Rc::clone(&client));
        info!(client = %client_id, "client registered");
        Ok(client)
    }

    /// Look up a registered client.
    pub fn client(&self, client_id: ClientId) -> Result<ClientHandle, BankError> {
        self.clients
            .get(&client_id)
            .map(Rc::clone)
            .ok_or(BankError::ClientNotFound(client_id))
    }

    /// Create a bank with the given product terms.
    ///
    /// Bank names are unique across the ledger.
    #[allow(clippy::too_many_arguments)]
    pub fn create_bank(
        &mut self,
        name: &str,
        debit_percent: Percent,
        deposit_brackets: Vec<DepositPercent>,
        credit_commission: i64,
        credit_limit: i64,
        dubious_client_limit: Limit,
        deposit_term_days: i64,
    ) -> Result<BankHandle, BankError> {
        if self
            .banks
            .borrow()
            .values()
            .any(|b| b.borrow().name() == name)
        {
            return Err(BankError::DuplicateBank(name.to_string()));
        }

        let configuration = BankConfiguration::new(
            CreditConfig::new(credit_commission, credit_limit)?,
            DebitConfig::new(debit_percent),
            DepositConfig::new(deposit_brackets, deposit_term_days)?,
            dubious_client_limit,
        );
        let bank = Bank::new(name, Rc::clone(&self.clock) as ClockHandle, configuration)?;
        let bank_id = bank.id();
        let handle = Rc::new(RefCell::new(bank));
        self.banks.borrow_mut().insert(bank_id, Rc::clone(&handle));
        info!(bank = %bank_id, name, "bank created");
        Ok(handle)
    }

    /// Look up a bank by id.
    pub fn bank(&self, bank_id: BankId) -> Result<BankHandle, BankError> {
        self.banks
            .borrow()
            .get(&bank_id)
            .map(Rc::clone)
            .ok_or(BankError::BankNotFound(bank_id))
    }

    /// Look up a bank by its unique name.
    pub fn bank_by_name(&self, name: &str) -> Result<BankHandle, BankError> {
        self.banks
            .borrow()
            .values()
            .find(|b| b.borrow().name() == name)
            .map(Rc::clone)
            .ok_or_else(|| BankError::BankNameNotFound(name.to_string()))
    }

    /// Open an account in a bank.
    pub fn open_account(
        &self,
        bank_id: BankId,
        account_type: AccountType,
        client: ClientHandle,
        term: Option<Duration>,
    ) -> Result<AccountHandle, BankError> {
        let bank = self.bank(bank_id)?;
        let account = bank.borrow_mut().create_account(account_type, client, term);
        Ok(account)
    }

    /// Replenish an account; returns the issued transaction.
    pub fn replenish_account(
        &self,
        bank_id: BankId,
        account_id: AccountId,
        sum: i64,
    ) -> Result<TransactionHandle, BankError> {
        self.bank(bank_id)?.borrow().income(account_id, sum)
    }

    /// Withdraw from an account; returns the issued transaction.
    pub fn withdraw_money(
        &self,
        bank_id: BankId,
        account_id: AccountId,
        sum: i64,
    ) -> Result<TransactionHandle, BankError> {
        self.bank(bank_id)?.borrow().withdraw(account_id, sum)
    }

    /// Transfer between two accounts, possibly across banks.
    ///
    /// The transaction is recorded on both accounts, failed or not.
    pub fn transfer_money(
        &self,
        from_bank: BankId,
        from_account: AccountId,
        to_bank: BankId,
        to_account: AccountId,
        sum: i64,
    ) -> Result<TransactionHandle, BankError> {
        let from = self.bank(from_bank)?.borrow().account(from_account)?;
        let to = self.bank(to_bank)?.borrow().account(to_account)?;

        let command = Transfer::new(Rc::clone(&to), Rc::clone(&from), sum)?;
        let transaction = BankTransaction::new(Box::new(command)).into_handle();
        transaction.borrow_mut().execute()?;
        to.borrow_mut().save_changes(Rc::clone(&transaction))?;
        from.borrow_mut().save_changes(Rc::clone(&transaction))?;
        info!(
            from = %from_account,
            to = %to_account,
            sum,
            "transfer issued"
        );
        Ok(transaction)
    }

    /// Undo a recorded transaction.
    ///
    /// The outcome lands in the transaction's state; only lookup failures
    /// and state-machine misuse surface as errors.
    pub fn cancel_transaction(
        &self,
        bank_id: BankId,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> Result<(), BankError> {
        let account = self.bank(bank_id)?.borrow().account(account_id)?;
        let transaction = account.borrow().transaction(transaction_id)?;
        transaction.borrow_mut().undo()?;
        Ok(())
    }
}
