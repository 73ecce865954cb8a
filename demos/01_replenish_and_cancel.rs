//! # Scenario 01: Replenish and cancel
//!
//! Creates a bank and a client, replenishes a debit account, then cancels
//! the transaction and shows the audit trail.
//!
//! Run with: `cargo run -p multibank-demos --example 01_replenish_and_cancel`

use anyhow::Result;
use multibank_accounts::AccountType;
use multibank_bank::CentralLedger;
use multibank_clients::ClientBuilder;
use multibank_core::{DepositPercent, Limit, Percent};

fn main() -> Result<()> {
    let clock = multibank_demos::bootstrap();
    let mut ledger = CentralLedger::new(clock);

    println!("=== Scenario 01: Replenish and cancel ===\n");

    let bank = ledger.create_bank(
        "Sberwave",
        Percent::from_points(3)?,
        vec![DepositPercent::open_ended(Percent::from_points(3)?, 0)?],
        100,
        200_000,
        Limit::new(50_000)?,
        90,
    )?;
    let bank_id = bank.borrow().id();
    println!("Bank created: {} ({bank_id})", bank.borrow().name());

    let client = ledger.register_client(
        ClientBuilder::new()
            .name("Artem")
            .surname("Baronov")
            .address("5 Quay Street")
            .passport(12_345),
    )?;
    println!("Client registered: {}", client.borrow());

    let account = ledger.open_account(bank_id, AccountType::Debit, client, None)?;
    let account_id = account.borrow().id();
    println!("Debit account opened: {account_id}\n");

    let transaction = ledger.replenish_account(bank_id, account_id, 10_000)?;
    println!(
        "Replenished 10,000 -> balance {}, {}",
        account.borrow().balance(),
        transaction.borrow().status()
    );

    let transaction_id = transaction.borrow().id();
    ledger.cancel_transaction(bank_id, account_id, transaction_id)?;
    println!(
        "Canceled {transaction_id} -> balance {}, {}",
        account.borrow().balance(),
        transaction.borrow().status()
    );

    println!("\nAudit trail:");
    for recorded in account.borrow().transactions() {
        println!("  {} {}", recorded.borrow().id(), recorded.borrow().status());
    }
    Ok(())
}
