//! # Scenario 02: Interest accrual over rewound time
//!
//! Opens a debit and a deposit account, rewinds the clock day by day, and
//! shows the monthly debit capitalization and the deposit payout at
//! maturity.
//!
//! Run with: `cargo run -p multibank-demos --example 02_interest_accrual`

use anyhow::Result;
use multibank_accounts::AccountType;
use multibank_bank::CentralLedger;
use multibank_clients::ClientBuilder;
use multibank_core::{DepositPercent, Limit, Percent};

fn main() -> Result<()> {
    let clock = multibank_demos::bootstrap();
    let mut ledger = CentralLedger::new(clock);

    println!("=== Scenario 02: Interest accrual ===\n");

    let bank = ledger.create_bank(
        "Lighthouse",
        Percent::from_points(3)?,
        vec![
            DepositPercent::new(Percent::from_points(3)?, 0, 100_000)?,
            DepositPercent::open_ended(Percent::from_points(5)?, 100_000)?,
        ],
        100,
        200_000,
        Limit::new(50_000)?,
        90,
    )?;
    let bank_id = bank.borrow().id();

    let client = ledger.register_client(
        ClientBuilder::new()
            .name("Vera")
            .surname("Smolina")
            .address("14 North Pier")
            .passport(77_001),
    )?;

    let debit = ledger.open_account(bank_id, AccountType::Debit, client.clone(), None)?;
    let deposit = ledger.open_account(bank_id, AccountType::Deposit, client, None)?;
    let debit_id = debit.borrow().id();
    let deposit_id = deposit.borrow().id();

    ledger.replenish_account(bank_id, debit_id, 1_000_000)?;
    ledger.replenish_account(bank_id, deposit_id, 150_000)?;
    println!(
        "Funded: debit {} / deposit {}\n",
        debit.borrow().balance(),
        deposit.borrow().balance()
    );

    let mut elapsed: i64 = 0;
    for checkpoint in [31i64, 59, 90] {
        ledger.skip_days(checkpoint - elapsed)?;
        elapsed = checkpoint;
        println!(
            "Day {checkpoint:>2}: debit {} / deposit {}",
            debit.borrow().balance(),
            deposit.borrow().balance()
        );
    }

    println!("\nDeposit matured; withdrawing everything.");
    let balance = deposit.borrow().balance();
    let transaction = ledger.withdraw_money(bank_id, deposit_id, balance)?;
    println!(
        "Withdrawal of {balance}: {} -> deposit {}",
        transaction.borrow().status(),
        deposit.borrow().balance()
    );
    Ok(())
}
