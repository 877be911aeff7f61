//! CLI command handlers for deposits, withdrawals and history

use crate::config::Settings;
use crate::display::transaction::format_transaction_register;
use crate::error::BankbookResult;
use crate::ledger::Ledger;
use crate::services::TransactionService;
use crate::storage::Storage;

use super::parse_amount;

/// Handle the deposit command
pub fn handle_deposit_command(
    ledger: &Ledger,
    storage: &Storage,
    settings: &Settings,
    account_id: &str,
    amount: &str,
    note: &str,
) -> BankbookResult<()> {
    let service = TransactionService::new(ledger, storage);
    let amount = parse_amount(amount)?;

    let txn = service.deposit(account_id, amount, note)?;
    let balance = ledger.get_account(account_id)?.balance;

    println!(
        "Deposited {} into {}",
        txn.amount.format_with_symbol(&settings.currency_symbol),
        account_id.trim()
    );
    println!(
        "  New balance: {}",
        balance.format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}

/// Handle the withdraw command
pub fn handle_withdraw_command(
    ledger: &Ledger,
    storage: &Storage,
    settings: &Settings,
    account_id: &str,
    amount: &str,
    note: &str,
) -> BankbookResult<()> {
    let service = TransactionService::new(ledger, storage);
    let amount = parse_amount(amount)?;

    let txn = service.withdraw(account_id, amount, note)?;
    let balance = ledger.get_account(account_id)?.balance;

    println!(
        "Withdrew {} from {}",
        txn.amount.format_with_symbol(&settings.currency_symbol),
        account_id.trim()
    );
    println!(
        "  New balance: {}",
        balance.format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}

/// Handle the history command
///
/// Shows the newest entries first; `limit` falls back to the configured
/// history limit, `all` shows everything.
pub fn handle_history_command(
    ledger: &Ledger,
    storage: &Storage,
    settings: &Settings,
    account_id: &str,
    limit: Option<usize>,
    all: bool,
) -> BankbookResult<()> {
    let service = TransactionService::new(ledger, storage);
    let limit = if all {
        None
    } else {
        Some(limit.unwrap_or(settings.history_limit))
    };

    let history = service.history(account_id, limit)?;
    print!(
        "{}",
        format_transaction_register(&history, &settings.currency_symbol)
    );

    Ok(())
}
