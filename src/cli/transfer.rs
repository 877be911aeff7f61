//! CLI command handler for account transfers

use crate::config::Settings;
use crate::error::BankbookResult;
use crate::ledger::Ledger;
use crate::services::TransferService;
use crate::storage::Storage;

use super::parse_amount;

/// Handle the transfer command
pub fn handle_transfer_command(
    ledger: &Ledger,
    storage: &Storage,
    settings: &Settings,
    from: &str,
    to: &str,
    amount: &str,
    note: &str,
) -> BankbookResult<()> {
    let service = TransferService::new(ledger, storage);
    let amount = parse_amount(amount)?;

    let result = service.transfer(from, to, amount, note)?;
    let symbol = settings.currency_symbol.as_str();

    println!(
        "Transferred {} from {} to {}",
        result.from_transaction.amount.format_with_symbol(symbol),
        from.trim(),
        to.trim()
    );
    println!(
        "  {} balance: {}",
        from.trim(),
        ledger.get_account(from)?.balance.format_with_symbol(symbol)
    );
    println!(
        "  {} balance: {}",
        to.trim(),
        ledger.get_account(to)?.balance.format_with_symbol(symbol)
    );

    Ok(())
}
