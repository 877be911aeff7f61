//! CSV Export functionality
//!
//! Exports account balances and transaction histories to CSV format.

use std::io::Write;

use serde::Serialize;

use crate::error::{BankbookError, BankbookResult};
use crate::ledger::Ledger;
use crate::models::Account;

#[derive(Serialize)]
struct AccountRow<'a> {
    #[serde(rename = "Account ID")]
    account_id: &'a str,
    #[serde(rename = "Holder")]
    holder_name: &'a str,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Transactions")]
    transactions: usize,
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Account ID")]
    account_id: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Note")]
    note: &'a str,
}

fn export_error(e: csv::Error) -> BankbookError {
    BankbookError::Export(e.to_string())
}

/// Export every account with its balance
///
/// Returns the number of rows written.
pub fn export_accounts_csv<W: Write>(ledger: &Ledger, writer: W) -> BankbookResult<usize> {
    let accounts = ledger.list_accounts()?;
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    for account in &accounts {
        wtr.serialize(AccountRow {
            account_id: &account.account_id,
            holder_name: &account.holder_name,
            balance: account.balance.format_plain(),
            transactions: account.history.len(),
        })
        .map_err(export_error)?;
    }

    wtr.flush()
        .map_err(|e| BankbookError::Export(e.to_string()))?;
    Ok(accounts.len())
}

/// Export transaction histories in commit order
///
/// With `account_id` set only that account is exported. Returns the number
/// of rows written.
pub fn export_history_csv<W: Write>(
    ledger: &Ledger,
    account_id: Option<&str>,
    writer: W,
) -> BankbookResult<usize> {
    let accounts: Vec<Account> = match account_id {
        Some(id) => vec![ledger.get_account(id)?],
        None => ledger.list_accounts()?,
    };

    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    let mut rows = 0;

    for account in &accounts {
        for txn in &account.history {
            wtr.serialize(HistoryRow {
                account_id: &account.account_id,
                timestamp: txn.formatted_timestamp(),
                kind: txn.kind.as_str(),
                amount: txn.amount.format_plain(),
                note: &txn.note,
            })
            .map_err(export_error)?;
            rows += 1;
        }
    }

    wtr.flush()
        .map_err(|e| BankbookError::Export(e.to_string()))?;
    Ok(rows)
}
