//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Format a list of accounts with balances as a table
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let id_width = accounts
        .iter()
        .map(|a| a.account_id.chars().count())
        .max()
        .unwrap_or(2)
        .max(5);

    let holder_width = accounts
        .iter()
        .map(|a| a.holder_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let separator = format!(
        "{:-<id_width$}  {:-<holder_width$}  {:->14}  {:->6}\n",
        "",
        "",
        "",
        "",
        id_width = id_width,
        holder_width = holder_width,
    );

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<holder_width$}  {:>14}  {:>6}\n",
        "ID",
        "Holder",
        "Balance",
        "Txns",
        id_width = id_width,
        holder_width = holder_width,
    ));
    output.push_str(&separator);

    for account in accounts {
        output.push_str(&format!(
            "{:<id_width$}  {:<holder_width$}  {:>14}  {:>6}\n",
            account.account_id,
            account.holder_name,
            account.balance.format_with_symbol(symbol),
            account.history.len(),
            id_width = id_width,
            holder_width = holder_width,
        ));
    }

    let total = match Money::checked_sum(accounts.iter().map(|a| a.balance)) {
        Some(total) => total.format_with_symbol(symbol),
        None => "overflow".to_string(),
    };
    output.push_str(&separator);
    output.push_str(&format!(
        "{:<id_width$}  {:<holder_width$}  {:>14}\n",
        "TOTAL",
        "",
        total,
        id_width = id_width,
        holder_width = holder_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.account_id));
    output.push_str(&format!("  Holder:         {}\n", account.holder_name));
    output.push_str(&format!(
        "  Balance:        {}\n",
        account.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Transactions:   {}\n", account.history.len()));

    if let Some(last) = account.history.last() {
        output.push_str(&format!(
            "  Last activity:  {} {} {}\n",
            last.formatted_timestamp(),
            last.kind,
            last.amount.format_with_symbol(symbol)
        ));
    }

    if !account.is_consistent() {
        output.push_str("  Warning:        stored balance does not match history\n");
    }

    output
}
