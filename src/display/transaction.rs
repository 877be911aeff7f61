//! Transaction display formatting
//!
//! Register view of an account history.

use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let amount = if txn.kind.is_credit() {
        format!("+{}", txn.amount.format_with_symbol(symbol))
    } else {
        format!("-{}", txn.amount.format_with_symbol(symbol))
    };

    format!(
        "{:19}  {:12}  {:>14}  {}",
        txn.formatted_timestamp(),
        txn.kind.as_str(),
        amount,
        txn.note
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:19}  {:12}  {:>14}  {}\n",
        "Timestamp", "Type", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for txn in transactions {
        output.push_str(format_transaction_row(txn, symbol).trim_end());
        output.push('\n');
    }

    output
}
