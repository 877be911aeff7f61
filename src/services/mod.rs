//! Service layer for Bankbook
//!
//! The service layer runs ledger operations and records each successful
//! change in the audit log through the storage layer.

pub mod account;
pub mod transaction;
pub mod transfer;

pub use account::AccountService;
pub use transaction::TransactionService;
pub use transfer::TransferService;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, EntityType, Operation};
use crate::models::{Account, Money, Transaction};

/// Compact account state recorded in audit entries
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BalanceView {
    pub account_id: String,
    pub holder_name: String,
    pub balance: Money,
    pub transactions: usize,
}

impl BalanceView {
    pub(crate) fn of(account: &Account) -> Self {
        Self {
            account_id: account.account_id.clone(),
            holder_name: account.holder_name.clone(),
            balance: account.balance,
            transactions: account.history.len(),
        }
    }

    /// The state before `txn`, given the state after it was posted
    fn before(&self, txn: &Transaction) -> Option<Self> {
        Some(Self {
            balance: self.balance.checked_sub(txn.signed_amount())?,
            transactions: self.transactions.checked_sub(1)?,
            ..self.clone()
        })
    }
}

/// Build the audit entry for a transaction posted to `account`
///
/// `account` must be the snapshot the ledger returned with `txn`.
pub(crate) fn posting_entry(account: &Account, txn: &Transaction) -> AuditEntry {
    let after = BalanceView::of(account);
    let before = after.before(txn);

    let diff = match (
        before.as_ref().map(serde_json::to_value),
        serde_json::to_value(&after),
    ) {
        (Some(Ok(b)), Ok(a)) => generate_diff(&b, &a),
        _ => None,
    };
    let summary = match diff {
        Some(diff) => format!("{} {}; {}", txn.kind, txn.amount, diff),
        None => format!("{} {}", txn.kind, txn.amount),
    };

    AuditEntry::new(Operation::Update, EntityType::Account, &account.account_id)
        .named(&account.holder_name)
        .with_states(before.as_ref(), Some(&after))
        .with_summary(summary)
}

/// Build the audit entry for a newly opened account
pub(crate) fn opening_entry(account: &Account) -> AuditEntry {
    AuditEntry::new(Operation::Create, EntityType::Account, &account.account_id)
        .named(&account.holder_name)
        .with_states(None::<&BalanceView>, Some(&BalanceView::of(account)))
}
