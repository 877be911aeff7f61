//! Machine-readable ledger export
//!
//! The top-level `accounts` array has the snapshot shape, so an export file
//! can be passed straight to `bankbook load`.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BankbookError, BankbookResult};
use crate::ledger::Ledger;
use crate::models::{Account, Money, TIMESTAMP_FORMAT};

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    #[serde(flatten)]
    pub header: ExportHeader,
    pub accounts: Vec<Account>,
    pub summary: LedgerSummary,
}

/// Who wrote the file and when
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportHeader {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub generator: String,
}

/// Totals over every account, for a reader that skips the histories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub accounts: usize,
    pub transactions: usize,
    /// `null` when the sum passes `Money::MAX`
    pub total_balance: Option<Money>,
    /// Timestamp of the oldest transaction, in snapshot format
    pub first_activity: Option<String>,
    pub last_activity: Option<String>,
}

impl LedgerSummary {
    fn of(accounts: &[Account]) -> Self {
        let mut summary = Self {
            accounts: accounts.len(),
            total_balance: Money::checked_sum(accounts.iter().map(|a| a.balance)),
            ..Self::default()
        };
        let mut range = None;

        for account in accounts {
            summary.transactions += account.history.len();
            for txn in &account.history {
                let (first, last) = range.get_or_insert((txn.timestamp, txn.timestamp));
                *first = txn.timestamp.min(*first);
                *last = txn.timestamp.max(*last);
            }
        }

        if let Some((first, last)) = range {
            summary.first_activity = Some(first.format(TIMESTAMP_FORMAT).to_string());
            summary.last_activity = Some(last.format(TIMESTAMP_FORMAT).to_string());
        }
        summary
    }
}

impl LedgerExport {
    pub fn from_ledger(ledger: &Ledger) -> BankbookResult<Self> {
        let accounts = ledger.list_accounts()?;
        Ok(Self {
            header: ExportHeader {
                schema_version: EXPORT_SCHEMA_VERSION.into(),
                generated_at: Utc::now(),
                generator: concat!("bankbook ", env!("CARGO_PKG_VERSION")).into(),
            },
            summary: LedgerSummary::of(&accounts),
            accounts,
        })
    }
}

/// Write the whole ledger as one JSON document
pub fn export_full_json<W: Write>(ledger: &Ledger, writer: W, pretty: bool) -> BankbookResult<()> {
    let export = LedgerExport::from_ledger(ledger)?;
    let written = match pretty {
        true => serde_json::to_writer_pretty(writer, &export),
        false => serde_json::to_writer(writer, &export),
    };
    written.map_err(|e| BankbookError::Export(e.to_string()))
}
