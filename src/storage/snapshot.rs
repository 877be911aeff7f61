//! Ledger snapshot codec
//!
//! Converts the whole ledger to and from the JSON snapshot document:
//!
//! ```json
//! { "accounts": [ { "account_id": "A1", "holder_name": "Alice", "balance": 100.0,
//!                   "history": [ { "timestamp": "2024-03-01 09:30:00",
//!                                  "type": "DEPOSIT", "amount": 100.0,
//!                                  "note": "Initial deposit" } ] } ] }
//! ```
//!
//! Missing `history` and `balance` default to empty and zero; unknown fields
//! are ignored.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BankbookError, BankbookResult};
use crate::ledger::Ledger;
use crate::models::Account;

use super::file_io::{read_json, write_json_atomic};

/// How stored balances are treated when a snapshot is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalancePolicy {
    /// Use the stored balance verbatim
    #[default]
    Trust,
    /// Rebuild the balance from the history
    Recompute,
    /// Reject snapshots where the two disagree
    Strict,
}

impl std::fmt::Display for BalancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trust => write!(f, "trust"),
            Self::Recompute => write!(f, "recompute"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// The persisted document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Snapshot {
    /// Capture every account under a single read of the ledger
    pub fn capture(ledger: &Ledger) -> BankbookResult<Self> {
        Ok(Self {
            accounts: ledger.list_accounts()?,
        })
    }

    /// Build a ledger, applying the balance policy
    pub fn into_ledger(self, policy: BalancePolicy) -> BankbookResult<Ledger> {
        Ledger::from_accounts(self.into_accounts(policy)?).map_err(into_format_error)
    }

    fn into_accounts(self, policy: BalancePolicy) -> BankbookResult<Vec<Account>> {
        self.accounts
            .into_iter()
            .map(|mut account| {
                match policy {
                    BalancePolicy::Trust => {}
                    BalancePolicy::Recompute => {
                        account.balance = account.history_balance().ok_or_else(|| {
                            BankbookError::Format(format!(
                                "{}: history total overflows",
                                account.account_id
                            ))
                        })?;
                    }
                    BalancePolicy::Strict => {
                        if !account.is_consistent() {
                            return Err(BankbookError::Format(format!(
                                "{}: stored balance {} does not match history",
                                account.account_id, account.balance
                            )));
                        }
                    }
                }
                Ok(account)
            })
            .collect()
    }
}

fn into_format_error(err: BankbookError) -> BankbookError {
    match err {
        BankbookError::Validation(msg) => BankbookError::Format(msg),
        other => other,
    }
}

/// Serialize the ledger to any writer
pub fn write_snapshot<W: Write>(ledger: &Ledger, writer: W) -> BankbookResult<()> {
    let snapshot = Snapshot::capture(ledger)?;
    serde_json::to_writer_pretty(writer, &snapshot)
        .map_err(|e| BankbookError::Io(format!("Failed to write snapshot: {}", e)))
}

/// Deserialize a ledger from any reader
pub fn read_snapshot<R: Read>(reader: R, policy: BalancePolicy) -> BankbookResult<Ledger> {
    let snapshot: Snapshot = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            BankbookError::Io(format!("Failed to read snapshot: {}", e))
        } else {
            BankbookError::Format(e.to_string())
        }
    })?;
    snapshot.into_ledger(policy)
}

/// File-backed snapshot location
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    policy: BalancePolicy,
}

impl SnapshotStore {
    /// Create a store for the given file
    pub fn new(path: PathBuf, policy: BalancePolicy) -> Self {
        Self { path, policy }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Policy applied on load
    pub fn policy(&self) -> BalancePolicy {
        self.policy
    }

    /// Whether a snapshot has been written yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the ledger; a missing file yields an empty ledger
    pub fn load(&self) -> BankbookResult<Ledger> {
        load(&self.path, self.policy)
    }

    /// Replace the accounts of an existing ledger with the stored ones
    pub fn load_into(&self, ledger: &Ledger) -> BankbookResult<()> {
        let loaded = self.load()?;
        ledger
            .replace_accounts(loaded.list_accounts()?)
            .map_err(into_format_error)
    }

    /// Write the ledger to the snapshot file
    pub fn save(&self, ledger: &Ledger) -> BankbookResult<()> {
        save(ledger, &self.path)
    }
}

/// Write the ledger to `path`, replacing the file atomically
pub fn save(ledger: &Ledger, path: impl AsRef<Path>) -> BankbookResult<()> {
    let snapshot = Snapshot::capture(ledger)?;
    write_json_atomic(path, &snapshot).map_err(|e| match e {
        BankbookError::Json(msg) => BankbookError::Io(msg),
        other => other,
    })
}

/// Load a ledger from `path`; a missing file yields an empty ledger
pub fn load(path: impl AsRef<Path>, policy: BalancePolicy) -> BankbookResult<Ledger> {
    let snapshot: Snapshot = read_json(path)?;
    snapshot.into_ledger(policy)
}
