//! CLI commands for saving, loading and checking snapshots

use std::path::Path;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{BankbookError, BankbookResult};
use crate::ledger::Ledger;
use crate::storage::{snapshot, SnapshotStore, Storage};

/// Handle the save command
///
/// Writes to `output` when given, otherwise to the configured data file.
pub fn handle_save_command(
    ledger: &Ledger,
    storage: &Storage,
    output: Option<&Path>,
) -> BankbookResult<()> {
    let destination = output.unwrap_or_else(|| storage.data_file());
    snapshot::save(ledger, destination)?;

    println!(
        "Saved {} accounts to: {}",
        ledger.len()?,
        destination.display()
    );
    Ok(())
}

/// Handle the load command
///
/// Replaces every account with the contents of `source`. The current
/// accounts are kept if `source` cannot be read.
pub fn handle_load_command(
    ledger: &Ledger,
    storage: &Storage,
    source: &Path,
) -> BankbookResult<()> {
    let store = SnapshotStore::new(source.to_path_buf(), storage.snapshot().policy());
    if !store.exists() {
        return Err(BankbookError::Io(format!(
            "Snapshot file not found: {}",
            source.display()
        )));
    }

    store.load_into(ledger)?;
    let count = ledger.len()?;
    storage.log_batch(&[
        AuditEntry::new(Operation::Restore, EntityType::Ledger, source.display().to_string())
            .with_summary(format!("{} accounts loaded", count)),
    ])?;

    println!("Loaded {} accounts from: {}", count, source.display());
    Ok(())
}

/// Handle the verify command
pub fn handle_verify_command(ledger: &Ledger) -> BankbookResult<()> {
    let issues = ledger.verify()?;

    if issues.is_empty() {
        println!(
            "All {} accounts are consistent with their history.",
            ledger.len()?
        );
    } else {
        println!("{} account(s) need attention:", issues.len());
        for issue in &issues {
            println!("  {}", issue);
        }
    }

    Ok(())
}
