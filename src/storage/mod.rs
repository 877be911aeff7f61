//! Storage layer for Bankbook
//!
//! Provides JSON snapshot storage with atomic writes, automatic directory
//! creation and the audit trail of every change.

pub mod file_io;
pub mod snapshot;

pub use file_io::{json_file_valid, read_json, write_json_atomic};
pub use snapshot::{read_snapshot, write_snapshot, BalancePolicy, Snapshot, SnapshotStore};

use std::path::{Path, PathBuf};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BankbookPaths;
use crate::config::settings::Settings;
use crate::error::BankbookResult;
use crate::ledger::Ledger;

/// Main storage coordinator: the snapshot file plus the audit log
pub struct Storage {
    paths: BankbookPaths,
    snapshot: SnapshotStore,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance using the default snapshot location
    pub fn new(paths: BankbookPaths, settings: &Settings) -> BankbookResult<Self> {
        let snapshot_file = paths.snapshot_file();
        Self::with_data_file(paths, settings, snapshot_file)
    }

    /// Create a Storage instance that reads and writes `data_file`
    pub fn with_data_file(
        paths: BankbookPaths,
        settings: &Settings,
        data_file: PathBuf,
    ) -> BankbookResult<Self> {
        // Ensure directories exist
        paths.ensure_directories()?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            snapshot: SnapshotStore::new(data_file, settings.balance_policy),
            audit,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BankbookPaths {
        &self.paths
    }

    /// Path of the snapshot file in use
    pub fn data_file(&self) -> &Path {
        self.snapshot.path()
    }

    /// The snapshot store
    pub fn snapshot(&self) -> &SnapshotStore {
        &self.snapshot
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load the ledger from the snapshot file
    pub fn load_ledger(&self) -> BankbookResult<Ledger> {
        self.snapshot.load()
    }

    /// Save the ledger to the snapshot file
    pub fn save_ledger(&self, ledger: &Ledger) -> BankbookResult<()> {
        self.snapshot.save(ledger)
    }

    /// Record several entries together; a no-op when auditing is off
    pub fn log_batch(&self, entries: &[AuditEntry]) -> BankbookResult<()> {
        match &self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EntityType, Operation};
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage(settings: &Settings) -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, settings).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage(&Settings::default());

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.data_file(), temp_dir.path().join("data/bank_data.json"));
        assert!(storage.audit().is_some());
    }

    #[test]
    fn test_load_save_cycle() {
        let (_temp_dir, storage) = create_test_storage(&Settings::default());

        let ledger = storage.load_ledger().unwrap();
        assert!(ledger.is_empty().unwrap());

        ledger
            .create_account("A1", "Alice", Money::from_cents(1000))
            .unwrap();
        storage.save_ledger(&ledger).unwrap();

        let reloaded = storage.load_ledger().unwrap();
        assert_eq!(reloaded.list_accounts().unwrap(), ledger.list_accounts().unwrap());
    }

    #[test]
    fn test_custom_data_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankbookPaths::with_base_dir(temp_dir.path().join("base"));
        let data_file = temp_dir.path().join("elsewhere/ledger.json");

        let storage =
            Storage::with_data_file(paths, &Settings::default(), data_file.clone()).unwrap();
        storage.save_ledger(&Ledger::new()).unwrap();

        assert!(data_file.exists());
    }

    #[test]
    fn test_audit_disabled_skips_logging() {
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let (temp_dir, storage) = create_test_storage(&settings);

        storage
            .log_batch(&[AuditEntry::new(Operation::Restore, EntityType::Ledger, "x.json")])
            .unwrap();
        assert!(storage.audit().is_none());
        assert!(!temp_dir.path().join("audit.log").exists());
    }

    #[test]
    fn test_log_batch_writes_to_audit_log() {
        let (temp_dir, storage) = create_test_storage(&Settings::default());

        storage
            .log_batch(&[
                AuditEntry::new(Operation::Create, EntityType::Account, "A1").named("Alice"),
                AuditEntry::new(Operation::Restore, EntityType::Ledger, "bank_data.json"),
            ])
            .unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].entity_type, EntityType::Ledger);
        assert_eq!(storage.audit().unwrap().path(), temp_dir.path().join("audit.log"));
    }
}
