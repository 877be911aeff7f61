//! Export module for Bankbook
//!
//! Provides ledger export in multiple formats:
//! - CSV: account balances and transaction histories (spreadsheet-compatible)
//! - JSON: full machine-readable export, loadable as a snapshot
//! - YAML: human-readable snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_accounts_csv, export_history_csv};
pub use self::json::{export_full_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_snapshot_yaml;
