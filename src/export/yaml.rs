//! YAML Export functionality
//!
//! Exports the ledger snapshot to YAML for human-readable backup.

use std::io::Write;

use crate::error::{BankbookError, BankbookResult};
use crate::ledger::Ledger;
use crate::storage::Snapshot;

use super::json::EXPORT_SCHEMA_VERSION;

/// Export the ledger snapshot to YAML format
pub fn export_snapshot_yaml<W: Write>(ledger: &Ledger, mut writer: W) -> BankbookResult<()> {
    let snapshot = Snapshot::capture(ledger)?;
    let export_error = |e: std::io::Error| BankbookError::Export(e.to_string());

    writeln!(writer, "# Bankbook Ledger Export").map_err(export_error)?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now()).map_err(export_error)?;
    writeln!(writer, "# App Version: {}", env!("CARGO_PKG_VERSION")).map_err(export_error)?;
    writeln!(writer, "# Schema: {}", EXPORT_SCHEMA_VERSION).map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    serde_yaml::to_writer(writer, &snapshot).map_err(|e| BankbookError::Export(e.to_string()))
}
