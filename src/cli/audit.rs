//! CLI command handler for viewing the audit log

use crate::error::BankbookResult;
use crate::storage::Storage;

/// Handle the audit command
pub fn handle_audit_command(storage: &Storage, limit: usize) -> BankbookResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }

    Ok(())
}
