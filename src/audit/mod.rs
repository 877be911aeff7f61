//! Audit trail for Bankbook
//!
//! Every account opening, balance change and snapshot restore is appended to
//! a JSONL log with before/after states and a readable diff.
//!
//! ```rust,ignore
//! use bankbook::audit::{AuditEntry, AuditLogger, EntityType, Operation};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::new(Operation::Create, EntityType::Account, "A1").named("Alice"))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
