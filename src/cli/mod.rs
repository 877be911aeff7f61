//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod audit;
pub mod export;
pub mod snapshot;
pub mod transaction;
pub mod transfer;

pub use account::{handle_account_command, AccountCommands};
pub use audit::handle_audit_command;
pub use export::{handle_export_command, ExportCommands};
pub use snapshot::{handle_load_command, handle_save_command, handle_verify_command};
pub use transaction::{handle_deposit_command, handle_history_command, handle_withdraw_command};
pub use transfer::handle_transfer_command;

use crate::error::{BankbookError, BankbookResult};
use crate::models::Money;

/// Parse a user-supplied amount such as "100", "12.5" or "$1,000.00"
pub(crate) fn parse_amount(amount: &str) -> BankbookResult<Money> {
    Money::parse(amount).map_err(|e| {
        BankbookError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '100.00' or '100'. Error: {}",
            amount, e
        ))
    })
}
