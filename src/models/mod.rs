//! Core data models for Bankbook
//!
//! This module contains the data structures of the ledger domain: money
//! amounts, accounts and their transactions.

pub mod account;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountValidationError};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionType, TransactionValidationError, TIMESTAMP_FORMAT};
