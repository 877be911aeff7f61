//! Bankbook - single-user account ledger
//!
//! This library provides the core of the Bankbook ledger: accounts with
//! deposits, withdrawals and transfers, an append-only history per account,
//! and a JSON snapshot that persists the whole ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, accounts, transactions)
//! - `ledger`: The in-memory ledger engine
//! - `storage`: Snapshot codec and file storage
//! - `audit`: Audit logging system
//! - `services`: Ledger operations with audit logging
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `bankbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use bankbook::ledger::Ledger;
//! use bankbook::models::Money;
//!
//! let ledger = Ledger::new();
//! ledger.create_account("A1", "Alice", Money::from_cents(10000))?;
//! ledger.create_account("A2", "Bob", Money::zero())?;
//! ledger.transfer("A1", "A2", Money::from_cents(2500), "rent")?;
//! bankbook::storage::snapshot::save(&ledger, "bank_data.json")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BankbookError, BankbookResult};
pub use ledger::Ledger;
pub use models::{Account, Money, Transaction, TransactionType};
