//! Configuration module for Bankbook
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BankbookPaths;
pub use settings::Settings;
