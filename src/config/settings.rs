//! User preferences stored in `config.json`
//!
//! Every field has a default, so a partial or empty file is fine.

use serde::{Deserialize, Serialize};

use super::paths::BankbookPaths;
use crate::error::{BankbookError, BankbookResult};
use crate::storage::{read_json, write_json_atomic, BalancePolicy};

const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schema_version: u32,

    /// Prefix for amounts in terminal output
    pub currency_symbol: String,

    /// What to do when a stored balance disagrees with its history on load
    pub balance_policy: BalancePolicy,

    /// Write the snapshot after each successful change
    pub autosave: bool,

    pub audit_enabled: bool,

    /// Rows shown by `history` without `--limit` or `--all`
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_VERSION,
            currency_symbol: "$".into(),
            balance_policy: BalancePolicy::Trust,
            autosave: true,
            audit_enabled: true,
            history_limit: 50,
        }
    }
}

impl Settings {
    /// Read `config.json`, falling back to defaults when it does not exist
    ///
    /// Nothing is written here; `bankbook init` persists the defaults.
    pub fn load(paths: &BankbookPaths) -> BankbookResult<Self> {
        read_json(paths.settings_file()).map_err(|e| match e {
            BankbookError::Format(msg) => BankbookError::Config(msg),
            other => other,
        })
    }

    pub fn save(&self, paths: &BankbookPaths) -> BankbookResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self).map_err(|e| match e {
            BankbookError::Json(msg) => BankbookError::Config(msg),
            other => other,
        })
    }
}
