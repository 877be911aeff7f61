//! Where Bankbook keeps its files
//!
//! The base directory is `$BANKBOOK_DATA_DIR` when set and non-empty,
//! otherwise the platform config directory for `bankbook`
//! (`~/.config/bankbook` on Linux). Beneath it:
//!
//! ```text
//! config.json          settings
//! audit.log            JSONL audit trail
//! data/bank_data.json  ledger snapshot
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{BankbookError, BankbookResult};

pub const DATA_DIR_ENV: &str = "BANKBOOK_DATA_DIR";

pub const SNAPSHOT_FILE_NAME: &str = "bank_data.json";

#[derive(Debug, Clone)]
pub struct BankbookPaths {
    base_dir: PathBuf,
}

impl BankbookPaths {
    /// Resolve the base directory from the environment or the platform
    pub fn new() -> BankbookResult<Self> {
        let from_env = env::var_os(DATA_DIR_ENV).filter(|v| !v.to_string_lossy().trim().is_empty());

        let base_dir = match from_env {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("", "", "bankbook")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    BankbookError::Config(format!(
                        "no home directory found; set {} to choose one",
                        DATA_DIR_ENV
                    ))
                })?,
        };

        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Default snapshot location, overridden by `--data-file`
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join(SNAPSHOT_FILE_NAME)
    }

    /// Create the base and data directories if needed
    pub fn ensure_directories(&self) -> BankbookResult<()> {
        let data_dir = self.data_dir();
        fs::create_dir_all(&data_dir).map_err(|e| {
            BankbookError::Io(format!("cannot create {}: {}", data_dir.display(), e))
        })
    }
}
