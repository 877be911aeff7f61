//! Append-only JSONL audit log

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BankbookError, BankbookResult};

use super::entry::AuditEntry;

/// Writes and reads the audit log, one JSON object per line
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, entry: &AuditEntry) -> BankbookResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append `entries` in order with one open and one flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> BankbookResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error(e))?;
        let mut out = BufWriter::new(file);

        for entry in entries {
            serde_json::to_writer(&mut out, entry)
                .map_err(|e| BankbookError::Json(format!("audit entry: {}", e)))?;
            out.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }
        out.flush().map_err(|e| self.io_error(e))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> BankbookResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.scan(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BankbookResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count.min(256));
        if count > 0 {
            self.scan(|entry| {
                if window.len() == count {
                    window.pop_front();
                }
                window.push_back(entry);
            })?;
        }
        Ok(window.into())
    }

    fn scan(&self, mut visit: impl FnMut(AuditEntry)) -> BankbookResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.io_error(e)),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                BankbookError::Json(format!(
                    "{} line {}: {}",
                    self.log_path.display(),
                    index + 1,
                    e
                ))
            })?;
            visit(entry);
        }
        Ok(())
    }

    fn io_error(&self, err: io::Error) -> BankbookError {
        BankbookError::Io(format!("audit log {}: {}", self.log_path.display(), err))
    }
}
