//! `bankbook export ...`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{BankbookError, BankbookResult};
use crate::export::{
    export_accounts_csv, export_full_json, export_history_csv, export_snapshot_yaml,
};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    /// Snapshot plus export header and summary
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// One CSV row per account
    Accounts {
        /// Destination file
        output: PathBuf,
    },

    /// One CSV row per transaction
    History {
        /// Destination file
        output: PathBuf,

        /// Restrict to a single account
        #[arg(short, long)]
        account: Option<String>,
    },

    /// The whole ledger as JSON or YAML
    Snapshot {
        /// Destination file
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = SnapshotFormat::Json)]
        format: SnapshotFormat,

        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },
}

pub fn handle_export_command(ledger: &Ledger, cmd: ExportCommands) -> BankbookResult<()> {
    let message = match cmd {
        ExportCommands::Accounts { output } => {
            let count = write_file(&output, |w| export_accounts_csv(ledger, w))?;
            format!("Exported {} accounts to: {}", count, output.display())
        }
        ExportCommands::History { output, account } => {
            let count = write_file(&output, |w| export_history_csv(ledger, account.as_deref(), w))?;
            format!("Exported {} transactions to: {}", count, output.display())
        }
        ExportCommands::Snapshot {
            output,
            format,
            pretty,
        } => {
            write_file(&output, |w| match format {
                SnapshotFormat::Json => export_full_json(ledger, w, pretty),
                SnapshotFormat::Yaml => export_snapshot_yaml(ledger, w),
            })?;
            format!("Ledger exported to: {}", output.display())
        }
    };

    println!("{}", message);
    Ok(())
}

/// Create `path`, hand a buffered writer to `write` and flush it
fn write_file<T>(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> BankbookResult<T>,
) -> BankbookResult<T> {
    let export_error =
        |e: std::io::Error| BankbookError::Export(format!("{}: {}", path.display(), e));

    let mut out = File::create(path).map(BufWriter::new).map_err(export_error)?;
    let value = write(&mut out)?;
    out.flush().map_err(export_error)?;
    Ok(value)
}
