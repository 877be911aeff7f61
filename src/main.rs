use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bankbook::cli::{
    handle_account_command, handle_audit_command, handle_deposit_command, handle_export_command,
    handle_history_command, handle_load_command, handle_save_command, handle_transfer_command,
    handle_verify_command, handle_withdraw_command, AccountCommands, ExportCommands,
};
use bankbook::config::{paths::BankbookPaths, settings::Settings};
use bankbook::ledger::Ledger;
use bankbook::storage::{json_file_valid, Storage};

#[derive(Parser)]
#[command(
    name = "bankbook",
    version,
    about = "Single-user account ledger",
    long_about = "Bankbook keeps a set of accounts with deposits, withdrawals and \
                  transfers, an append-only history per account and a JSON snapshot \
                  on disk."
)]
struct Cli {
    /// Snapshot file to use instead of the default location
    #[arg(long, global = true, env = "BANKBOOK_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Pay money into an account
    Deposit {
        /// Account ID
        account_id: String,
        /// Amount (e.g., "50.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Note stored with the transaction
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Take money out of an account
    Withdraw {
        /// Account ID
        account_id: String,
        /// Amount (e.g., "50.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Note stored with the transaction
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Move money between two accounts
    Transfer {
        /// Source account ID
        from: String,
        /// Destination account ID
        to: String,
        /// Amount (e.g., "50.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Note appended to both transfer entries
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Show an account's transaction history, newest first
    History {
        /// Account ID
        account_id: String,
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show the whole history
        #[arg(short, long, conflicts_with = "limit")]
        all: bool,
    },

    /// Write the ledger snapshot now
    Save {
        /// Write to this file instead of the data file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all accounts with the contents of a snapshot file
    Load {
        /// Snapshot file to read
        source: PathBuf,
    },

    /// Check every stored balance against its history
    Verify,

    /// Export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write default settings and an empty ledger if none exist
    Init,

    /// Show current configuration and paths
    Config,
}

impl Commands {
    /// Whether the command changes the ledger and so triggers autosave
    fn mutates(&self) -> bool {
        match self {
            Commands::Account(cmd) => cmd.mutates(),
            Commands::Deposit { .. }
            | Commands::Withdraw { .. }
            | Commands::Transfer { .. }
            | Commands::Load { .. } => true,
            _ => false,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BankbookPaths::new()?;
    let settings = Settings::load(&paths)?;

    // Initialize storage
    let storage = match cli.data_file {
        Some(data_file) => Storage::with_data_file(paths.clone(), &settings, data_file)?,
        None => Storage::new(paths.clone(), &settings)?,
    };

    let Some(command) = cli.command else {
        println!("Bankbook - single-user account ledger");
        println!();
        println!("Run 'bankbook --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing Bankbook at: {}", paths.base_dir().display());
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            if !storage.snapshot().exists() {
                storage.save_ledger(&Ledger::new())?;
            }
            println!("Settings:  {}", paths.settings_file().display());
            println!("Data file: {}", storage.data_file().display());
            return Ok(());
        }
        Commands::Config => {
            println!("Bankbook Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Data file:      {}", storage.data_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!(
                "Data file state: {}",
                if !storage.snapshot().exists() {
                    "not created yet"
                } else if json_file_valid(storage.data_file()) {
                    "valid JSON"
                } else {
                    "unreadable"
                }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Balance policy:  {}", settings.balance_policy);
            println!("  Autosave:        {}", settings.autosave);
            println!("  Audit log:       {}", settings.audit_enabled);
            println!("  History limit:   {}", settings.history_limit);
            return Ok(());
        }
        _ => {}
    }

    let ledger = storage.load_ledger()?;
    let mutates = command.mutates();

    match command {
        Commands::Account(cmd) => handle_account_command(&ledger, &storage, &settings, cmd)?,
        Commands::Deposit {
            account_id,
            amount,
            note,
        } => handle_deposit_command(&ledger, &storage, &settings, &account_id, &amount, &note)?,
        Commands::Withdraw {
            account_id,
            amount,
            note,
        } => handle_withdraw_command(&ledger, &storage, &settings, &account_id, &amount, &note)?,
        Commands::Transfer {
            from,
            to,
            amount,
            note,
        } => handle_transfer_command(&ledger, &storage, &settings, &from, &to, &amount, &note)?,
        Commands::History {
            account_id,
            limit,
            all,
        } => handle_history_command(&ledger, &storage, &settings, &account_id, limit, all)?,
        Commands::Save { output } => handle_save_command(&ledger, &storage, output.as_deref())?,
        Commands::Load { source } => handle_load_command(&ledger, &storage, &source)?,
        Commands::Verify => handle_verify_command(&ledger)?,
        Commands::Export(cmd) => handle_export_command(&ledger, cmd)?,
        Commands::Audit { limit } => handle_audit_command(&storage, limit)?,
        Commands::Init | Commands::Config => {}
    }

    if mutates && settings.autosave {
        storage.save_ledger(&ledger)?;
    }

    Ok(())
}
