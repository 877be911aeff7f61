//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::BankbookResult;
use crate::ledger::Ledger;
use crate::services::AccountService;
use crate::storage::Storage;

use super::parse_amount;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Account ID (must be unique)
        account_id: String,
        /// Account holder's name
        holder_name: String,
        /// Initial deposit (e.g., "100.00" or "100")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        initial: String,
    },
    /// List all accounts with balances
    List,
    /// Show account details
    Show {
        /// Account ID
        account_id: String,
    },
    /// Print an account's balance
    Balance {
        /// Account ID
        account_id: String,
    },
}

impl AccountCommands {
    /// Whether the command changes the ledger
    pub fn mutates(&self) -> bool {
        matches!(self, Self::Create { .. })
    }
}

/// Handle an account command
pub fn handle_account_command(
    ledger: &Ledger,
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> BankbookResult<()> {
    let service = AccountService::new(ledger, storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            account_id,
            holder_name,
            initial,
        } => {
            let initial_deposit = parse_amount(&initial)?;
            let account = service.create(&account_id, &holder_name, initial_deposit)?;

            println!("Created account: {}", account.account_id);
            println!("  Holder:  {}", account.holder_name);
            println!("  Balance: {}", account.balance.format_with_symbol(symbol));
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            print!("{}", format_account_list(&accounts, symbol));
        }

        AccountCommands::Show { account_id } => {
            let account = service.get(&account_id)?;
            print!("{}", format_account_details(&account, symbol));
        }

        AccountCommands::Balance { account_id } => {
            let account = service.get(&account_id)?;
            println!("{}", account.balance.format_with_symbol(symbol));
        }
    }

    Ok(())
}
