//! Account service
//!
//! Opens accounts and answers account queries.

use crate::error::BankbookResult;
use crate::ledger::Ledger;
use crate::models::{Account, Money};
use crate::storage::Storage;

use super::opening_entry;

/// Service for account management
pub struct AccountService<'a> {
    ledger: &'a Ledger,
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(ledger: &'a Ledger, storage: &'a Storage) -> Self {
        Self { ledger, storage }
    }

    /// Open a new account, optionally with an initial deposit
    pub fn create(
        &self,
        account_id: &str,
        holder_name: &str,
        initial_deposit: Money,
    ) -> BankbookResult<Account> {
        let account = self
            .ledger
            .create_account(account_id, holder_name, initial_deposit)?;

        self.storage.log_batch(&[opening_entry(&account)])?;

        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, account_id: &str) -> BankbookResult<Account> {
        self.ledger.get_account(account_id)
    }

    /// Get all accounts in creation order
    pub fn list(&self) -> BankbookResult<Vec<Account>> {
        self.ledger.list_accounts()
    }

    /// Sum of every balance
    pub fn total_balance(&self) -> BankbookResult<Money> {
        self.ledger.total_balance()
    }
}
