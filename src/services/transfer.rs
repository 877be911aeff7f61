//! Transfer service
//!
//! Moves money between two accounts. The ledger commits both legs at once;
//! both audit entries are then written in one batch.

use crate::error::BankbookResult;
use crate::ledger::{Ledger, TransferResult};
use crate::models::Money;
use crate::storage::Storage;

use super::posting_entry;

/// Service for managing transfers between accounts
pub struct TransferService<'a> {
    ledger: &'a Ledger,
    storage: &'a Storage,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(ledger: &'a Ledger, storage: &'a Storage) -> Self {
        Self { ledger, storage }
    }

    /// Transfer `amount` from one account to another
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Money,
        note: &str,
    ) -> BankbookResult<TransferResult> {
        let result = self.ledger.transfer(from_id, to_id, amount, note)?;

        self.storage.log_batch(&[
            posting_entry(&result.from_account, &result.from_transaction),
            posting_entry(&result.to_account, &result.to_transaction),
        ])?;

        Ok(result)
    }
}
