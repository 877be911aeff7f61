//! Transaction service
//!
//! Deposits, withdrawals and history queries for a single account.

use crate::error::BankbookResult;
use crate::ledger::{Ledger, Posting};
use crate::models::{Money, Transaction};
use crate::storage::Storage;

use super::posting_entry;

/// Service for single-account transactions
pub struct TransactionService<'a> {
    ledger: &'a Ledger,
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(ledger: &'a Ledger, storage: &'a Storage) -> Self {
        Self { ledger, storage }
    }

    /// Pay money into an account
    pub fn deposit(
        &self,
        account_id: &str,
        amount: Money,
        note: &str,
    ) -> BankbookResult<Transaction> {
        let posting = self.ledger.deposit(account_id, amount, note)?;
        self.audit(posting)
    }

    /// Take money out of an account
    pub fn withdraw(
        &self,
        account_id: &str,
        amount: Money,
        note: &str,
    ) -> BankbookResult<Transaction> {
        let posting = self.ledger.withdraw(account_id, amount, note)?;
        self.audit(posting)
    }

    /// Most recent transactions first
    ///
    /// `None` returns the whole history.
    pub fn history(
        &self,
        account_id: &str,
        limit: Option<usize>,
    ) -> BankbookResult<Vec<Transaction>> {
        let account = self.ledger.get_account(account_id)?;
        let limit = limit.unwrap_or(account.history.len());
        Ok(account.recent_history(limit).into_iter().cloned().collect())
    }

    fn audit(&self, posting: Posting) -> BankbookResult<Transaction> {
        self.storage
            .log_batch(&[posting_entry(&posting.account, &posting.transaction)])?;
        Ok(posting.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BankbookPaths, Settings};
    use crate::models::TransactionType;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Ledger) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        let ledger = Ledger::new();
        ledger
            .create_account("A1", "Alice", Money::from_cents(10000))
            .unwrap();
        (temp_dir, storage, ledger)
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let (_temp_dir, storage, ledger) = setup();
        let service = TransactionService::new(&ledger, &storage);

        service.deposit("A1", Money::from_cents(5000), "gift").unwrap();
        service.withdraw("A1", Money::from_cents(3000), "bills").unwrap();

        assert_eq!(ledger.get_account("A1").unwrap().balance.cents(), 12000);

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1]
            .diff_summary
            .as_deref()
            .unwrap()
            .starts_with("WITHDRAW $30.00"));
    }

    #[test]
    fn test_concurrent_deposits_audit_their_own_state() {
        let (_temp_dir, storage, ledger) = setup();
        let service = TransactionService::new(&ledger, &storage);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        service.deposit("A1", Money::from_cents(1), "").unwrap();
                    }
                });
            }
        });

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 100);

        let mut after: Vec<f64> = Vec::new();
        for entry in &entries {
            let before = entry.before.as_ref().unwrap()["balance"].as_f64().unwrap();
            let balance = entry.after.as_ref().unwrap()["balance"].as_f64().unwrap();
            assert_eq!(Money::from_major_units(balance - before), Some(Money::from_cents(1)));
            after.push(balance);
        }
        after.sort_by(f64::total_cmp);
        after.dedup();
        assert_eq!(after.len(), 100);
        assert_eq!(after.last(), Some(&101.0));
    }

    #[test]
    fn test_failed_withdraw_is_not_audited() {
        let (_temp_dir, storage, ledger) = setup();
        let service = TransactionService::new(&ledger, &storage);

        let err = service
            .withdraw("A1", Money::from_cents(100001), "")
            .unwrap_err();
        assert_eq!(err.to_string(), "Insufficient funds.");
        assert!(storage.audit().unwrap().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let (_temp_dir, storage, ledger) = setup();
        let service = TransactionService::new(&ledger, &storage);
        service.deposit("A1", Money::from_cents(100), "second").unwrap();
        service.withdraw("A1", Money::from_cents(50), "third").unwrap();

        let all = service.history("A1", None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].kind, TransactionType::Withdraw);
        assert_eq!(all[2].note, "Initial deposit");

        let limited = service.history("A1", Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].note, "third");
    }

    #[test]
    fn test_history_unknown_account() {
        let (_temp_dir, storage, ledger) = setup();
        let service = TransactionService::new(&ledger, &storage);
        assert!(service.history("nope", None).unwrap_err().is_not_found());
    }
}
