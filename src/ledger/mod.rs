//! The ledger engine
//!
//! `Ledger` is the single authority over account existence and balances.
//! Every operation validates its input completely before touching state,
//! and runs under one write lock, so a failed operation leaves the ledger
//! unchanged and no reader ever sees half of a transfer.

mod report;

pub use report::BalanceIssue;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::error::{BankbookError, BankbookResult};
use crate::models::{Account, Money, Transaction, TransactionType};

/// Note attached to the deposit made when an account opens with funds
pub const INITIAL_DEPOSIT_NOTE: &str = "Initial deposit";

/// A committed entry and its account as of the same write lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub transaction: Transaction,
    /// The account right after `transaction` was appended
    pub account: Account,
}

/// Both legs of a committed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// The TRANSFER_OUT entry appended to the source account
    pub from_transaction: Transaction,
    /// The TRANSFER_IN entry appended to the destination account
    pub to_transaction: Transaction,
    /// Source account right after the transfer
    pub from_account: Account,
    /// Destination account right after the transfer
    pub to_account: Account,
}

/// Accounts in insertion order plus an id index
#[derive(Debug, Default)]
struct LedgerState {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
}

impl LedgerState {
    fn from_accounts(accounts: Vec<Account>) -> BankbookResult<Self> {
        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            account
                .validate()
                .map_err(|e| BankbookError::Validation(format!("{}: {}", account.account_id, e)))?;
            if index.insert(account.account_id.clone(), position).is_some() {
                return Err(duplicate_account(&account.account_id));
            }
        }
        Ok(Self { accounts, index })
    }

    fn position(&self, account_id: &str) -> BankbookResult<usize> {
        let account_id = account_id.trim();
        self.index
            .get(account_id)
            .copied()
            .ok_or_else(|| BankbookError::account_not_found(account_id))
    }
}

/// In-memory store of accounts and their histories
#[derive(Debug, Default)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from existing accounts (e.g. a loaded snapshot)
    ///
    /// Fails with a validation error on duplicate or invalid accounts.
    pub fn from_accounts(accounts: Vec<Account>) -> BankbookResult<Self> {
        Ok(Self {
            state: RwLock::new(LedgerState::from_accounts(accounts)?),
        })
    }

    fn read(&self) -> BankbookResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|e| BankbookError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BankbookResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|e| BankbookError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Open a new account, optionally funding it with an initial deposit
    pub fn create_account(
        &self,
        account_id: &str,
        holder_name: &str,
        initial_deposit: Money,
    ) -> BankbookResult<Account> {
        let account_id = account_id.trim();
        let holder_name = holder_name.trim();

        if account_id.is_empty() {
            return Err(BankbookError::Validation(
                "Account ID cannot be empty.".into(),
            ));
        }
        if holder_name.is_empty() {
            return Err(BankbookError::Validation(
                "Holder name cannot be empty.".into(),
            ));
        }
        if initial_deposit.is_negative() {
            return Err(BankbookError::Validation(
                "Initial deposit cannot be negative.".into(),
            ));
        }

        let mut state = self.write()?;
        if state.index.contains_key(account_id) {
            return Err(duplicate_account(account_id));
        }

        let mut account = Account::new(account_id, holder_name);
        if initial_deposit.is_positive() {
            let txn = Transaction::at(
                now(),
                TransactionType::Deposit,
                initial_deposit,
                INITIAL_DEPOSIT_NOTE,
            );
            commit(&mut account, txn)?;
        }

        let position = state.accounts.len();
        state.index.insert(account.account_id.clone(), position);
        state.accounts.push(account.clone());

        Ok(account)
    }

    /// Look up an account by id
    pub fn get_account(&self, account_id: &str) -> BankbookResult<Account> {
        let state = self.read()?;
        let position = state.position(account_id)?;
        Ok(state.accounts[position].clone())
    }

    /// Check whether an account exists
    pub fn contains(&self, account_id: &str) -> BankbookResult<bool> {
        Ok(self.read()?.index.contains_key(account_id.trim()))
    }

    /// All accounts in creation order
    pub fn list_accounts(&self) -> BankbookResult<Vec<Account>> {
        Ok(self.read()?.accounts.clone())
    }

    /// Number of accounts
    pub fn len(&self) -> BankbookResult<usize> {
        Ok(self.read()?.accounts.len())
    }

    /// Whether the ledger has no accounts
    pub fn is_empty(&self) -> BankbookResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Sum of every account balance
    ///
    /// Fails with a validation error once the sum passes `Money::MAX`.
    pub fn total_balance(&self) -> BankbookResult<Money> {
        let state = self.read()?;
        Money::checked_sum(state.accounts.iter().map(|a| a.balance)).ok_or_else(|| {
            BankbookError::Validation(format!("Total balance exceeds {}.", Money::MAX))
        })
    }

    /// Pay money into an account
    pub fn deposit(&self, account_id: &str, amount: Money, note: &str) -> BankbookResult<Posting> {
        if !amount.is_positive() {
            return Err(BankbookError::Validation(
                "Deposit amount must be positive.".into(),
            ));
        }

        let mut state = self.write()?;
        let position = state.position(account_id)?;
        let txn = Transaction::at(now(), TransactionType::Deposit, amount, note);
        commit(&mut state.accounts[position], txn)
    }

    /// Take money out of an account
    pub fn withdraw(&self, account_id: &str, amount: Money, note: &str) -> BankbookResult<Posting> {
        if !amount.is_positive() {
            return Err(BankbookError::Validation(
                "Withdrawal amount must be positive.".into(),
            ));
        }

        let mut state = self.write()?;
        let position = state.position(account_id)?;
        let account = &mut state.accounts[position];

        if amount > account.balance {
            return Err(BankbookError::Validation("Insufficient funds.".into()));
        }

        let txn = Transaction::at(now(), TransactionType::Withdraw, amount, note);
        commit(account, txn)
    }

    /// Move money between two accounts
    ///
    /// Both accounts are resolved and every check passes before either
    /// balance changes; the two legs are committed under the same lock.
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Money,
        note: &str,
    ) -> BankbookResult<TransferResult> {
        let from_id = from_id.trim();
        let to_id = to_id.trim();

        if from_id == to_id {
            return Err(BankbookError::Validation(
                "Source and destination accounts must differ.".into(),
            ));
        }
        if !amount.is_positive() {
            return Err(BankbookError::Validation(
                "Transfer amount must be positive.".into(),
            ));
        }

        let mut state = self.write()?;
        let from = state.position(from_id)?;
        let to = state.position(to_id)?;

        if amount > state.accounts[from].balance {
            return Err(BankbookError::Validation(
                "Insufficient funds in source account.".into(),
            ));
        }
        if state.accounts[to].balance.checked_add(amount).is_none() {
            return Err(amount_too_large());
        }

        let timestamp = now();
        let from_transaction = Transaction::at(
            timestamp,
            TransactionType::TransferOut,
            amount,
            format!("To {}. {}", to_id, note).trim(),
        );
        let to_transaction = Transaction::at(
            timestamp,
            TransactionType::TransferIn,
            amount,
            format!("From {}. {}", from_id, note).trim(),
        );

        // Both legs were checked above, so the destination cannot refuse
        let from_leg = commit(&mut state.accounts[from], from_transaction)?;
        let to_leg = commit(&mut state.accounts[to], to_transaction)?;

        Ok(TransferResult {
            from_transaction: from_leg.transaction,
            to_transaction: to_leg.transaction,
            from_account: from_leg.account,
            to_account: to_leg.account,
        })
    }

    /// Replace the whole account set in one step
    ///
    /// The current accounts are kept if the replacement is invalid.
    pub fn replace_accounts(&self, accounts: Vec<Account>) -> BankbookResult<()> {
        let replacement = LedgerState::from_accounts(accounts)?;
        *self.write()? = replacement;
        Ok(())
    }

    /// Accounts whose stored balance disagrees with their history
    pub fn verify(&self) -> BankbookResult<Vec<BalanceIssue>> {
        Ok(self
            .read()?
            .accounts
            .iter()
            .filter_map(BalanceIssue::check)
            .collect())
    }
}

/// Append `transaction` and capture the account as it now stands
fn commit(account: &mut Account, transaction: Transaction) -> BankbookResult<Posting> {
    account
        .post(transaction.clone())
        .ok_or_else(amount_too_large)?;
    Ok(Posting {
        transaction,
        account: account.clone(),
    })
}

fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

fn duplicate_account(account_id: &str) -> BankbookError {
    BankbookError::Validation(format!("Account ID already exists: {}", account_id))
}

fn amount_too_large() -> BankbookError {
    BankbookError::Validation(format!(
        "Amount would take the balance past {}.",
        Money::MAX
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn ledger_with_alice() -> Ledger {
        let ledger = Ledger::new();
        ledger.create_account("A1", "Alice", money("100")).unwrap();
        ledger
    }

    #[test]
    fn test_create_with_initial_deposit() {
        let ledger = Ledger::new();
        let account = ledger.create_account("A1", "Alice", money("100.0")).unwrap();

        assert_eq!(account.balance, money("100"));
        assert_eq!(account.history.len(), 1);
        assert_eq!(account.history[0].kind, TransactionType::Deposit);
        assert_eq!(account.history[0].amount, money("100"));
        assert_eq!(account.history[0].note, "Initial deposit");
        assert_eq!(ledger.get_account("A1").unwrap(), account);
    }

    #[test]
    fn test_create_without_deposit_has_no_history() {
        let ledger = Ledger::new();
        let account = ledger.create_account("A2", "Bob", Money::zero()).unwrap();
        assert_eq!(account.balance, Money::zero());
        assert!(account.history.is_empty());
    }

    #[test]
    fn test_create_trims_input() {
        let ledger = Ledger::new();
        let account = ledger.create_account("  A1 ", " Alice  ", Money::zero()).unwrap();
        assert_eq!(account.account_id, "A1");
        assert_eq!(account.holder_name, "Alice");
        assert!(ledger.contains("A1").unwrap());
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let ledger = Ledger::new();

        let err = ledger.create_account("   ", "Alice", Money::zero()).unwrap_err();
        assert_eq!(err.to_string(), "Account ID cannot be empty.");

        let err = ledger.create_account("A1", "", Money::zero()).unwrap_err();
        assert_eq!(err.to_string(), "Holder name cannot be empty.");

        let err = ledger.create_account("A1", "Alice", money("-1")).unwrap_err();
        assert_eq!(err.to_string(), "Initial deposit cannot be negative.");

        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn test_duplicate_account_leaves_original_untouched() {
        let ledger = ledger_with_alice();
        let before = ledger.get_account("A1").unwrap();

        let err = ledger.create_account(" A1", "Mallory", money("5")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Account ID already exists: A1");

        assert_eq!(ledger.get_account("A1").unwrap(), before);
        assert_eq!(ledger.len().unwrap(), 1);
    }

    #[test]
    fn test_get_missing_account() {
        let ledger = Ledger::new();
        let err = ledger.get_account("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_deposit_then_withdraw() {
        let ledger = ledger_with_alice();
        ledger.deposit("A1", money("50"), "gift").unwrap();
        let posting = ledger.withdraw("A1", money("30"), "bills").unwrap();

        assert_eq!(posting.transaction.kind, TransactionType::Withdraw);
        assert_eq!(posting.transaction.note, "bills");

        let account = ledger.get_account("A1").unwrap();
        assert_eq!(posting.account, account);
        assert_eq!(account.balance, money("120"));
        assert_eq!(account.history.len(), 3);
        assert!(account.is_consistent());
    }

    #[test]
    fn test_deposit_validation() {
        let ledger = ledger_with_alice();

        let err = ledger.deposit("A1", Money::zero(), "").unwrap_err();
        assert_eq!(err.to_string(), "Deposit amount must be positive.");

        let err = ledger.deposit("A1", money("-5"), "").unwrap_err();
        assert!(err.is_validation());

        let err = ledger.deposit("ZZ", money("5"), "").unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(ledger.get_account("A1").unwrap().history.len(), 1);
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let ledger = ledger_with_alice();
        let err = ledger
            .deposit("A1", Money::from_cents(i64::MAX), "")
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.get_account("A1").unwrap().balance, money("100"));
    }

    #[test]
    fn test_deposit_stops_at_max_balance() {
        let ledger = Ledger::new();
        ledger.create_account("A1", "Alice", Money::MAX).unwrap();

        let err = ledger.deposit("A1", Money::from_cents(1), "").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("$10000000000000.00"));

        let account = ledger.get_account("A1").unwrap();
        assert_eq!(account.balance, Money::MAX);
        assert_eq!(account.history.len(), 1);

        let err = ledger
            .create_account("A2", "Bob", Money::from_cents(Money::MAX.cents() + 1))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!ledger.contains("A2").unwrap());
    }

    #[test]
    fn test_deposit_returns_account_as_committed() {
        let ledger = ledger_with_alice();
        let posting = ledger.deposit("A1", money("25"), "gift").unwrap();

        assert_eq!(posting.account.balance, money("125"));
        assert_eq!(posting.account.history.last(), Some(&posting.transaction));
        assert_eq!(posting.account, ledger.get_account("A1").unwrap());
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let ledger = Ledger::new();
        ledger.create_account("A1", "Alice", Money::zero()).unwrap();

        let err = ledger.withdraw("A1", money("1"), "").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Insufficient funds.");

        let account = ledger.get_account("A1").unwrap();
        assert_eq!(account.balance, Money::zero());
        assert!(account.history.is_empty());
    }

    #[test]
    fn test_withdraw_validation() {
        let ledger = ledger_with_alice();
        let err = ledger.withdraw("A1", Money::zero(), "").unwrap_err();
        assert_eq!(err.to_string(), "Withdrawal amount must be positive.");

        let err = ledger.withdraw("B9", money("1"), "").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let ledger = ledger_with_alice();
        ledger.withdraw("A1", money("100"), "").unwrap();
        assert_eq!(ledger.get_account("A1").unwrap().balance, Money::zero());
    }

    #[test]
    fn test_transfer_moves_funds_and_notes_counterparty() {
        let ledger = ledger_with_alice();
        ledger.deposit("A1", money("50"), "gift").unwrap();
        ledger.withdraw("A1", money("30"), "bills").unwrap();
        ledger.create_account("A2", "Bob", Money::zero()).unwrap();

        let result = ledger.transfer("A1", "A2", money("120"), "loan").unwrap();
        assert_eq!(result.from_transaction.note, "To A2. loan");
        assert_eq!(result.to_transaction.note, "From A1. loan");
        assert_eq!(result.from_transaction.kind, TransactionType::TransferOut);
        assert_eq!(result.to_transaction.kind, TransactionType::TransferIn);

        let a1 = ledger.get_account("A1").unwrap();
        let a2 = ledger.get_account("A2").unwrap();
        assert_eq!(a1.balance, Money::zero());
        assert_eq!(a2.balance, money("120"));
        assert_eq!(a1.history.last(), Some(&result.from_transaction));
        assert_eq!(a2.history.last(), Some(&result.to_transaction));
        assert_eq!(result.from_account, a1);
        assert_eq!(result.to_account, a2);
    }

    #[test]
    fn test_transfer_into_full_account_changes_nothing() {
        let ledger = Ledger::new();
        ledger.create_account("A1", "Alice", money("1")).unwrap();
        ledger.create_account("A2", "Bob", Money::MAX).unwrap();
        let before = ledger.list_accounts().unwrap();

        let err = ledger.transfer("A1", "A2", money("0.01"), "").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.list_accounts().unwrap(), before);
    }

    #[test]
    fn test_total_balance_past_max_is_an_error() {
        let ledger = Ledger::new();
        let near_max = Money::from_cents(Money::MAX.cents() - 1);
        ledger.create_account("A1", "Alice", near_max).unwrap();
        ledger.create_account("A2", "Bob", near_max).unwrap();

        let err = ledger.total_balance().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("Total balance exceeds"));

        ledger.withdraw("A2", near_max, "").unwrap();
        assert_eq!(ledger.total_balance().unwrap(), near_max);
    }

    #[test]
    fn test_balances_past_exact_float_range_are_refused() {
        let ledger = Ledger::new();
        for cents in [9_007_199_254_740_993, 5_000_000_000_000_000_000] {
            let err = ledger
                .create_account("A1", "Alice", Money::from_cents(cents))
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn test_transfer_note_is_trimmed_when_empty() {
        let ledger = ledger_with_alice();
        ledger.create_account("A2", "Bob", Money::zero()).unwrap();

        let result = ledger.transfer("A1", "A2", money("1"), "").unwrap();
        assert_eq!(result.from_transaction.note, "To A2.");
        assert_eq!(result.to_transaction.note, "From A1.");
    }

    #[test]
    fn test_transfer_to_same_account() {
        let ledger = ledger_with_alice();
        let err = ledger.transfer("A1", "A1", money("10"), "").unwrap_err();
        assert_eq!(err.to_string(), "Source and destination accounts must differ.");
    }

    #[test]
    fn test_failed_transfer_changes_nothing() {
        let ledger = ledger_with_alice();
        ledger.create_account("A2", "Bob", money("5")).unwrap();
        let before = ledger.list_accounts().unwrap();

        let err = ledger.transfer("A1", "A2", money("100.01"), "").unwrap_err();
        assert_eq!(err.to_string(), "Insufficient funds in source account.");

        let err = ledger.transfer("A1", "A2", Money::zero(), "").unwrap_err();
        assert_eq!(err.to_string(), "Transfer amount must be positive.");

        let err = ledger.transfer("A1", "ghost", money("1"), "").unwrap_err();
        assert!(err.is_not_found());

        let err = ledger.transfer("ghost", "A2", money("1"), "").unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(ledger.list_accounts().unwrap(), before);
    }

    #[test]
    fn test_transfer_preserves_total() {
        let ledger = ledger_with_alice();
        ledger.create_account("A2", "Bob", money("40")).unwrap();
        let total = ledger.total_balance().unwrap();

        ledger.transfer("A1", "A2", money("33.33"), "").unwrap();
        ledger.transfer("A2", "A1", money("10.01"), "").unwrap();

        assert_eq!(ledger.total_balance().unwrap(), total);
        assert!(ledger.verify().unwrap().is_empty());
    }

    #[test]
    fn test_list_accounts_keeps_creation_order() {
        let ledger = Ledger::new();
        for id in ["zeta", "alpha", "mid"] {
            ledger.create_account(id, "Holder", Money::zero()).unwrap();
        }
        let ids: Vec<_> = ledger
            .list_accounts()
            .unwrap()
            .into_iter()
            .map(|a| a.account_id)
            .collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_replace_accounts() {
        let ledger = ledger_with_alice();
        ledger
            .replace_accounts(vec![Account::new("B1", "Bea"), Account::new("B2", "Ben")])
            .unwrap();

        assert!(!ledger.contains("A1").unwrap());
        assert_eq!(ledger.len().unwrap(), 2);
        assert_eq!(ledger.get_account("B2").unwrap().holder_name, "Ben");
    }

    #[test]
    fn test_replace_accounts_rejects_duplicates() {
        let ledger = ledger_with_alice();
        let err = ledger
            .replace_accounts(vec![Account::new("B1", "Bea"), Account::new("B1", "Ben")])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.contains("A1").unwrap());
    }

    #[test]
    fn test_verify_reports_tampered_balance() {
        let mut account = Account::new("A1", "Alice");
        account.balance = money("10");
        let ledger = Ledger::from_accounts(vec![account]).unwrap();

        let issues = ledger.verify().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].account_id, "A1");
        assert_eq!(issues[0].stored, money("10"));
        assert_eq!(issues[0].computed, Some(Money::zero()));
    }

    #[test]
    fn test_concurrent_transfers_conserve_money() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(Ledger::new());
        ledger.create_account("A", "Alice", money("1000")).unwrap();
        ledger.create_account("B", "Bob", money("1000")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    let (from, to) = if i % 2 == 0 { ("A", "B") } else { ("B", "A") };
                    for _ in 0..100 {
                        let _ = ledger.transfer(from, to, Money::from_cents(700), "");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.total_balance().unwrap(), money("2000"));
        for account in ledger.list_accounts().unwrap() {
            assert!(!account.balance.is_negative());
            assert!(account.is_consistent());
        }
    }
}
