//! Account model
//!
//! An account is a named holder of a balance plus the append-only history of
//! every transaction that moved it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::transaction::Transaction;

/// A ledger account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, trimmed identifier
    pub account_id: String,

    /// Display name of the account holder
    pub holder_name: String,

    /// Current balance
    #[serde(default)]
    pub balance: Money,

    /// Transactions in commit order
    #[serde(default)]
    pub history: Vec<Transaction>,
}

impl Account {
    /// Create a new account with a zero balance and no history
    pub fn new(account_id: impl Into<String>, holder_name: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            holder_name: holder_name.into(),
            balance: Money::zero(),
            history: Vec::new(),
        }
    }

    /// Sum of the signed amounts in the history
    ///
    /// Returns `None` if the sum overflows.
    pub fn history_balance(&self) -> Option<Money> {
        self.history
            .iter()
            .try_fold(Money::zero(), |acc, txn| acc.checked_add(txn.signed_amount()))
    }

    /// Whether the stored balance matches the history
    pub fn is_consistent(&self) -> bool {
        self.history_balance() == Some(self.balance)
    }

    /// Append a committed transaction and move the balance accordingly
    ///
    /// Returns the new balance, or `None` without touching the account when
    /// it would leave `±Money::MAX`.
    #[must_use]
    pub(crate) fn post(&mut self, txn: Transaction) -> Option<Money> {
        let balance = self.balance.checked_add(txn.signed_amount())?;
        self.balance = balance;
        self.history.push(txn);
        Some(balance)
    }

    /// Most recent transactions first, limited to `limit` entries
    pub fn recent_history(&self, limit: usize) -> Vec<&Transaction> {
        self.history.iter().rev().take(limit).collect()
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.account_id.trim().is_empty() {
            return Err(AccountValidationError::EmptyId);
        }

        if self.account_id.trim() != self.account_id {
            return Err(AccountValidationError::UntrimmedId(self.account_id.clone()));
        }

        if self.holder_name.trim().is_empty() {
            return Err(AccountValidationError::EmptyHolderName);
        }

        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.balance));
        }

        if !self.balance.in_range() {
            return Err(AccountValidationError::BalanceOutOfRange(self.balance));
        }

        for (index, txn) in self.history.iter().enumerate() {
            if txn.validate().is_err() {
                return Err(AccountValidationError::InvalidTransaction(index));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.account_id, self.holder_name)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyId,
    UntrimmedId(String),
    EmptyHolderName,
    NegativeBalance(Money),
    BalanceOutOfRange(Money),
    InvalidTransaction(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Account ID cannot be empty"),
            Self::UntrimmedId(id) => {
                write!(f, "Account ID has surrounding whitespace: '{}'", id)
            }
            Self::EmptyHolderName => write!(f, "Holder name cannot be empty"),
            Self::NegativeBalance(balance) => write!(f, "Balance is negative: {}", balance),
            Self::BalanceOutOfRange(balance) => {
                write!(f, "Balance exceeds {}: {}", Money::MAX, balance)
            }
            Self::InvalidTransaction(index) => {
                write!(f, "History entry {} has a non-positive amount", index)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
