//! Balance/history consistency findings

use std::fmt;

use crate::models::{Account, Money};

/// An account whose stored balance does not match its history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceIssue {
    pub account_id: String,
    /// Balance as stored
    pub stored: Money,
    /// Balance implied by the history; `None` if summing overflowed
    pub computed: Option<Money>,
}

impl BalanceIssue {
    /// Returns an issue if the account is inconsistent
    pub fn check(account: &Account) -> Option<Self> {
        if account.is_consistent() {
            return None;
        }
        Some(Self {
            account_id: account.account_id.clone(),
            stored: account.balance,
            computed: account.history_balance(),
        })
    }
}

impl fmt::Display for BalanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.computed {
            Some(computed) => write!(
                f,
                "{}: stored balance {} but history sums to {}",
                self.account_id, self.stored, computed
            ),
            None => write!(
                f,
                "{}: stored balance {} but history sum overflows",
                self.account_id, self.stored
            ),
        }
    }
}
