//! Transaction model
//!
//! Represents a single balance-affecting event in an account's history.
//! The amount is always stored as a positive magnitude; the direction is
//! implied by the transaction type.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Format used for transaction timestamps in snapshots and display
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of balance movement a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money paid into the account
    Deposit,
    /// Money taken out of the account
    Withdraw,
    /// Outgoing leg of a transfer
    TransferOut,
    /// Incoming leg of a transfer
    TransferIn,
}

impl TransactionType {
    /// Returns true if this type increases the balance
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// The name used in snapshot files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::TransferOut => "TRANSFER_OUT",
            Self::TransferIn => "TRANSFER_IN",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the ledger committed the operation (local time, second precision)
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    /// Kind of movement
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive magnitude of the movement
    pub amount: Money,

    /// Free-text annotation
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Create a transaction stamped with the current local time
    pub fn new(kind: TransactionType, amount: Money, note: impl Into<String>) -> Self {
        Self::at(Local::now().naive_local().trunc_subsecs(0), kind, amount, note)
    }

    /// Create a transaction with an explicit timestamp
    pub fn at(
        timestamp: NaiveDateTime,
        kind: TransactionType,
        amount: Money,
        note: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            amount,
            note: note.into(),
        }
    }

    /// Amount with the sign implied by the type
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Timestamp rendered in the snapshot format
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", s, e)))
    }
}
