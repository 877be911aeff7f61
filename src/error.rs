//! Error type shared by the library and the `bankbook` binary

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate
pub type BankbookResult<T> = Result<T, BankbookError>;

/// Everything that can go wrong in Bankbook
///
/// The first four variants are the ledger's own failures. The rest come from
/// the surrounding tool (settings, exports, the audit log).
#[derive(Error, Debug)]
pub enum BankbookError {
    /// A rule was broken; the message is shown to the user as-is
    #[error("{0}")]
    Validation(String),

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The snapshot could not be decoded or broke a consistency rule
    #[error("Invalid snapshot: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Export error: {0}")]
    Export(String),

    /// The ledger lock was poisoned
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BankbookError {
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

impl From<io::Error> for BankbookError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let cases = [
            (BankbookError::Validation("Insufficient funds.".into()), "Insufficient funds."),
            (BankbookError::account_not_found("A9"), "Account not found: A9"),
            (
                BankbookError::Format("missing field `account_id`".into()),
                "Invalid snapshot: missing field `account_id`",
            ),
            (BankbookError::Io("disk full".into()), "I/O error: disk full"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_predicates() {
        assert!(BankbookError::Validation(String::new()).is_validation());
        assert!(BankbookError::account_not_found("A1").is_not_found());
        assert!(BankbookError::Format(String::new()).is_format());
        assert!(!BankbookError::account_not_found("A1").is_validation());
        assert!(!BankbookError::Io(String::new()).is_format());
    }

    #[test]
    fn test_conversions() {
        let err: BankbookError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, BankbookError::Io(ref m) if m == "denied"));

        let err: BankbookError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(matches!(err, BankbookError::Json(_)));
    }
}
