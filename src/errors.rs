use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BankError>;

/// Error type that captures every way a banking operation can fail.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("invalid account type `{0}`")]
    InvalidAccountType(String),
    #[error("account {0} not found")]
    AccountNotFound(i64),
    #[error("transaction would overdraw the account")]
    Overdraw,
    #[error("account already has {limit} transactions in this {scope}")]
    TransactionLimit { scope: LimitScope, limit: u32 },
    #[error("new transactions must be from {latest} onward")]
    TransactionSequence { latest: NaiveDate },
    #[error("account has no transactions to assess")]
    NoTransactions,
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Which transaction-count cap was hit on a savings account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    Day,
    Month,
}

impl fmt::Display for LimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitScope::Day => write!(f, "day"),
            LimitScope::Month => write!(f, "month"),
        }
    }
}
