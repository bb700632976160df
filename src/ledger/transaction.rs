use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::format_amount;

/// A single monetary movement on one account. Immutable after construction;
/// whether it may be applied at all is the owning account's decision, so
/// construction never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub exempt: bool,
    pub account_number: i64,
}

impl Transaction {
    pub fn new(amount: Decimal, date: NaiveDate, exempt: bool, account_number: i64) -> Self {
        Self {
            amount,
            date,
            exempt,
            account_number,
        }
    }

    /// Interest and fee transactions are exempt from account limits.
    pub fn is_exempt(&self) -> bool {
        self.exempt
    }

    pub fn is_deposit(&self) -> bool {
        self.amount >= Decimal::ZERO
    }

    /// Whether applying this transaction would withdraw more than `balance`.
    /// Deposits never overdraw.
    pub fn would_overdraw(&self, balance: Decimal) -> bool {
        !self.is_deposit() && self.amount.abs() > balance
    }

    pub fn in_same_day(&self, other: &Transaction) -> bool {
        self.date == other.date
    }

    pub fn in_same_month(&self, other: &Transaction) -> bool {
        self.date.month() == other.date.month() && self.date.year() == other.date.year()
    }

    /// Last calendar day of this transaction's month. December steps into
    /// January of the following year before backing up one day.
    pub fn last_day_of_month(&self) -> NaiveDate {
        let (year, month) = if self.date.month() == 12 {
            (self.date.year() + 1, 1)
        } else {
            (self.date.year(), self.date.month() + 1)
        };
        let first_of_next_month =
            NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date");
        first_of_next_month
            .pred_opt()
            .expect("first of month has a predecessor")
    }
}

impl fmt::Display for Transaction {
    /// Formats as `2024-01-05, $100.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, ${}", self.date, format_amount(self.amount))
    }
}
