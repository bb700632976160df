use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::currency::format_amount;
use crate::errors::{BankError, LimitScope, Result};

const SAVINGS_DAILY_LIMIT: u32 = 2;
const SAVINGS_MONTHLY_LIMIT: u32 = 5;

/// The two account variants. Savings pays high interest but caps how many
/// transactions land on one day or in one month; checking pays low interest
/// and charges a fee when the balance sits under a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    /// Discriminant used in storage and when parsing user input.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Checking => "checking",
        }
    }

    /// Label used in account display strings, e.g. `Savings#000000001`.
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Checking => "Checking",
        }
    }

    pub fn default_interest_rate(&self) -> Decimal {
        match self {
            // 0.41% monthly
            AccountKind::Savings => Decimal::new(41, 4),
            // 0.08% monthly
            AccountKind::Checking => Decimal::new(8, 4),
        }
    }
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountKind::Savings),
            "checking" => Ok(AccountKind::Checking),
            other => Err(BankError::InvalidAccountType(other.to_string())),
        }
    }
}

fn checking_balance_threshold() -> Decimal {
    Decimal::new(100, 0)
}

fn checking_low_balance_fee() -> Decimal {
    Decimal::new(-544, 2)
}

/// One account and the transactions it exclusively owns. Transactions are
/// append-only and kept in insertion order; listings sort by date on the way
/// out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    number: i64,
    kind: AccountKind,
    interest_rate: Decimal,
    transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(number: i64, kind: AccountKind) -> Self {
        Self {
            number,
            kind,
            interest_rate: kind.default_interest_rate(),
            transactions: Vec::new(),
        }
    }

    /// Rebuilds an account from persisted rows. The stored interest rate
    /// wins over the variant default.
    pub fn from_parts(
        number: i64,
        kind: AccountKind,
        interest_rate: Decimal,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            number,
            kind,
            interest_rate,
            transactions,
        }
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Signed sum of every owned transaction; zero for a fresh account.
    pub fn balance(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(Decimal::ZERO, |sum, t| sum + t.amount)
    }

    /// All transactions sorted ascending by date. The sort is stable, so
    /// same-day entries keep insertion order.
    pub fn transactions(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by_key(|t| t.date);
        sorted
    }

    pub fn latest_transaction(&self) -> Option<&Transaction> {
        self.transactions.iter().max_by_key(|t| t.date)
    }

    /// Validates a prospective transaction and hands it back without
    /// recording it. Non-exempt transactions run three checks in fixed
    /// order: overdraw, variant limits, date sequence. Exempt transactions
    /// bypass all three.
    ///
    /// The split from [`Account::record`] lets the caller persist the
    /// transaction between validation and the in-memory append, so a
    /// rejection never leaves a row behind.
    pub fn prepare_transaction(
        &self,
        amount: Decimal,
        date: NaiveDate,
        exempt: bool,
    ) -> Result<Transaction> {
        let transaction = Transaction::new(amount, date, exempt, self.number);
        if !transaction.is_exempt() {
            self.check_balance(&transaction)?;
            self.check_limits(&transaction)?;
            self.check_date(&transaction)?;
        }
        tracing::debug!("created transaction: {}, {}", self.number, amount);
        Ok(transaction)
    }

    /// Appends a transaction admitted by [`Account::prepare_transaction`].
    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Validates and records in one step, for purely in-memory use.
    pub fn add_transaction(&mut self, amount: Decimal, date: NaiveDate, exempt: bool) -> Result<()> {
        let transaction = self.prepare_transaction(amount, date, exempt)?;
        self.record(transaction);
        Ok(())
    }

    fn check_balance(&self, transaction: &Transaction) -> Result<()> {
        if transaction.would_overdraw(self.balance()) {
            return Err(BankError::Overdraw);
        }
        Ok(())
    }

    /// Savings accounts cap non-exempt transactions per day and per month,
    /// counted against existing transactions only; the daily cap is checked
    /// first. Checking accounts impose no count limit.
    fn check_limits(&self, transaction: &Transaction) -> Result<()> {
        let (daily_limit, monthly_limit) = match self.kind {
            AccountKind::Savings => (SAVINGS_DAILY_LIMIT, SAVINGS_MONTHLY_LIMIT),
            AccountKind::Checking => return Ok(()),
        };
        let same_day = self.count_non_exempt(|t| t.in_same_day(transaction));
        if same_day >= daily_limit {
            return Err(BankError::TransactionLimit {
                scope: LimitScope::Day,
                limit: daily_limit,
            });
        }
        let same_month = self.count_non_exempt(|t| t.in_same_month(transaction));
        if same_month >= monthly_limit {
            return Err(BankError::TransactionLimit {
                scope: LimitScope::Month,
                limit: monthly_limit,
            });
        }
        Ok(())
    }

    fn count_non_exempt(&self, matches: impl Fn(&Transaction) -> bool) -> u32 {
        self.transactions
            .iter()
            .filter(|t| !t.is_exempt() && matches(t))
            .count() as u32
    }

    fn check_date(&self, transaction: &Transaction) -> Result<()> {
        if let Some(latest) = self.latest_transaction() {
            if transaction.date < latest.date {
                return Err(BankError::TransactionSequence {
                    latest: latest.date,
                });
            }
        }
        Ok(())
    }

    /// Computes the exempt transactions a monthly assessment would record:
    /// interest of `balance × rate` dated the last day of the latest
    /// transaction's month, plus the checking low-balance fee when the
    /// post-interest balance sits under the threshold.
    ///
    /// Any existing exempt transaction in that same month means interest was
    /// already applied and blocks the assessment; an account with no
    /// transactions has no month to assess.
    pub fn prepare_assessment(&self) -> Result<Vec<Transaction>> {
        let latest = self.latest_transaction().ok_or(BankError::NoTransactions)?;
        if let Some(applied) = self
            .transactions
            .iter()
            .find(|t| t.is_exempt() && t.in_same_month(latest))
        {
            return Err(BankError::TransactionSequence {
                latest: applied.date,
            });
        }
        let assessment_date = latest.last_day_of_month();
        let interest = Transaction::new(
            self.balance() * self.interest_rate,
            assessment_date,
            true,
            self.number,
        );
        let balance_after_interest = self.balance() + interest.amount;
        let mut assessed = vec![interest];
        if self.kind == AccountKind::Checking
            && balance_after_interest < checking_balance_threshold()
        {
            assessed.push(Transaction::new(
                checking_low_balance_fee(),
                assessment_date,
                true,
                self.number,
            ));
        }
        Ok(assessed)
    }

    /// Records the transactions produced by [`Account::prepare_assessment`].
    pub fn apply_assessment(&mut self, assessed: Vec<Transaction>) {
        self.transactions.extend(assessed);
    }

    /// Validates and records the monthly assessment in one step, for purely
    /// in-memory use.
    pub fn assess_interest_and_fees(&mut self) -> Result<()> {
        let assessed = self.prepare_assessment()?;
        self.apply_assessment(assessed);
        Ok(())
    }
}

impl fmt::Display for Account {
    /// Formats as `Savings#000000001,\tbalance: $50.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{:09},\tbalance: ${}",
            self.kind.label(),
            self.number,
            format_amount(self.balance())
        )
    }
}
