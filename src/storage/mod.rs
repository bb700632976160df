pub mod sqlite;

use crate::errors::Result;
use crate::ledger::{Account, Bank, Transaction};

/// Abstraction over the relational store holding the bank, its accounts,
/// and their transactions. Each mutating operation is one commit unit: it
/// either durably applies or leaves the store untouched.
pub trait BankStore {
    /// Loads the singleton bank with all accounts and transactions,
    /// creating the bank row on first run. The flag reports whether it was
    /// created.
    fn load_or_create(&mut self) -> Result<(Bank, bool)>;

    /// Total number of accounts in the store. Feeds account-number
    /// generation (count + 1); correct only with a single writer.
    fn account_count(&self) -> Result<i64>;

    fn insert_account(&mut self, account: &Account) -> Result<()>;

    /// Inserts several transactions as a single commit unit (interest plus
    /// fee must land together or not at all).
    fn insert_transactions(&mut self, transactions: &[Transaction]) -> Result<()>;

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        self.insert_transactions(std::slice::from_ref(transaction))
    }
}

pub use sqlite::SqliteStore;
