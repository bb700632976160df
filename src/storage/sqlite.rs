use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::BankStore;
use crate::errors::{BankError, Result};
use crate::ledger::{Account, AccountKind, Bank, Transaction};

/// SQLite-backed store. Amounts are kept as exact decimal text and dates as
/// ISO-8601 text, so nothing round-trips through binary floating point.
/// Mutations run inside a database transaction: committed on success,
/// rolled back when dropped on the error path.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            path: path.to_path_buf(),
        };
        store.setup_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            path: PathBuf::from(":memory:"),
        };
        store.setup_schema()?;
        Ok(store)
    }

    fn setup_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS bank (
                 id INTEGER PRIMARY KEY CHECK (id = 1)
             );
             CREATE TABLE IF NOT EXISTS accounts (
                 account_number INTEGER PRIMARY KEY,
                 kind TEXT NOT NULL,
                 interest_rate TEXT NOT NULL,
                 bank_id INTEGER NOT NULL REFERENCES bank (id)
             );
             CREATE TABLE IF NOT EXISTS transactions (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 account_number INTEGER NOT NULL REFERENCES accounts (account_number),
                 amount TEXT NOT NULL,
                 date TEXT NOT NULL,
                 exempt INTEGER NOT NULL DEFAULT 0
             );",
        )?;
        Ok(())
    }

    fn load_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_number, kind, interest_rate
             FROM accounts
             ORDER BY account_number",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);

        let mut accounts = Vec::with_capacity(rows.len());
        for (number, kind, rate) in rows {
            let kind = AccountKind::from_str(&kind)
                .map_err(|_| BankError::Persistence(format!("unknown account kind `{kind}`")))?;
            let rate = parse_decimal(&rate)?;
            let transactions = self.load_transactions(number)?;
            accounts.push(Account::from_parts(number, kind, rate, transactions));
        }
        Ok(accounts)
    }

    /// Transactions in insertion (rowid) order, so the account's in-memory
    /// ordering survives a reload.
    fn load_transactions(&self, account_number: i64) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT amount, date, exempt
             FROM transactions
             WHERE account_number = ?1
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![account_number], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(amount, date, exempt)| {
                Ok(Transaction::new(
                    parse_decimal(&amount)?,
                    parse_date(&date)?,
                    exempt,
                    account_number,
                ))
            })
            .collect()
    }

    fn log_commit(&self) {
        tracing::debug!("saved to {}", self.path.display());
    }
}

impl BankStore for SqliteStore {
    fn load_or_create(&mut self) -> Result<(Bank, bool)> {
        let existing: Option<i64> = self
            .conn
            .query_row("SELECT id FROM bank", [], |row| row.get(0))
            .optional()?;
        if existing.is_none() {
            let tx = self.conn.transaction()?;
            tx.execute("INSERT INTO bank (id) VALUES (1)", [])?;
            tx.commit()?;
            self.log_commit();
            return Ok((Bank::new(), true));
        }

        let mut bank = Bank::new();
        for account in self.load_accounts()? {
            bank.adopt(account);
        }
        Ok((bank, false))
    }

    fn account_count(&self) -> Result<i64> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        Ok(count)
    }

    fn insert_account(&mut self, account: &Account) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO accounts (account_number, kind, interest_rate, bank_id)
             VALUES (?1, ?2, ?3, 1)",
            params![
                account.number(),
                account.kind().as_str(),
                account.interest_rate().to_string()
            ],
        )?;
        tx.commit()?;
        self.log_commit();
        Ok(())
    }

    fn insert_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for transaction in transactions {
            tx.execute(
                "INSERT INTO transactions (account_number, amount, date, exempt)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    transaction.account_number,
                    transaction.amount.to_string(),
                    transaction.date.to_string(),
                    transaction.exempt
                ],
            )?;
        }
        tx.commit()?;
        self.log_commit();
        Ok(())
    }
}

fn parse_decimal(text: &str) -> Result<Decimal> {
    Decimal::from_str(text)
        .map_err(|e| BankError::Persistence(format!("bad decimal `{text}`: {e}")))
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| BankError::Persistence(format!("bad date `{text}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_open_creates_the_bank_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let (bank, created) = store.load_or_create().unwrap();
        assert!(created);
        assert!(bank.accounts().is_empty());

        let (_, created_again) = store.load_or_create().unwrap();
        assert!(!created_again);
    }

    #[test]
    fn inserted_accounts_are_counted() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.load_or_create().unwrap();
        assert_eq!(store.account_count().unwrap(), 0);

        store
            .insert_account(&Account::new(1, AccountKind::Savings))
            .unwrap();
        store
            .insert_account(&Account::new(2, AccountKind::Checking))
            .unwrap();
        assert_eq!(store.account_count().unwrap(), 2);
    }

    #[test]
    fn transactions_round_trip_exactly() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.load_or_create().unwrap();
        store
            .insert_account(&Account::new(1, AccountKind::Checking))
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let interest = Transaction::new(Decimal::new(32, 3), date, true, 1);
        let fee = Transaction::new(Decimal::new(-544, 2), date, true, 1);
        store.insert_transactions(&[interest, fee]).unwrap();

        let (bank, _) = store.load_or_create().unwrap();
        let account = bank.account(1).unwrap();
        let listing = account.transactions();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].amount, Decimal::new(32, 3));
        assert!(listing[0].is_exempt());
        assert_eq!(listing[1].amount, Decimal::new(-544, 2));
        assert_eq!(listing[1].date, date);
    }
}
