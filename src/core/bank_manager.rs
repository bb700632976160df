use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{BankError, Result};
use crate::ledger::{Account, AccountKind, Bank, Transaction};
use crate::storage::BankStore;

/// Facade coordinating the in-memory bank with the persistent store; the
/// narrow interface the presentation layers drive.
///
/// Every mutation validates against the domain first, then commits to the
/// store, then updates memory — a rejected operation leaves no row behind.
/// Account numbers are assigned as store count + 1, which is only correct
/// with a single writer and a single bank row (all this application runs).
pub struct BankManager {
    bank: Bank,
    store: Box<dyn BankStore>,
}

impl BankManager {
    /// Loads the bank from the store, creating the singleton row on first
    /// run.
    pub fn open(mut store: Box<dyn BankStore>) -> Result<Self> {
        let (bank, created) = store.load_or_create()?;
        if created {
            tracing::debug!("created a new bank");
        } else {
            tracing::debug!("loaded existing bank");
        }
        Ok(Self { bank, store })
    }

    /// Opens a `"savings"` or `"checking"` account; anything else is an
    /// invalid-type error.
    pub fn open_account(&mut self, kind: &str) -> Result<&Account> {
        let kind = AccountKind::from_str(kind)?;
        let number = self.store.account_count()? + 1;
        let account = Account::new(number, kind);
        self.store.insert_account(&account)?;
        tracing::debug!("created account: {}", number);
        self.bank.adopt(account);
        Ok(self
            .bank
            .account(number)
            .expect("account was just adopted"))
    }

    pub fn account(&self, number: i64) -> Option<&Account> {
        self.bank.account(number)
    }

    /// Adds a regular (non-exempt) transaction to an account.
    pub fn add_transaction(&mut self, number: i64, amount: Decimal, date: NaiveDate) -> Result<()> {
        let account = self
            .bank
            .account(number)
            .ok_or(BankError::AccountNotFound(number))?;
        let transaction = account.prepare_transaction(amount, date, false)?;
        self.store.insert_transaction(&transaction)?;
        self.bank
            .account_mut(number)
            .expect("account existed above")
            .record(transaction);
        Ok(())
    }

    /// Applies the monthly interest (and, for checking accounts, the
    /// low-balance fee) to an account. Interest and fee land in one commit.
    pub fn assess_interest_and_fees(&mut self, number: i64) -> Result<()> {
        let account = self
            .bank
            .account(number)
            .ok_or(BankError::AccountNotFound(number))?;
        let assessed = account.prepare_assessment()?;
        self.store.insert_transactions(&assessed)?;
        self.bank
            .account_mut(number)
            .expect("account existed above")
            .apply_assessment(assessed);
        Ok(())
    }

    /// An account's transactions sorted by date.
    pub fn transactions(&self, number: i64) -> Result<Vec<&Transaction>> {
        let account = self
            .bank
            .account(number)
            .ok_or(BankError::AccountNotFound(number))?;
        Ok(account.transactions())
    }

    /// Display strings for every account, insertion order.
    pub fn account_summaries(&self) -> Vec<String> {
        self.bank
            .accounts()
            .iter()
            .map(|account| account.to_string())
            .collect()
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }
}
