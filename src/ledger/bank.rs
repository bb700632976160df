use serde::{Deserialize, Serialize};

use super::account::{Account, AccountKind};

/// The single bank owning every account in the deployment. One row in the
/// store, created at first startup and loaded ever after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bank {
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an account under an already-assigned number and takes
    /// ownership of it. Number generation (store count + 1) lives in the
    /// manager because it consults the store.
    pub fn add_account(&mut self, kind: AccountKind, number: i64) -> &Account {
        self.adopt(Account::new(number, kind));
        self.accounts.last().expect("account was just pushed")
    }

    /// Takes ownership of an account built elsewhere (a fresh one already
    /// persisted, or one rebuilt from storage).
    pub fn adopt(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn account(&self, number: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    pub fn account_mut(&mut self, number: i64) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    /// Every account, insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_number() {
        let mut bank = Bank::new();
        bank.add_account(AccountKind::Savings, 1);
        bank.add_account(AccountKind::Checking, 2);

        assert_eq!(bank.account(1).unwrap().kind(), AccountKind::Savings);
        assert_eq!(bank.account(2).unwrap().kind(), AccountKind::Checking);
        assert!(bank.account(3).is_none());
    }

    #[test]
    fn accounts_keep_insertion_order() {
        let mut bank = Bank::new();
        bank.add_account(AccountKind::Checking, 1);
        bank.add_account(AccountKind::Savings, 2);
        let numbers: Vec<i64> = bank.accounts().iter().map(|a| a.number()).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
