use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use minibank::core::BankManager;
use minibank::errors::BankError;
use minibank::storage::SqliteStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dollars(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

#[test]
fn everything_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("bank.db");

    {
        let store = SqliteStore::open(&db).unwrap();
        let mut manager = BankManager::open(Box::new(store)).unwrap();
        manager.open_account("savings").unwrap();
        manager.open_account("checking").unwrap();
        manager
            .add_transaction(1, Decimal::new(10050, 2), date(2024, 1, 5))
            .unwrap();
        manager
            .add_transaction(2, dollars(40), date(2024, 1, 10))
            .unwrap();
        manager.assess_interest_and_fees(2).unwrap();
    }

    let store = SqliteStore::open(&db).unwrap();
    let manager = BankManager::open(Box::new(store)).unwrap();

    let summaries = manager.account_summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0], "Savings#000000001,\tbalance: $100.50");

    let checking = manager.account(2).unwrap();
    assert_eq!(checking.balance(), Decimal::new(34592, 3));
    let listing = checking.transactions();
    assert_eq!(listing.len(), 3);
    assert!(listing[1].is_exempt());
    assert!(listing[2].is_exempt());

    // the reloaded exempt transactions still block a same-month assessment
    let store = SqliteStore::open(&db).unwrap();
    let mut manager = BankManager::open(Box::new(store)).unwrap();
    let err = manager.assess_interest_and_fees(2).unwrap_err();
    assert!(matches!(err, BankError::TransactionSequence { .. }));
}

#[test]
fn rejected_transactions_leave_no_rows() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("bank.db");

    {
        let store = SqliteStore::open(&db).unwrap();
        let mut manager = BankManager::open(Box::new(store)).unwrap();
        manager.open_account("savings").unwrap();
        manager
            .add_transaction(1, dollars(50), date(2024, 1, 5))
            .unwrap();
        // overdraw, rejected before anything is written
        assert!(manager
            .add_transaction(1, dollars(-60), date(2024, 1, 6))
            .is_err());
    }

    let store = SqliteStore::open(&db).unwrap();
    let manager = BankManager::open(Box::new(store)).unwrap();
    let account = manager.account(1).unwrap();
    assert_eq!(account.transactions().len(), 1);
    assert_eq!(account.balance(), dollars(50));
}

#[test]
fn account_numbering_continues_across_sessions() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("bank.db");

    {
        let store = SqliteStore::open(&db).unwrap();
        let mut manager = BankManager::open(Box::new(store)).unwrap();
        manager.open_account("savings").unwrap();
    }

    let store = SqliteStore::open(&db).unwrap();
    let mut manager = BankManager::open(Box::new(store)).unwrap();
    let number = manager.open_account("checking").unwrap().number();
    assert_eq!(number, 2);
}
