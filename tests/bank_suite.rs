use chrono::NaiveDate;
use rust_decimal::Decimal;

use minibank::core::BankManager;
use minibank::errors::{BankError, LimitScope};
use minibank::ledger::AccountKind;
use minibank::storage::SqliteStore;

fn manager() -> BankManager {
    let store = SqliteStore::open_in_memory().unwrap();
    BankManager::open(Box::new(store)).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dollars(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

#[test]
fn account_numbers_are_dense_and_one_based() {
    let mut manager = manager();
    let first = manager.open_account("savings").unwrap().number();
    let second = manager.open_account("checking").unwrap().number();
    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[test]
fn unknown_account_type_is_rejected() {
    let mut manager = manager();
    let err = manager.open_account("money market").unwrap_err();
    assert!(matches!(err, BankError::InvalidAccountType(_)));
    assert!(manager.account_summaries().is_empty());
}

#[test]
fn missing_account_is_an_explicit_error() {
    let mut manager = manager();
    assert!(manager.account(42).is_none());
    let err = manager
        .add_transaction(42, dollars(10), date(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, BankError::AccountNotFound(42)));
}

#[test]
fn savings_end_to_end_scenario() {
    let mut manager = manager();
    let number = manager.open_account("savings").unwrap().number();
    assert_eq!(number, 1);

    manager
        .add_transaction(number, dollars(100), date(2024, 1, 5))
        .unwrap();
    manager
        .add_transaction(number, dollars(-50), date(2024, 1, 6))
        .unwrap();
    assert_eq!(manager.account(number).unwrap().balance(), dollars(50));

    // a second transaction on 2024-01-06 is fine, a third hits the daily cap
    manager
        .add_transaction(number, dollars(5), date(2024, 1, 6))
        .unwrap();
    let err = manager
        .add_transaction(number, dollars(5), date(2024, 1, 6))
        .unwrap_err();
    assert!(matches!(
        err,
        BankError::TransactionLimit {
            scope: LimitScope::Day,
            limit: 2
        }
    ));
}

#[test]
fn checking_assessment_adds_interest_and_fee() {
    let mut manager = manager();
    let number = manager.open_account("checking").unwrap().number();
    manager
        .add_transaction(number, dollars(40), date(2024, 1, 10))
        .unwrap();
    manager.assess_interest_and_fees(number).unwrap();

    let account = manager.account(number).unwrap();
    let listing = account.transactions();
    assert_eq!(listing.len(), 3);
    assert_eq!(listing[1].amount, Decimal::new(32, 3));
    assert_eq!(listing[2].amount, Decimal::new(-544, 2));
    assert_eq!(listing[1].date, date(2024, 1, 31));
    assert_eq!(listing[2].date, date(2024, 1, 31));
    assert_eq!(account.balance(), Decimal::new(34592, 3));

    let err = manager.assess_interest_and_fees(number).unwrap_err();
    assert!(matches!(err, BankError::TransactionSequence { .. }));
}

#[test]
fn summaries_render_in_insertion_order() {
    let mut manager = manager();
    manager.open_account("savings").unwrap();
    manager.open_account("checking").unwrap();
    manager
        .add_transaction(1, dollars(50), date(2024, 1, 5))
        .unwrap();

    let summaries = manager.account_summaries();
    assert_eq!(
        summaries,
        vec![
            "Savings#000000001,\tbalance: $50.00".to_string(),
            "Checking#000000002,\tbalance: $0.00".to_string(),
        ]
    );

    let numbers: Vec<i64> = manager.bank().accounts().iter().map(|a| a.number()).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn kinds_drive_variant_behavior() {
    let mut manager = manager();
    let savings = manager.open_account("savings").unwrap();
    assert_eq!(savings.kind(), AccountKind::Savings);
    assert_eq!(savings.interest_rate(), Decimal::new(41, 4));

    let checking = manager.open_account("checking").unwrap();
    assert_eq!(checking.kind(), AccountKind::Checking);
    assert_eq!(checking.interest_rate(), Decimal::new(8, 4));
}
