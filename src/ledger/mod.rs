//! The domain core: accounts, their transactions, and the bank that owns
//! them. Everything here is in-memory and synchronous; persistence and
//! presentation live behind the seams in `storage` and `cli`.

pub mod account;
pub mod bank;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use bank::Bank;
pub use transaction::Transaction;
