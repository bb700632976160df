pub mod bank_manager;

pub use bank_manager::BankManager;
