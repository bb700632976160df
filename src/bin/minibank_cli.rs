use std::io;
use std::process::ExitCode;

use minibank::cli::{output, Shell};
use minibank::config::Config;
use minibank::core::BankManager;
use minibank::errors::Result;
use minibank::storage::SqliteStore;

fn main() -> ExitCode {
    minibank::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("fatal: {}", err);
            eprintln!(
                "{}",
                output::error_text(
                    "Sorry! Something unexpected happened. Check the logs or contact the developer for assistance."
                )
            );
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    let db_path = config.database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(&db_path)?;
    let manager = BankManager::open(Box::new(store))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(manager, stdin.lock(), stdout.lock());
    shell.run()
}
