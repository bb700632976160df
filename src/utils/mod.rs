use std::sync::Once;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".minibank";
const DB_FILE: &str = "bank.db";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.minibank`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("MINIBANK_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default path of the SQLite database.
pub fn db_file() -> PathBuf {
    app_data_dir().join(DB_FILE)
}

/// Path of the optional configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults. Logs
/// go to stderr so they never mix into the shell's prompt stream.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("minibank=debug".parse().unwrap());

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
