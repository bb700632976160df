use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils;

/// User-adjustable settings, stored as JSON in the application data
/// directory. Absent file or absent fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database file; defaults to `bank.db` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = utils::config_file();
        if path.exists() {
            let data = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(utils::app_data_dir())?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(utils::config_file(), json)?;
        Ok(())
    }

    /// Resolved database path.
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(utils::db_file)
    }
}
