//! Runtime configuration from the environment.

use std::path::PathBuf;

use readlater_db::defaults::STORE_PATH;
use readlater_telegram::TelegramConfig;

/// Settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file backing the key-value namespace.
    pub store_path: PathBuf,
    pub telegram: TelegramConfig,
}

impl Config {
    /// Read `READLATER_STORE_PATH` plus the Telegram client variables.
    pub fn from_env() -> Self {
        let store_path = std::env::var("READLATER_STORE_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| STORE_PATH.to_string());

        Self {
            store_path: PathBuf::from(store_path),
            telegram: TelegramConfig::from_env(),
        }
    }

    /// Apply command-line overrides.
    pub fn with_store_path(mut self, store_path: Option<PathBuf>) -> Self {
        if let Some(path) = store_path {
            self.store_path = path;
        }
        self
    }
}
