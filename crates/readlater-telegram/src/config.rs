//! Client configuration.

use readlater_core::defaults::{TELEGRAM_API_URL, TELEGRAM_TIMEOUT_SECS};

/// Configuration for the Bot API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Base URL of the Bot API, without trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            base_url: TELEGRAM_API_URL.to_string(),
            timeout_secs: TELEGRAM_TIMEOUT_SECS,
        }
    }
}

impl TelegramConfig {
    /// Create from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TELEGRAM_API_URL` | `https://api.telegram.org` |
    /// | `TELEGRAM_TIMEOUT_SECS` | `60` |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TELEGRAM_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| TELEGRAM_API_URL.to_string()),
            timeout_secs: std::env::var("TELEGRAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(TELEGRAM_TIMEOUT_SECS),
        }
    }

    /// Override the base URL (used to point the client at a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_api() {
        let config = TelegramConfig::default();
        assert_eq!(config.base_url, "https://api.telegram.org");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_builders_override() {
        let config = TelegramConfig::default()
            .with_base_url("http://127.0.0.1:9000")
            .with_timeout_secs(5);
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, 5);
    }
}
