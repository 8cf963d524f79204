/// Configuration for the timetable API client
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Base URL for the GUAP timetable API.
pub const RASP_BASE_URL: &str = "https://api.guap.ru/rasp/v1";

/// Environment variable overriding [`RaspConfig::base_url`].
pub const ENV_BASE_URL: &str = "RASP_BASE_URL";
/// Environment variable overriding [`RaspConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "RASP_TIMEOUT_SECS";

/// Settings for [`RaspClient`](super::RaspClient).
///
/// Every field is optional in a config file; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaspConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Total time allowed for a single request
    pub timeout_secs: u64,
    /// Time allowed to establish the connection
    pub connect_timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for RaspConfig {
    fn default() -> Self {
        Self {
            base_url: RASP_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("guap-rasp/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RaspConfig {
    /// Loads a config from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(RaspConfig)` - Loaded configuration, defaults filled in
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: RaspConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Applies `RASP_BASE_URL` and `RASP_TIMEOUT_SECS` on top of this config.
    pub fn apply_env(self) -> Result<Self, Box<dyn std::error::Error>> {
        self.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_TIMEOUT_SECS).ok(),
        )
    }

    fn apply_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(raw) = timeout_secs {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}"))?;
        }
        Ok(self)
    }

    /// Base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
