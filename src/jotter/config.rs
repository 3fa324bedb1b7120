use crate::error::{JotterError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "JOTTER_API_URL";

/// Configuration for jotter, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JotterConfig {
    /// Base URL of the note store (without the `/notes` suffix)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Print a line per completed update during a replacement
    #[serde(default = "default_progress")]
    pub progress: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_progress() -> bool {
    true
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            progress: true,
        }
    }
}

impl JotterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: JotterConfig = serde_json::from_str(&content).map_err(|e| {
            JotterError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Applies overrides: explicit flag, then environment, then what was loaded.
    pub fn with_overrides(mut self, flag_url: Option<String>, env_url: Option<String>) -> Self {
        if let Some(url) = flag_url.or(env_url).filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(JotterError::Config(format!(
                "api_url must be an http(s) URL, got {:?}",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(JotterError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
