use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding one sub-directory of snapshots per department alias.
    #[serde(default)]
    pub root_dir: PathBuf,

    /// Pause between two profile downloads.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        let config = Self::from_toml(&content)?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("root_dir".to_string()).into());
        }

        if self.request_delay_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "request_delay_ms must be greater than 0".to_string(),
            )
            .into());
        }

        if self.logging.filename.is_empty() {
            return Err(
                ConfigError::InvalidValue("logging.filename cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "faculty-scraper.log".to_string()
}
