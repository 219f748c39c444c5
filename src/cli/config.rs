// ABOUTME: Configuration management for scriptdesk application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::record::DEFAULT_TIMEZONE;
use crate::template::RenderPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub policy: RenderPolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Files replacing the embedded catalogs and reference lists.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    pub logistics: Option<PathBuf>,
    pub service: Option<PathBuf>,
    pub reference: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("atendimentos.csv")
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            timezone: default_timezone(),
            catalog: CatalogConfig::default(),
            policy: RenderPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file()?,
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Result<PathBuf> {
        let possible_paths = vec![
            PathBuf::from("scriptdesk.yaml"),
            PathBuf::from("scriptdesk.yml"),
            PathBuf::from(".scriptdesk.yaml"),
            PathBuf::from(".scriptdesk.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".scriptdesk").join("config.yaml");
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return Ok(path);
            }
        }

        // Return default path (may not exist)
        Ok(PathBuf::from("scriptdesk.yaml"))
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SCRIPTDESK_LOG_PATH") {
            self.log_path = PathBuf::from(path);
        }
        if let Some(timezone) = lookup("SCRIPTDESK_TIMEZONE") {
            self.timezone = timezone;
        }

        // Logging configuration
        if let Some(level) = lookup("SCRIPTDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SCRIPTDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}
