use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE, DEFAULT_PAGE_SIZE, DEFAULT_THRESHOLD, DEFAULT_TICK_RATE_MS, PAGE_SIZE_ENV,
    USERS_FILE_ENV,
};
use crate::error::{ScrollError, ScrollResult};
use crate::observer::ObserverOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub users_file: Option<PathBuf>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<f32>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_tick_rate_ms() -> u64 {
    DEFAULT_TICK_RATE_MS
}

fn default_thresholds() -> Vec<f32> {
    vec![DEFAULT_THRESHOLD]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            users_file: None,
            page_size: DEFAULT_PAGE_SIZE,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            thresholds: default_thresholds(),
        }
    }
}

impl Config {
    /// Observer options for the sentinel binding.
    pub fn observer_options(&self) -> ScrollResult<ObserverOptions> {
        ObserverOptions::with_thresholds(self.thresholds.clone())
    }

    /// Reject values the browser cannot run with.
    pub fn validate(&self) -> ScrollResult<()> {
        if self.page_size == 0 {
            return Err(ScrollError::ConfigError("page_size must be at least 1".to_string()));
        }
        if self.tick_rate_ms == 0 {
            return Err(ScrollError::ConfigError("tick_rate_ms must be at least 1".to_string()));
        }
        self.observer_options()
            .map_err(|e| ScrollError::ConfigError(format!("thresholds: {}", e)))?;
        Ok(())
    }
}

fn config_path() -> ScrollResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ScrollError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

/// Read a config file. A missing file yields defaults; a malformed one is an error.
pub fn load_config_from(path: &Path) -> ScrollResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> ScrollResult<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> ScrollResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

pub fn save_config(config: &Config) -> ScrollResult<()> {
    save_config_to(config, &config_path()?)
}

/// Users file from the command line, then the environment, then the config file.
pub fn resolve_users_file(cli: Option<PathBuf>, config: &Config) -> ScrollResult<PathBuf> {
    if let Some(path) = cli {
        return Ok(path);
    }

    if let Ok(path) = env::var(USERS_FILE_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Some(path) = &config.users_file {
        return Ok(path.clone());
    }

    Err(ScrollError::ConfigError(format!(
        "No users file given. Pass a FILE argument, set {} or run 'viewport-scroll config --users-file PATH'.",
        USERS_FILE_ENV
    )))
}

/// Page size from the command line, then the environment, then the config file.
pub fn resolve_page_size(cli: Option<usize>, config: &Config) -> ScrollResult<usize> {
    let page_size = match cli {
        Some(size) => size,
        None => match env::var(PAGE_SIZE_ENV) {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ScrollError::ConfigError(format!("{} must be a positive integer, got '{}'", PAGE_SIZE_ENV, raw))
            })?,
            Err(_) => config.page_size,
        },
    };

    if page_size == 0 {
        return Err(ScrollError::InvalidInput("page size must be at least 1".to_string()));
    }
    Ok(page_size)
}
