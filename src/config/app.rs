//! Main application configuration
//!
//! This module defines the primary configuration structures for the rank
//! tracker, including TOML file loading, environment variable overrides and
//! validation.

use crate::config::ladder::LadderConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub ladder: LadderConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the match history lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file holding the match history
    pub data_file: PathBuf,
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Number of most recent records shown by the history table
    pub history_limit: usize,
    /// Number of most recent LP totals plotted in the trend chart
    pub trend_points: usize,
    /// Number of most recent games used for recent form
    pub recent_games: usize,
    /// Number of ranks listed in the distribution
    pub distribution_top: usize,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "rank-tracker".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("progression_data.json"),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            history_limit: 500,
            trend_points: 10,
            recent_games: 10,
            distribution_top: 5,
            color: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        if let Ok(data_file) = env::var("TRACKER_DATA_FILE") {
            self.storage.data_file = PathBuf::from(data_file);
        }

        if let Ok(limit) = env::var("TRACKER_HISTORY_LIMIT") {
            self.display.history_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid TRACKER_HISTORY_LIMIT value: {}", limit))?;
        }
        if let Ok(points) = env::var("TRACKER_TREND_POINTS") {
            self.display.trend_points = points
                .parse()
                .map_err(|_| anyhow!("Invalid TRACKER_TREND_POINTS value: {}", points))?;
        }
        // https://no-color.org: any non-empty value disables color
        if env::var("NO_COLOR").is_ok_and(|value| !value.is_empty()) {
            self.display.color = false;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.storage.data_file.as_os_str().is_empty() {
        return Err(anyhow!("Data file path cannot be empty"));
    }

    if config.display.history_limit == 0 {
        return Err(anyhow!("History limit must be greater than 0"));
    }
    if config.display.trend_points < 2 {
        return Err(anyhow!("Trend chart needs at least 2 points"));
    }
    if config.display.recent_games == 0 {
        return Err(anyhow!("Recent games window must be greater than 0"));
    }

    config.ladder.validate()?;

    Ok(())
}
