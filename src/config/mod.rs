//! Configuration management for the rank tracker
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod ladder;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, DisplaySettings, ServiceSettings, StorageSettings};
pub use ladder::LadderConfig;
