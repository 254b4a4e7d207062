//! Error types for the rank tracker
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use std::path::PathBuf;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific tracker scenarios
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Failed to load match history from {path}: {message}")]
    StorageLoadFailed { path: PathBuf, message: String },

    #[error("Failed to save match history to {path}: {message}")]
    StorageSaveFailed { path: PathBuf, message: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Starting LP {start_lp} is outside 0..={max}")]
    InvalidStartLp { start_lp: i64, max: i64 },

    #[error("Unknown grade: {grade}")]
    UnknownGrade { grade: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Input stream closed")]
    InputClosed,

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
