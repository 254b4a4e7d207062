//! Rank Tracker - ranked ladder progress tracking from the terminal
//!
//! This crate records ranked games with their LP change, grade and KDA,
//! handles division promotions and demotions, persists the history as JSON
//! and renders history tables and statistics.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ladder;
pub mod stats;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TrackerError};
pub use types::*;

// Re-export key components
pub use ladder::{PromotionEngine, RankLadder};
pub use stats::StatsReport;
pub use storage::{JsonFileStorage, MatchStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
