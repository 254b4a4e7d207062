//! Match history persistence
//!
//! This module defines the interface for loading and saving the whole match log,
//! with a JSON file implementation and an in-memory one for tests.

pub mod json;
pub mod memory;

use crate::types::MatchLog;
use tracing::{info, warn};

// Re-export commonly used types
pub use json::JsonFileStorage;
pub use memory::InMemoryStorage;

/// Trait for match history storage operations
pub trait MatchStorage: Send + Sync {
    /// Load the full history; a store that does not exist yet yields an empty log
    fn load(&self) -> crate::error::Result<MatchLog>;

    /// Overwrite the stored history with `log`
    fn save(&self, log: &MatchLog) -> crate::error::Result<()>;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}

/// Load the history, falling back to an empty log on any failure
pub fn load_or_empty(storage: &dyn MatchStorage) -> MatchLog {
    match storage.load() {
        Ok(log) => {
            info!("Loaded {} entries from {}", log.len(), storage.location());
            log
        }
        Err(e) => {
            warn!("Starting with an empty history: {:#}", e);
            MatchLog::new()
        }
    }
}
