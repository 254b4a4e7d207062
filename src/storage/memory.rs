//! In-memory storage for tests

use crate::error::TrackerError;
use crate::storage::MatchStorage;
use crate::types::MatchLog;
use std::path::PathBuf;
use std::sync::RwLock;

/// Storage that keeps the log in memory and records every save
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    log: RwLock<MatchLog>,
    save_calls: RwLock<Vec<MatchLog>>,
    fail_loads: RwLock<bool>,
    fail_saves: RwLock<bool>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `log`
    pub fn with_log(log: MatchLog) -> Self {
        Self {
            log: RwLock::new(log),
            ..Self::default()
        }
    }

    /// Get all save calls made (for testing)
    pub fn get_save_calls(&self) -> Vec<MatchLog> {
        self.save_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Make subsequent loads fail
    pub fn fail_loads(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_loads.write() {
            *flag = fail;
        }
    }

    /// Make subsequent saves fail
    pub fn fail_saves(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_saves.write() {
            *flag = fail;
        }
    }

    fn flag(lock: &RwLock<bool>) -> bool {
        lock.read().map(|flag| *flag).unwrap_or(false)
    }
}

impl MatchStorage for InMemoryStorage {
    fn load(&self) -> crate::error::Result<MatchLog> {
        if Self::flag(&self.fail_loads) {
            return Err(TrackerError::StorageLoadFailed {
                path: PathBuf::from(self.location()),
                message: "simulated load failure".to_string(),
            }
            .into());
        }

        let log = self.log.read().map_err(|_| TrackerError::InternalError {
            message: "Failed to acquire log read lock".to_string(),
        })?;

        Ok(log.clone())
    }

    fn save(&self, log: &MatchLog) -> crate::error::Result<()> {
        // Record the call for testing
        if let Ok(mut calls) = self.save_calls.write() {
            calls.push(log.clone());
        }

        if Self::flag(&self.fail_saves) {
            return Err(TrackerError::StorageSaveFailed {
                path: PathBuf::from(self.location()),
                message: "simulated save failure".to_string(),
            }
            .into());
        }

        let mut stored = self.log.write().map_err(|_| TrackerError::InternalError {
            message: "Failed to acquire log write lock".to_string(),
        })?;
        *stored = log.clone();

        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
