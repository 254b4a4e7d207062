//! JSON file storage
//!
//! The whole history is a single pretty-printed JSON array, rewritten on every
//! save. Non-ASCII text such as notes is written literally.

use crate::error::TrackerError;
use crate::storage::MatchStorage;
use crate::types::MatchLog;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage backed by one JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable file is copied before it can be overwritten
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn load_failed(&self, message: impl Into<String>) -> anyhow::Error {
        TrackerError::StorageLoadFailed {
            path: self.path.clone(),
            message: message.into(),
        }
        .into()
    }

    /// Copy the current file to [`Self::backup_path`], logging the result
    fn back_up(&self) {
        let backup = self.backup_path();
        match std::fs::copy(&self.path, &backup) {
            Ok(_) => warn!(
                "Unreadable history copied to {} before starting fresh",
                backup.display()
            ),
            Err(e) => warn!("Could not back up unreadable history: {}", e),
        }
    }

    fn save_failed(&self, message: impl Into<String>) -> anyhow::Error {
        TrackerError::StorageSaveFailed {
            path: self.path.clone(),
            message: message.into(),
        }
        .into()
    }
}

impl MatchStorage for JsonFileStorage {
    fn load(&self) -> crate::error::Result<MatchLog> {
        // Anything but a missing file is backed up before the error is returned
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history at {}, starting fresh", self.path.display());
                return Ok(MatchLog::new());
            }
            Err(e) => {
                self.back_up();
                return Err(self.load_failed(e.to_string()));
            }
        };

        serde_json::from_slice::<MatchLog>(&content).map_err(|parse_error| {
            self.back_up();
            self.load_failed(parse_error.to_string())
        })
    }

    fn save(&self, log: &MatchLog) -> crate::error::Result<()> {
        let content =
            serde_json::to_string_pretty(log).map_err(|e| self.save_failed(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.save_failed(e.to_string()))?;
        }

        std::fs::write(&self.path, content).map_err(|e| self.save_failed(e.to_string()))?;
        debug!("Saved {} entries to {}", log.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grade, Kda, MatchRecord, Transition, TransitionMarker};
    use crate::utils::current_timestamp;

    fn sample_log() -> MatchLog {
        let mut log = MatchLog::new();
        log.append(
            MatchRecord::new(current_timestamp(), "Gold II", 22, 98)
                .with_kda(Kda::new(8, 3, 12))
                .with_grade(Grade::A)
                .with_note("duo avec Léa 🎉"),
        );
        log.append(
            MatchRecord::new(current_timestamp(), "Gold I", 17, 15).with_transition(Some(
                Transition::Promotion(TransitionMarker {
                    to: "Gold I".to_string(),
                    start_lp: 15,
                }),
            )),
        );
        log
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("progression_data.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join("history.json"));
        let log = sample_log();

        storage.save(&log).unwrap();
        assert_eq!(storage.load().unwrap(), log);
    }

    #[test]
    fn test_file_layout_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));
        storage.save(&sample_log()).unwrap();

        let content = std::fs::read_to_string(storage.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"timestamp\""));
        assert!(content.contains("Léa 🎉"));
        assert!(content.contains("\"promote\": {"));
        assert!(!content.contains("\"demote\""));
    }

    #[test]
    fn test_loads_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progression_data.json");
        std::fs::write(
            &path,
            r#"[
  {
    "timestamp": "2024-01-15 20:31:07",
    "rank": "Silver II",
    "lp_change": 0,
    "lp_total": 45
  },
  {
    "timestamp": "2024-01-15 21:02:44",
    "rank": "Silver III",
    "lp_change": -21,
    "lp_total": 75,
    "kills": 3,
    "deaths": 9,
    "assists": 4,
    "grade": "C-",
    "note": "jungle diff",
    "demote": {"to": "Silver III", "start_lp": 75}
  }
]"#,
        )
        .unwrap();

        let log = JsonFileStorage::new(&path).load().unwrap();
        assert_eq!(log.len(), 2);
        assert!(log.records()[0].kda().is_none());
        assert_eq!(log.records()[1].grade, Some(Grade::CMinus));
        assert_eq!(log.records()[1].demotion().unwrap().to, "Silver III");
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[{\"timestamp\": ").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().is_err());

        let backup = std::fs::read_to_string(storage.backup_path()).unwrap();
        assert_eq!(backup, "[{\"timestamp\": ");
    }

    #[test]
    fn test_non_utf8_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, [0xff, 0xfe, b'[']).unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().is_err());
        assert_eq!(std::fs::read(storage.backup_path()).unwrap(), vec![0xff, 0xfe, b'[']);

        // The next save replaces the original but leaves the copy alone
        let log = sample_log();
        storage.save(&log).unwrap();
        assert_eq!(storage.load().unwrap(), log);
        assert_eq!(std::fs::read(storage.backup_path()).unwrap(), vec![0xff, 0xfe, b'[']);
    }
}
