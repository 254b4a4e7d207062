//! Rank ladder configuration

use serde::{Deserialize, Serialize};

/// Shape of the ranked ladder: tiers with divisions, then apex tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    /// Divided tiers, lowest first
    pub tiers: Vec<String>,
    /// Divisions inside each tier, lowest first
    pub divisions: Vec<String>,
    /// Undivided tiers above the last divided tier, lowest first
    pub apex_tiers: Vec<String>,
    /// LP needed to finish a division
    pub lp_per_division: i64,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            tiers: ["Iron", "Bronze", "Silver", "Gold", "Platinum", "Emerald", "Diamond"]
                .into_iter()
                .map(String::from)
                .collect(),
            divisions: ["IV", "III", "II", "I"]
                .into_iter()
                .map(String::from)
                .collect(),
            apex_tiers: ["Master", "Grandmaster", "Challenger"]
                .into_iter()
                .map(String::from)
                .collect(),
            lp_per_division: 100,
        }
    }
}

impl LadderConfig {
    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.tiers.is_empty() && self.apex_tiers.is_empty() {
            return Err(crate::error::TrackerError::ConfigurationError {
                message: "ladder needs at least one tier".to_string(),
            }
            .into());
        }

        if !self.tiers.is_empty() && self.divisions.is_empty() {
            return Err(crate::error::TrackerError::ConfigurationError {
                message: "divided tiers need at least one division".to_string(),
            }
            .into());
        }

        if self.lp_per_division <= 0 {
            return Err(crate::error::TrackerError::ConfigurationError {
                message: "lp_per_division must be positive".to_string(),
            }
            .into());
        }

        let mut names: Vec<&str> = self
            .tiers
            .iter()
            .chain(self.apex_tiers.iter())
            .map(String::as_str)
            .collect();
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(crate::error::TrackerError::ConfigurationError {
                message: "tier names cannot be empty".to_string(),
            }
            .into());
        }
        names.sort_unstable();
        names.dedup();
        if names.len() != self.tiers.len() + self.apex_tiers.len() {
            return Err(crate::error::TrackerError::ConfigurationError {
                message: "tier names must be unique".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
