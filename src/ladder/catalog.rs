//! Ordered rank catalog
//!
//! The catalog is built once from [`LadderConfig`] and never mutated. Lookups
//! are exact string matches; labels missing from the catalog are passed through
//! unchanged so that free-text or legacy ranks keep working.

use crate::config::LadderConfig;
use crate::types::RankName;
use tracing::debug;

/// Ordered sequence of rank labels, lowest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankLadder {
    ranks: Vec<RankName>,
    apex_tiers: Vec<String>,
    lp_per_division: i64,
}

impl RankLadder {
    /// Build the catalog after validating the configuration
    pub fn from_config(config: &LadderConfig) -> crate::error::Result<Self> {
        config.validate()?;
        let ladder = Self::build(config);
        debug!("Built rank ladder with {} ranks", ladder.ranks.len());
        Ok(ladder)
    }

    /// The standard ladder from Iron IV to Challenger
    pub fn standard() -> Self {
        Self::build(&LadderConfig::default())
    }

    // Every divided tier crossed with every division, then the apex tiers
    fn build(config: &LadderConfig) -> Self {
        let mut ranks =
            Vec::with_capacity(config.tiers.len() * config.divisions.len() + config.apex_tiers.len());
        for tier in &config.tiers {
            for division in &config.divisions {
                ranks.push(format!("{} {}", tier, division));
            }
        }
        ranks.extend(config.apex_tiers.iter().cloned());

        Self {
            ranks,
            apex_tiers: config.apex_tiers.clone(),
            lp_per_division: config.lp_per_division,
        }
    }

    /// All ranks, lowest first
    pub fn ranks(&self) -> &[RankName] {
        &self.ranks
    }

    pub fn lp_per_division(&self) -> i64 {
        self.lp_per_division
    }

    /// Index of `rank` in the catalog
    pub fn position(&self, rank: &str) -> Option<usize> {
        self.ranks.iter().position(|candidate| candidate == rank)
    }

    /// Next-higher rank; the top rank and unknown labels map to themselves
    pub fn successor<'a>(&'a self, rank: &'a str) -> &'a str {
        match self.position(rank) {
            Some(index) if index + 1 < self.ranks.len() => &self.ranks[index + 1],
            _ => rank,
        }
    }

    /// Next-lower rank; the bottom rank and unknown labels map to themselves
    pub fn predecessor<'a>(&'a self, rank: &'a str) -> &'a str {
        match self.position(rank) {
            Some(index) if index > 0 => &self.ranks[index - 1],
            _ => rank,
        }
    }

    /// Whether `rank` names an apex tier
    ///
    /// Matches by substring so that labels like `Grandmaster 350LP` still count.
    pub fn is_apex(&self, rank: &str) -> bool {
        self.apex_tiers.iter().any(|tier| rank.contains(tier.as_str()))
    }
}

impl Default for RankLadder {
    fn default() -> Self {
        Self::standard()
    }
}
