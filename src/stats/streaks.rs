//! Win and loss streaks
//!
//! Streaks look at what actually happened in a match rather than the sign of the
//! stored LP change alone: a demotion always counts as a loss and a promotion as
//! a win. Records with no LP movement and no marker are skipped.

use crate::types::{MatchLog, MatchRecord};
use serde::{Deserialize, Serialize};

/// Classification of a single record for streak purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Loss,
    Neutral,
}

impl MatchResult {
    /// Demotion marker, then promotion marker, then the sign of `lp_change`
    pub fn classify(record: &MatchRecord) -> Self {
        if record.demotion().is_some() {
            MatchResult::Loss
        } else if record.promotion().is_some() {
            MatchResult::Win
        } else if record.lp_change > 0 {
            MatchResult::Win
        } else if record.lp_change < 0 {
            MatchResult::Loss
        } else {
            MatchResult::Neutral
        }
    }
}

/// Direction of the streak in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Lose,
    None,
}

impl std::fmt::Display for StreakKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakKind::Win => write!(f, "win"),
            StreakKind::Lose => write!(f, "lose"),
            StreakKind::None => write!(f, "none"),
        }
    }
}

/// Current and historical streaks over a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Length of the streak in progress
    pub current: u32,
    pub kind: StreakKind,
    /// Longest run of wins
    pub best_win: u32,
    /// Longest run of losses
    pub worst_lose: u32,
}

impl Default for StreakSummary {
    fn default() -> Self {
        Self {
            current: 0,
            kind: StreakKind::None,
            best_win: 0,
            worst_lose: 0,
        }
    }
}

/// Compute every streak figure for `log`
pub fn calculate_streaks(log: &MatchLog) -> StreakSummary {
    if log.is_empty() {
        return StreakSummary::default();
    }

    let (current, kind) = current_streak(log.records());
    let (best_win, worst_lose) = extreme_streaks(log.records());

    StreakSummary {
        current,
        kind,
        best_win,
        worst_lose,
    }
}

/// Scan backwards from the newest record until the result flips
fn current_streak(records: &[MatchRecord]) -> (u32, StreakKind) {
    let mut streak: i64 = 0;

    for record in records.iter().rev() {
        match MatchResult::classify(record) {
            MatchResult::Win if streak >= 0 => streak += 1,
            MatchResult::Loss if streak <= 0 => streak -= 1,
            MatchResult::Neutral => {}
            _ => break,
        }
    }

    let kind = match streak {
        s if s > 0 => StreakKind::Win,
        s if s < 0 => StreakKind::Lose,
        _ => StreakKind::None,
    };

    (streak.unsigned_abs() as u32, kind)
}

/// Forward scan keeping a signed run counter; returns (best win, worst lose)
fn extreme_streaks(records: &[MatchRecord]) -> (u32, u32) {
    let mut run: i64 = 0;
    let mut best: i64 = 0;
    let mut worst: i64 = 0;

    for record in records {
        match MatchResult::classify(record) {
            MatchResult::Win => {
                run = if run >= 0 { run + 1 } else { 1 };
                best = best.max(run);
            }
            MatchResult::Loss => {
                run = if run <= 0 { run - 1 } else { -1 };
                worst = worst.min(run);
            }
            MatchResult::Neutral => {}
        }
    }

    (best as u32, worst.unsigned_abs() as u32)
}
