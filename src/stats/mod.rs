//! Derived statistics over the match log
//!
//! This module handles streak tracking and the aggregate figures shown on the
//! statistics screen. Every function tolerates an empty log.

pub mod aggregates;
pub mod streaks;

// Re-export commonly used types
pub use aggregates::{
    average_grade, rank_distribution, Form, GradeStats, KdaStats, Overview, RecentForm, StatsReport,
};
pub use streaks::{calculate_streaks, MatchResult, StreakKind, StreakSummary};
