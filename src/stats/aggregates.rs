//! Aggregate statistics over the match log
//!
//! Win and loss counts here follow the sign of `lp_change` only, so a confirmed
//! promotion with a zero change is neither. [`crate::stats::streaks`] uses
//! markers as well; the two views are kept separate on purpose.

use crate::stats::streaks::{calculate_streaks, StreakSummary};
use crate::types::{Grade, Kda, MatchLog, MatchRecord, RankName};
use crate::utils::{mean, percentage};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Kills at or above this count make a game exceptional
pub const EXCEPTIONAL_KILLS: u32 = 15;

/// Headline numbers for the whole log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub promotions: usize,
    pub demotions: usize,
    /// Percentage of games with a positive LP change
    pub winrate: f64,
    pub total_lp: i64,
    pub avg_lp: f64,
    pub avg_lp_win: f64,
    pub avg_lp_loss: f64,
}

impl Overview {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let gains: Vec<i64> = records
            .iter()
            .map(|record| record.lp_change)
            .filter(|change| *change > 0)
            .collect();
        let drops: Vec<i64> = records
            .iter()
            .map(|record| record.lp_change)
            .filter(|change| *change < 0)
            .collect();
        let changes: Vec<i64> = records.iter().map(|record| record.lp_change).collect();

        Self {
            total_games: records.len(),
            wins: gains.len(),
            losses: drops.len(),
            promotions: records.iter().filter(|r| r.promotion().is_some()).count(),
            demotions: records.iter().filter(|r| r.demotion().is_some()).count(),
            winrate: percentage(gains.len(), records.len()),
            total_lp: changes.iter().fold(0i64, |sum, change| sum.saturating_add(*change)),
            avg_lp: mean(&changes),
            avg_lp_win: mean(&gains),
            avg_lp_loss: mean(&drops),
        }
    }
}

/// How the last few games went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Form {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Form {
    pub fn from_winrate(winrate: f64) -> Self {
        if winrate >= 70.0 {
            Form::Excellent
        } else if winrate >= 60.0 {
            Form::Good
        } else if winrate >= 40.0 {
            Form::Average
        } else {
            Form::Poor
        }
    }
}

/// Results over the most recent games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub winrate: f64,
    pub lp: i64,
    pub form: Form,
}

impl RecentForm {
    pub fn from_log(log: &MatchLog, window: usize) -> Self {
        let recent = log.recent(window);
        let wins = recent.iter().filter(|r| r.lp_change > 0).count();
        let winrate = percentage(wins, recent.len());

        Self {
            games: recent.len(),
            wins,
            losses: recent.iter().filter(|r| r.lp_change < 0).count(),
            winrate,
            lp: recent
                .iter()
                .fold(0i64, |sum, r| sum.saturating_add(r.lp_change)),
            form: Form::from_winrate(winrate),
        }
    }
}

/// Kill, death and assist aggregates over games that recorded them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdaStats {
    pub games: usize,
    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_assists: u64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    /// `(avg_kills + avg_assists) / max(avg_deaths, 0.1)`
    pub avg_ratio: f64,
    pub best_ratio: f64,
    pub worst_ratio: f64,
    pub exceptional_games: usize,
}

impl KdaStats {
    /// `None` when no record carries kills
    pub fn from_records(records: &[MatchRecord]) -> Option<Self> {
        let lines: Vec<Kda> = records.iter().filter_map(MatchRecord::kda).collect();
        if lines.is_empty() {
            return None;
        }

        let games = lines.len() as f64;
        let total_kills: u64 = lines.iter().map(|kda| kda.kills as u64).sum();
        let total_deaths: u64 = lines.iter().map(|kda| kda.deaths as u64).sum();
        let total_assists: u64 = lines.iter().map(|kda| kda.assists as u64).sum();

        let avg_kills = total_kills as f64 / games;
        let avg_deaths = total_deaths as f64 / games;
        let avg_assists = total_assists as f64 / games;

        let ratios = lines.iter().map(Kda::ratio);
        let best_ratio = ratios.clone().fold(f64::MIN, f64::max);
        let worst_ratio = ratios.fold(f64::MAX, f64::min);

        Some(Self {
            games: lines.len(),
            total_kills,
            total_deaths,
            total_assists,
            avg_kills,
            avg_deaths,
            avg_assists,
            avg_ratio: (avg_kills + avg_assists) / avg_deaths.max(0.1),
            best_ratio,
            worst_ratio,
            exceptional_games: lines
                .iter()
                .filter(|kda| kda.kills >= EXCEPTIONAL_KILLS)
                .count(),
        })
    }
}

/// Grade aggregates over graded games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeStats {
    pub games: usize,
    /// Count per grade, best grade first
    pub counts: BTreeMap<Grade, usize>,
    pub mean_score: f64,
    pub average: Grade,
}

impl GradeStats {
    /// `None` when no record carries a grade
    pub fn from_records(records: &[MatchRecord]) -> Option<Self> {
        let grades: Vec<Grade> = records.iter().filter_map(|record| record.grade).collect();
        if grades.is_empty() {
            return None;
        }

        let mut counts = BTreeMap::new();
        for grade in &grades {
            *counts.entry(*grade).or_insert(0) += 1;
        }

        let mean_score =
            grades.iter().map(|grade| grade.score() as f64).sum::<f64>() / grades.len() as f64;

        Some(Self {
            games: grades.len(),
            counts,
            mean_score,
            average: average_grade(mean_score),
        })
    }
}

/// Highest grade whose score does not exceed `mean_score`, `D-` otherwise
pub fn average_grade(mean_score: f64) -> Grade {
    Grade::ALL
        .iter()
        .copied()
        .find(|grade| mean_score >= grade.score() as f64)
        .unwrap_or(Grade::DMinus)
}

/// Games played per rank, most played first; ties keep first appearance order
pub fn rank_distribution(log: &MatchLog) -> Vec<(RankName, usize)> {
    let mut order: Vec<RankName> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in log {
        let count = counts.entry(record.rank.as_str()).or_insert(0);
        if *count == 0 {
            order.push(record.rank.clone());
        }
        *count += 1;
    }

    let mut distribution: Vec<(RankName, usize)> = order
        .into_iter()
        .map(|rank| {
            let count = counts.get(rank.as_str()).copied().unwrap_or_default();
            (rank, count)
        })
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1));
    distribution
}

/// Everything the statistics screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub overview: Overview,
    pub streaks: StreakSummary,
    pub recent: RecentForm,
    pub ranks: Vec<(RankName, usize)>,
    pub kda: Option<KdaStats>,
    pub grades: Option<GradeStats>,
}

impl StatsReport {
    pub fn build(log: &MatchLog, recent_window: usize) -> Self {
        Self {
            overview: Overview::from_records(log.records()),
            streaks: calculate_streaks(log),
            recent: RecentForm::from_log(log, recent_window),
            ranks: rank_distribution(log),
            kda: KdaStats::from_records(log.records()),
            grades: GradeStats::from_records(log.records()),
        }
    }
}
