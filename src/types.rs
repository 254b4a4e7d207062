//! Common types used throughout the rank tracker

use crate::error::TrackerError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use tracing::warn;

/// Label of a rank as stored on records, e.g. `Gold II` or `Master`
///
/// Kept as free text so that legacy or hand-edited values survive a round trip.
pub type RankName = String;

/// Letter grade awarded after a match, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    SPlus,
    S,
    SMinus,
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
}

impl Grade {
    /// Every grade from best to worst
    pub const ALL: [Grade; 15] = [
        Grade::SPlus,
        Grade::S,
        Grade::SMinus,
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::DMinus,
    ];

    /// Label used for display and storage
    pub fn label(&self) -> &'static str {
        match self {
            Grade::SPlus => "S+",
            Grade::S => "S",
            Grade::SMinus => "S-",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
        }
    }

    /// Numeric score: `S+` is 13, `D-` is -1
    pub fn score(&self) -> i32 {
        13 - Grade::ALL
            .iter()
            .position(|grade| grade == self)
            .unwrap_or(Grade::ALL.len() - 1) as i32
    }

    /// Letter family (`S`, `A`, `B`, `C` or `D`)
    pub fn letter(&self) -> char {
        self.label().chars().next().unwrap_or('D')
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Grade {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .iter()
            .copied()
            .find(|grade| grade.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TrackerError::UnknownGrade {
                grade: trimmed.to_string(),
            })
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Target of a ladder transition and the LP the player starts with there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionMarker {
    pub to: RankName,
    pub start_lp: i64,
}

/// Ladder transition attached to a record
///
/// Stored under a `promote` or `demote` key, so a record can never carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    #[serde(rename = "promote")]
    Promotion(TransitionMarker),
    #[serde(rename = "demote")]
    Demotion(TransitionMarker),
}

/// Kills, deaths and assists of a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kda {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl Kda {
    pub fn new(kills: u32, deaths: u32, assists: u32) -> Self {
        Self {
            kills,
            deaths,
            assists,
        }
    }

    /// `(kills + assists) / max(deaths, 1)`
    pub fn ratio(&self) -> f64 {
        (self.kills as f64 + self.assists as f64) / self.deaths.max(1) as f64
    }
}

/// Serde helpers for the `YYYY-MM-DD HH:MM:SS` timestamp format
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(serde::de::Error::custom)
    }
}

/// One logged match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord", into = "StoredRecord")]
pub struct MatchRecord {
    pub timestamp: NaiveDateTime,
    pub rank: RankName,
    pub lp_change: i64,
    pub lp_total: i64,
    pub kills: Option<u32>,
    pub deaths: Option<u32>,
    pub assists: Option<u32>,
    pub grade: Option<Grade>,
    /// Stored grade text that is not a known grade, such as `N/A`
    ///
    /// Written back unchanged on save. Statistics treat the record as ungraded.
    pub grade_label: Option<String>,
    pub note: Option<String>,
    pub transition: Option<Transition>,
}

/// On-disk layout of a [`MatchRecord`]
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    #[serde(with = "timestamp_format")]
    timestamp: NaiveDateTime,
    rank: RankName,
    #[serde(default)]
    lp_change: i64,
    lp_total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kills: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deaths: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assists: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(flatten)]
    transition: Option<Transition>,
}

impl From<StoredRecord> for MatchRecord {
    fn from(stored: StoredRecord) -> Self {
        let (grade, grade_label) = match stored.grade {
            None => (None, None),
            Some(label) => match label.parse::<Grade>() {
                Ok(grade) => (Some(grade), None),
                Err(_) => {
                    if label.trim() != "N/A" {
                        warn!("Keeping unrecognized grade '{}' as ungraded", label);
                    }
                    (None, Some(label))
                }
            },
        };

        Self {
            timestamp: stored.timestamp,
            rank: stored.rank,
            lp_change: stored.lp_change,
            lp_total: stored.lp_total,
            kills: stored.kills,
            deaths: stored.deaths,
            assists: stored.assists,
            grade,
            grade_label,
            note: stored.note,
            transition: stored.transition,
        }
    }
}

impl From<MatchRecord> for StoredRecord {
    fn from(record: MatchRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            rank: record.rank,
            lp_change: record.lp_change,
            lp_total: record.lp_total,
            kills: record.kills,
            deaths: record.deaths,
            assists: record.assists,
            grade: record
                .grade
                .map(|grade| grade.label().to_string())
                .or(record.grade_label),
            note: record.note,
            transition: record.transition,
        }
    }
}

impl MatchRecord {
    /// Create a bare record without performance details
    pub fn new(timestamp: NaiveDateTime, rank: impl Into<RankName>, lp_change: i64, lp_total: i64) -> Self {
        Self {
            timestamp,
            rank: rank.into(),
            lp_change,
            lp_total,
            kills: None,
            deaths: None,
            assists: None,
            grade: None,
            grade_label: None,
            note: None,
            transition: None,
        }
    }

    pub fn with_kda(mut self, kda: Kda) -> Self {
        self.kills = Some(kda.kills);
        self.deaths = Some(kda.deaths);
        self.assists = Some(kda.assists);
        self
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self.grade_label = None;
        self
    }

    /// Attach a note; blank notes are dropped
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let note = note.trim();
        self.note = (!note.is_empty()).then(|| note.to_string());
        self
    }

    pub fn with_transition(mut self, transition: Option<Transition>) -> Self {
        self.transition = transition;
        self
    }

    /// KDA line, present whenever kills were recorded
    pub fn kda(&self) -> Option<Kda> {
        self.kills.map(|kills| {
            Kda::new(
                kills,
                self.deaths.unwrap_or_default(),
                self.assists.unwrap_or_default(),
            )
        })
    }

    pub fn promotion(&self) -> Option<&TransitionMarker> {
        match &self.transition {
            Some(Transition::Promotion(marker)) => Some(marker),
            _ => None,
        }
    }

    pub fn demotion(&self) -> Option<&TransitionMarker> {
        match &self.transition {
            Some(Transition::Demotion(marker)) => Some(marker),
            _ => None,
        }
    }
}

/// Rank and LP the player currently stands at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub rank: RankName,
    pub lp: i64,
}

/// Chronological, append-only history of matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchLog {
    records: Vec<MatchRecord>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MatchRecord> {
        self.records.last()
    }

    /// The last `count` records, oldest first
    pub fn recent(&self, count: usize) -> &[MatchRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }

    /// Current rank and LP, taken from the most recent record
    pub fn standing(&self) -> Option<Standing> {
        self.last().map(|record| Standing {
            rank: record.rank.clone(),
            lp: record.lp_total,
        })
    }
}

impl From<Vec<MatchRecord>> for MatchLog {
    fn from(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a MatchLog {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
