//! Test fixtures and helpers for integration testing

use chrono::NaiveDate;
use rank_tracker::cli::{Console, Session};
use rank_tracker::config::DisplaySettings;
use rank_tracker::display::Theme;
use rank_tracker::storage::MatchStorage;
use rank_tracker::types::{MatchLog, MatchRecord};
use rank_tracker::RankLadder;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Record at a fixed time so output is reproducible
pub fn record(rank: &str, lp_change: i64, lp_total: i64) -> MatchRecord {
    let timestamp = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(20, 0, 0))
        .unwrap();
    MatchRecord::new(timestamp, rank, lp_change, lp_total)
}

/// Outcome of a scripted session
pub struct ScriptedRun {
    pub log: MatchLog,
    pub output: String,
}

/// Drive a full session from `script` against `storage` with a plain theme
pub fn run_session(
    storage: Arc<dyn MatchStorage>,
    initial: MatchLog,
    ladder: RankLadder,
    script: &str,
) -> ScriptedRun {
    let log = Arc::new(Mutex::new(initial));
    let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let mut session = Session::new(
        console,
        Arc::clone(&log),
        storage,
        ladder,
        Theme::plain(),
        DisplaySettings::default(),
    );

    session.greet().unwrap();
    session.run().unwrap();

    let output = String::from_utf8(session.into_output()).unwrap();
    let log = log.lock().unwrap().clone();
    ScriptedRun { log, output }
}
