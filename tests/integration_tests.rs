//! Integration tests for the rank tracker
//!
//! These tests drive the whole system through scripted console input:
//! - Recording games, promotions and demotions
//! - JSON persistence across sessions
//! - Loading history files written by earlier versions
//! - Custom ladders from configuration

// Modules for organizing tests
mod fixtures;

use fixtures::{fixture_path, record, run_session};
use rank_tracker::config::AppConfig;
use rank_tracker::stats::{StatsReport, StreakKind};
use rank_tracker::storage::{load_or_empty, InMemoryStorage, JsonFileStorage, MatchStorage};
use rank_tracker::types::{Grade, MatchLog};
use rank_tracker::RankLadder;
use std::io::Write;
use std::sync::Arc;

#[test]
fn test_games_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progression_data.json");
    let storage: Arc<dyn MatchStorage> = Arc::new(JsonFileStorage::new(&path));

    // First session: starting rank then a win
    let first = run_session(
        storage.clone(),
        load_or_empty(&*storage),
        RankLadder::standard(),
        "a\nSilver II\n40\n24\nA-\n8\n3\n10\nfirst game\nq\n",
    );
    assert_eq!(first.log.len(), 1);
    assert!(first.output.contains("Rank Tracker"));

    // Second session picks up the standing and promotes
    let second = run_session(
        storage.clone(),
        load_or_empty(&*storage),
        RankLadder::standard(),
        "a\n40\nS\n12\n1\n9\n\ny\n4\nq\n",
    );
    assert!(second.output.contains("Current status: Silver II - 64 LP"));
    assert_eq!(second.log.len(), 2);

    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded, second.log);

    let promoted = reloaded.last().unwrap();
    assert_eq!(promoted.rank, "Silver I");
    assert_eq!(promoted.lp_change, 40);
    assert_eq!(promoted.lp_total, 4);
    assert_eq!(promoted.promotion().unwrap().to, "Silver I");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n  {\n"));
    assert!(content.contains("\"promote\": {"));
    assert!(content.contains("\"timestamp\": \""));
}

#[test]
fn test_legacy_history_loads_unchanged() {
    let storage = JsonFileStorage::new(fixture_path("legacy_history.json"));
    let log = storage.load().unwrap();

    assert_eq!(log.len(), 4);
    assert_eq!(log.records()[1].note.as_deref(), Some("vol de baron à 2 secondes"));
    assert_eq!(log.records()[1].promotion().unwrap().start_lp, 12);
    assert_eq!(log.records()[2].grade, None);
    assert_eq!(log.records()[2].grade_label.as_deref(), Some("N/A"));
    assert_eq!(log.records()[2].kda(), None);
    assert_eq!(log.records()[3].demotion().unwrap().to, "Gold II");

    let standing = log.standing().unwrap();
    assert_eq!(standing.rank, "Gold II");
    assert_eq!(standing.lp, 75);
}

#[test]
fn test_legacy_history_statistics() {
    let log = JsonFileStorage::new(fixture_path("legacy_history.json"))
        .load()
        .unwrap();
    let report = StatsReport::build(&log, 10);

    assert_eq!(report.overview.total_games, 4);
    assert_eq!(report.overview.wins, 2);
    assert_eq!(report.overview.losses, 2);
    assert_eq!(report.overview.promotions, 1);
    assert_eq!(report.overview.demotions, 1);
    assert_eq!(report.overview.winrate, 50.0);
    assert_eq!(report.streaks.kind, StreakKind::Lose);
    assert_eq!(report.streaks.current, 2);
    assert_eq!(report.ranks[0], ("Gold II".to_string(), 2));

    let kda = report.kda.unwrap();
    assert_eq!(kda.games, 3);
    assert_eq!(kda.exceptional_games, 1);

    let grades = report.grades.unwrap();
    assert_eq!(grades.games, 3);
    assert_eq!(grades.counts.get(&Grade::SMinus), Some(&1));
}

#[test]
fn test_legacy_history_round_trips() {
    let original = std::fs::read_to_string(fixture_path("legacy_history.json")).unwrap();
    let log: MatchLog = serde_json::from_str(&original).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("copy.json"));
    storage.save(&log).unwrap();

    assert_eq!(storage.load().unwrap(), log);
}

#[test]
fn test_corrupt_history_is_backed_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progression_data.json");
    std::fs::write(&path, "[{\"timestamp\": ").unwrap();

    let storage: Arc<dyn MatchStorage> = Arc::new(JsonFileStorage::new(&path));
    let run = run_session(
        storage.clone(),
        load_or_empty(&*storage),
        RankLadder::standard(),
        "q\n",
    );

    assert!(run.log.is_empty());
    let backup = std::fs::read_to_string(dir.path().join("progression_data.json.corrupt")).unwrap();
    assert_eq!(backup, "[{\"timestamp\": ");
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn test_history_and_stats_views() {
    let storage = Arc::new(InMemoryStorage::new());
    let initial = MatchLog::from(vec![
        record("Platinum IV", 18, 58),
        record("Platinum IV", -16, 42),
        record("Platinum IV", 20, 62),
    ]);

    let run = run_session(storage.clone(), initial, RankLadder::standard(), "p\ns\nq\n");

    assert!(run.output.contains("PROGRESSION HISTORY"));
    assert!(run.output.contains("Progress: [████████████░░░░░░░░] 62%"));
    assert!(run.output.contains("DETAILED STATISTICS"));
    assert!(run.output.contains("Platinum IV          │ ████████████████████ 100.0% (3 games)"));
    assert_eq!(storage.get_save_calls().len(), 1);
}

#[test]
fn test_custom_ladder_from_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[ladder]
tiers = ["Bronze", "Silver"]
divisions = ["II", "I"]
apex_tiers = ["Legend"]
lp_per_division = 50
"#
    )
    .unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    let ladder = RankLadder::from_config(&config.ladder).unwrap();
    assert_eq!(ladder.ranks().len(), 5);

    let storage = Arc::new(InMemoryStorage::new());
    let run = run_session(
        storage,
        MatchLog::from(vec![record("Silver I", 10, 40)]),
        ladder,
        "a\n15\nB\n4\n4\n4\n\ny\n0\nq\n",
    );

    let promoted = run.log.last().unwrap();
    assert_eq!(promoted.rank, "Legend");
    assert_eq!(promoted.lp_change, 10);
    assert_eq!(promoted.lp_total, 0);
}
