//! Performance benchmarks for statistics and rendering

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rank_tracker::config::DisplaySettings;
use rank_tracker::display::{Renderer, Theme};
use rank_tracker::stats::{calculate_streaks, rank_distribution, StatsReport};
use rank_tracker::types::{Grade, Kda, MatchLog, MatchRecord};
use rank_tracker::{PromotionEngine, RankLadder};

/// A season-sized history cycling through wins and losses
fn create_bench_log(games: usize) -> MatchLog {
    let ladder = RankLadder::standard();
    let ranks = ladder.ranks();
    let timestamp = rank_tracker::utils::current_timestamp();

    let records = (0..games)
        .map(|i| {
            let lp_change = if i % 3 == 2 { -17 } else { 21 };
            MatchRecord::new(timestamp, ranks[(i / 40) % ranks.len()].clone(), lp_change, (i % 100) as i64)
                .with_kda(Kda::new((i % 17) as u32, (i % 9) as u32, (i % 13) as u32))
                .with_grade(Grade::ALL[i % Grade::ALL.len()])
        })
        .collect::<Vec<_>>();

    MatchLog::from(records)
}

fn bench_stats_report(c: &mut Criterion) {
    let log = create_bench_log(3000);

    c.bench_function("stats_report_3000_games", |b| {
        b.iter(|| StatsReport::build(black_box(&log), 10))
    });

    c.bench_function("streaks_3000_games", |b| {
        b.iter(|| calculate_streaks(black_box(&log)))
    });

    c.bench_function("rank_distribution_3000_games", |b| {
        b.iter(|| rank_distribution(black_box(&log)))
    });
}

fn bench_rendering(c: &mut Criterion) {
    let log = create_bench_log(3000);
    let theme = Theme::new(true);
    let ladder = RankLadder::standard();
    let settings = DisplaySettings::default();
    let renderer = Renderer::new(&theme, &ladder, &settings);

    c.bench_function("history_table_3000_games", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            renderer.history(&mut out, black_box(&log)).unwrap();
            out
        })
    });

    c.bench_function("stats_screen_3000_games", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(16 * 1024);
            renderer.stats(&mut out, black_box(&log)).unwrap();
            out
        })
    });
}

fn bench_promotion_engine(c: &mut Criterion) {
    let ladder = RankLadder::standard();
    let engine = PromotionEngine::new(&ladder);

    c.bench_function("evaluate_every_rank", |b| {
        b.iter(|| {
            for rank in ladder.ranks() {
                black_box(engine.evaluate(rank, 90, 25));
                black_box(engine.evaluate(rank, 10, -25));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_stats_report,
    bench_rendering,
    bench_promotion_engine
);
criterion_main!(benches);
