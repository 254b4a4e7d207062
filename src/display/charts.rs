//! ASCII charts: progress bars and the LP trend plot
//!
//! Everything here produces plain text; coloring happens in the caller.

use std::cmp::Ordering;

pub const FILLED: char = '█';
pub const EMPTY: char = '░';

/// Cells in the division progress bar
pub const PROGRESS_WIDTH: usize = 20;
/// Cells in the winrate bar
pub const WINRATE_WIDTH: usize = 40;
/// Rows in the LP trend plot
pub const TREND_HEIGHT: usize = 8;
/// Widest LP trend plot, in columns
pub const TREND_MAX_WIDTH: usize = 30;

/// A bar of `width` cells, filled proportionally to `fraction` (clamped to 0..=1)
pub fn bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let filled = ((fraction * width as f64) as usize).min(width);
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar
}

/// Progress through a division
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub bar: String,
    pub percentage: u32,
}

/// Progress of `current_lp` towards `max_lp`, `None` when `max_lp` is not positive
pub fn progress(current_lp: i64, max_lp: i64) -> Option<Progress> {
    if max_lp <= 0 {
        return None;
    }

    let fraction = (current_lp as f64 / max_lp as f64).min(1.0);
    Some(Progress {
        bar: bar(fraction, PROGRESS_WIDTH),
        percentage: (fraction.max(0.0) * 100.0) as u32,
    })
}

/// Bar for a winrate percentage
pub fn winrate_bar(winrate: f64) -> String {
    bar(winrate / 100.0, WINRATE_WIDTH)
}

/// Plot of recent LP totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trend {
    /// Fewer than two points
    NotEnoughData,
    /// Every point has the same value
    Flat { width: usize },
    Chart(TrendChart),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendChart {
    /// Rows from top to bottom
    pub rows: Vec<String>,
    pub min: i64,
    pub max: i64,
    pub width: usize,
    /// Last point compared with the first
    pub direction: Ordering,
}

impl TrendChart {
    /// `min LP ... max LP` axis label under the plot
    pub fn axis(&self) -> String {
        format!(
            "{} LP {} {} LP",
            self.min,
            " ".repeat(self.width.saturating_sub(10)),
            self.max
        )
    }
}

/// Plot the last `last_n` values with min-max scaling onto [`TREND_HEIGHT`] rows
pub fn lp_trend(values: &[i64], last_n: usize) -> Trend {
    if values.len() < 2 {
        return Trend::NotEnoughData;
    }

    let recent = &values[values.len().saturating_sub(last_n)..];
    if recent.len() < 2 {
        return Trend::NotEnoughData;
    }

    let min = recent.iter().copied().min().unwrap_or_default();
    let max = recent.iter().copied().max().unwrap_or_default();
    let width = recent.len().min(TREND_MAX_WIDTH);

    if max == min {
        return Trend::Flat { width };
    }

    let span = max as f64 - min as f64;
    let levels: Vec<usize> = recent[recent.len() - width..]
        .iter()
        .map(|value| ((*value as f64 - min as f64) / span * (TREND_HEIGHT - 1) as f64) as usize)
        .collect();

    let rows = (0..TREND_HEIGHT)
        .rev()
        .map(|row| {
            levels
                .iter()
                .map(|level| match level.cmp(&row) {
                    Ordering::Equal => '●',
                    Ordering::Greater => '│',
                    Ordering::Less => ' ',
                })
                .collect()
        })
        .collect();

    Trend::Chart(TrendChart {
        rows,
        min,
        max,
        width,
        direction: recent[recent.len() - 1].cmp(&recent[0]),
    })
}
