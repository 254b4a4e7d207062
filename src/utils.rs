//! Utility functions for the rank tracker

use chrono::{Local, NaiveDateTime, Timelike};

/// Get the current local timestamp, truncated to whole seconds
pub fn current_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Percentage of `part` in `total`, 0.0 when `total` is zero
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Mean of a slice, 0.0 when empty
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|value| *value as f64).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_timestamp_has_no_fraction() {
        assert_eq!(current_timestamp().nanosecond(), 0);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(7, 10), 70.0);
        assert_eq!(percentage(0, 10), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10, 20, -30]), 0.0);
        assert_eq!(mean(&[15, 20]), 17.5);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[i64::MAX, i64::MAX]), i64::MAX as f64);
    }
}
