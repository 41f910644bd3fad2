//! Trailing-window averages over weekly means.

use crate::models::{Metric, WeeklyAggregate};

/// Window used when none is configured.
pub const DEFAULT_WINDOW: usize = 3;

/// Mean of `metric` over the last `min(window, weeks)` weekly aggregates.
///
/// Returns `0.0` when there is nothing to average.
pub fn rolling_average(aggregates: &[WeeklyAggregate], metric: Metric, window: usize) -> f64 {
    let take = window.min(aggregates.len());
    if take == 0 {
        return 0.0;
    }

    let tail = &aggregates[aggregates.len() - take..];
    let sum: f64 = tail.iter().map(|week| week.mean(metric)).sum();
    sum / take as f64
}
