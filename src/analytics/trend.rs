//! Week-over-week trend of a metric.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Metric, WeeklyAggregate};

/// Sign of the latest week-over-week change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    /// Arrow used in reports.
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Flat => "→",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Flat => write!(f, "flat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Latest weekly mean minus the one before it.
    pub delta: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn flat() -> Self {
        Self {
            delta: 0.0,
            direction: TrendDirection::Flat,
        }
    }

    fn from_delta(delta: f64) -> Self {
        // Exact comparison: equal means are flat, no tolerance.
        let direction = if delta > 0.0 {
            TrendDirection::Up
        } else if delta < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };

        Self { delta, direction }
    }
}

/// Change of `metric` between the two most recent weeks.
pub fn trend(aggregates: &[WeeklyAggregate], metric: Metric) -> Trend {
    match aggregates {
        [.., previous, last] => Trend::from_delta(last.mean(metric) - previous.mean(metric)),
        _ => Trend::flat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn weeks(values: &[f64]) -> Vec<WeeklyAggregate> {
        let first = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, value)| WeeklyAggregate {
                week_ending: first + chrono::Duration::weeks(i as i64),
                means: [(Metric::FeelSupported, *value)].into_iter().collect(),
                count: 3,
            })
            .collect()
    }

    #[test]
    fn test_equal_weeks_are_flat() {
        let result = trend(&weeks(&[7.0, 7.0]), Metric::FeelSupported);
        assert_eq!(result.delta, 0.0);
        assert_eq!(result.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_rising_weeks_are_up() {
        let result = trend(&weeks(&[5.0, 8.0]), Metric::FeelSupported);
        assert_eq!(result.delta, 3.0);
        assert_eq!(result.direction, TrendDirection::Up);
    }

    #[test]
    fn test_falling_weeks_are_down() {
        let result = trend(&weeks(&[8.0, 5.0]), Metric::FeelSupported);
        assert_eq!(result.delta, -3.0);
        assert_eq!(result.direction, TrendDirection::Down);
    }

    #[test]
    fn test_only_last_two_weeks_count() {
        let result = trend(&weeks(&[1.0, 9.0, 6.0, 6.5]), Metric::FeelSupported);
        assert_eq!(result.delta, 0.5);
        assert_eq!(result.direction, TrendDirection::Up);
    }

    #[test]
    fn test_short_history_is_flat() {
        assert_eq!(trend(&[], Metric::FeelSupported), Trend::flat());
        assert_eq!(trend(&weeks(&[9.0]), Metric::FeelSupported), Trend::flat());
    }

    #[test]
    fn test_arrows() {
        assert_eq!(TrendDirection::Up.arrow(), "↑");
        assert_eq!(TrendDirection::Down.arrow(), "↓");
        assert_eq!(TrendDirection::Flat.arrow(), "→");
    }
}
