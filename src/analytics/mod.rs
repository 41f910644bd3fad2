//! Survey analytics.
//!
//! Pure functions over materialised survey data: weekly aggregation,
//! rolling averages, trends, and the per-metric summaries built from them.

pub mod aggregator;
pub mod rolling;
pub mod trend;

pub use aggregator::weekly_aggregates;
pub use rolling::{rolling_average, DEFAULT_WINDOW};
pub use trend::{trend, Trend};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Metric, SurveyResponse, WeeklyAggregate};

/// Headline numbers for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub metric: Metric,
    /// Most recent weekly mean, `0.0` without data.
    pub latest: f64,
    pub rolling_average: f64,
    pub trend: Trend,
}

/// Summarise every metric over the aggregated weeks.
pub fn summarize(aggregates: &[WeeklyAggregate], window: usize) -> Vec<MetricSummary> {
    Metric::ALL
        .iter()
        .map(|metric| MetricSummary {
            metric: *metric,
            latest: aggregates.last().map(|w| w.mean(*metric)).unwrap_or(0.0),
            rolling_average: rolling_average(aggregates, *metric, window),
            trend: trend(aggregates, *metric),
        })
        .collect()
}

/// A feedback comment from the most recent week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub name: String,
    pub feedback: String,
}

/// Feedback left during the most recent week that has responses.
pub fn recent_feedback(responses: &[SurveyResponse]) -> Option<(NaiveDate, Vec<FeedbackEntry>)> {
    let latest = responses.iter().map(|r| r.week_ending).max()?;

    let entries = responses
        .iter()
        .filter(|r| r.week_ending == latest)
        .filter_map(|r| {
            r.feedback_text().map(|text| FeedbackEntry {
                name: r.name.clone(),
                feedback: text.to_string(),
            })
        })
        .collect();

    Some((latest, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::trend::TrendDirection;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_responses() -> Vec<SurveyResponse> {
        vec![
            SurveyResponse::new("Max", date(2025, 1, 6), [5; Metric::COUNT], Utc::now())
                .with_rating(Metric::WeekQuality, 6),
            SurveyResponse::new("Pavel", date(2025, 1, 6), [5; Metric::COUNT], Utc::now())
                .with_rating(Metric::WeekQuality, 8)
                .with_feedback("Too many meetings"),
            SurveyResponse::new("Vahid", date(2025, 1, 13), [5; Metric::COUNT], Utc::now())
                .with_rating(Metric::WeekQuality, 7)
                .with_feedback("Good pairing session"),
            SurveyResponse::new("Daphne", date(2025, 1, 13), [5; Metric::COUNT], Utc::now())
                .with_rating(Metric::WeekQuality, 7),
        ]
    }

    #[test]
    fn test_summarize_covers_every_metric() {
        let aggregates = weekly_aggregates(&sample_responses());
        let summaries = summarize(&aggregates, DEFAULT_WINDOW);

        assert_eq!(summaries.len(), Metric::COUNT);
        let quality = summaries
            .iter()
            .find(|s| s.metric == Metric::WeekQuality)
            .unwrap();
        assert_eq!(quality.latest, 7.0);
        assert_eq!(quality.rolling_average, 7.0);
        assert_eq!(quality.trend.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_summarize_without_data() {
        let summaries = summarize(&[], DEFAULT_WINDOW);
        assert_eq!(summaries.len(), Metric::COUNT);
        for summary in summaries {
            assert_eq!(summary.latest, 0.0);
            assert_eq!(summary.rolling_average, 0.0);
            assert_eq!(summary.trend, Trend::flat());
        }
    }

    #[test]
    fn test_recent_feedback_uses_latest_week() {
        let (week, entries) = recent_feedback(&sample_responses()).unwrap();
        assert_eq!(week, date(2025, 1, 13));
        assert_eq!(
            entries,
            vec![FeedbackEntry {
                name: "Vahid".to_string(),
                feedback: "Good pairing session".to_string(),
            }]
        );
    }

    #[test]
    fn test_recent_feedback_empty() {
        assert!(recent_feedback(&[]).is_none());
    }
}
