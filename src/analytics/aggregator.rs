//! Weekly grouping of survey responses.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Metric, SurveyResponse, WeeklyAggregate};

/// Group responses by week and average every metric.
///
/// Output is ordered by ascending `week_ending`; no responses means no weeks.
pub fn weekly_aggregates(responses: &[SurveyResponse]) -> Vec<WeeklyAggregate> {
    let grouped = group_by_week(responses);

    let aggregates: Vec<WeeklyAggregate> = grouped
        .into_iter()
        .map(|(week_ending, week)| {
            let means = Metric::ALL
                .iter()
                .map(|metric| (*metric, mean_rating(&week, *metric)))
                .collect();

            WeeklyAggregate {
                week_ending,
                means,
                count: week.len(),
            }
        })
        .collect();

    debug!(
        "Aggregated {} responses into {} weeks",
        responses.len(),
        aggregates.len()
    );
    aggregates
}

/// Group responses by their week key, in date order.
pub fn group_by_week(responses: &[SurveyResponse]) -> BTreeMap<NaiveDate, Vec<&SurveyResponse>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&SurveyResponse>> = BTreeMap::new();

    for response in responses {
        grouped.entry(response.week_ending).or_default().push(response);
    }

    grouped
}

fn mean_rating(responses: &[&SurveyResponse], metric: Metric) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }

    let total: u32 = responses.iter().map(|r| u32::from(r.rating(metric))).sum();
    f64::from(total) / responses.len() as f64
}
