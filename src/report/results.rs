//! Survey results report generation.
//!
//! This module turns aggregated survey data into Markdown or JSON
//! reports for the team.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::analytics::{self, FeedbackEntry, MetricSummary};
use crate::models::{Metric, SurveyResponse, WeeklyAggregate};
use crate::week::week_label;

/// Feedback comments from the most recent week.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFeedback {
    pub week_ending: NaiveDate,
    pub entries: Vec<FeedbackEntry>,
}

/// Everything the results view shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsReport {
    pub generated_at: DateTime<Utc>,
    /// Rolling-average window in weeks.
    pub window: usize,
    pub total_responses: usize,
    pub weeks: Vec<WeeklyAggregate>,
    pub summaries: Vec<MetricSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_feedback: Option<RecentFeedback>,
}

impl ResultsReport {
    /// Builds the report from raw responses.
    pub fn build(
        responses: &[SurveyResponse],
        window: usize,
        include_feedback: bool,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let weeks = analytics::weekly_aggregates(responses);
        let summaries = analytics::summarize(&weeks, window);

        let recent_feedback = if include_feedback {
            analytics::recent_feedback(responses)
                .filter(|(_, entries)| !entries.is_empty())
                .map(|(week_ending, entries)| RecentFeedback {
                    week_ending,
                    entries,
                })
        } else {
            None
        };

        Self {
            generated_at,
            window,
            total_responses: responses.len(),
            weeks,
            summaries,
            recent_feedback,
        }
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &ResultsReport) -> String {
    let mut output = String::new();

    output.push_str("# Team health metrics over time\n\n");

    if report.weeks.is_empty() {
        output.push_str("No survey responses yet.\n\n");
        output.push_str(&generate_footer(report));
        return output;
    }

    output.push_str(&generate_overview_section(report));
    output.push_str(&generate_summary_section(&report.summaries, report.window));
    output.push_str(&generate_weekly_section(&report.weeks));

    if let Some(ref feedback) = report.recent_feedback {
        output.push_str(&generate_feedback_section(feedback));
    }

    output.push_str(&generate_footer(report));
    output
}

fn generate_overview_section(report: &ResultsReport) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Responses:** {}\n", report.total_responses));
    section.push_str(&format!("- **Weeks:** {}\n", report.weeks.len()));
    if let (Some(first), Some(last)) = (report.weeks.first(), report.weeks.last()) {
        section.push_str(&format!(
            "- **Range:** {} to {}\n",
            first.week_ending, last.week_ending
        ));
    }
    section.push('\n');

    section
}

fn generate_summary_section(summaries: &[MetricSummary], window: usize) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!(
        "| Metric | Latest | {}-week average | Trend |\n",
        window
    ));
    section.push_str("|--------|--------|----------------|-------|\n");

    for summary in summaries {
        section.push_str(&format!(
            "| {} | {:.1} | {:.1} | {} {:.1} |\n",
            summary.metric.label(),
            summary.latest,
            summary.rolling_average,
            summary.trend.direction.arrow(),
            summary.trend.delta.abs()
        ));
    }
    section.push('\n');

    section
}

fn generate_weekly_section(weeks: &[WeeklyAggregate]) -> String {
    let mut section = String::new();

    section.push_str("## Weekly means\n\n");
    section.push_str("| Week | Responses |");
    for metric in Metric::ALL {
        section.push_str(&format!(" {} |", metric.label()));
    }
    section.push('\n');

    section.push_str("|------|-----------|");
    for _ in Metric::ALL {
        section.push_str("---|");
    }
    section.push('\n');

    for week in weeks {
        section.push_str(&format!("| {} | {} |", week.week_ending, week.count));
        for metric in Metric::ALL {
            section.push_str(&format!(" {:.1} |", week.mean(metric)));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

fn generate_feedback_section(feedback: &RecentFeedback) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "## Recent feedback ({})\n\n",
        week_label(feedback.week_ending)
    ));
    for entry in &feedback.entries {
        section.push_str(&format!("- **{}:** {}\n", entry.name, entry.feedback));
    }
    section.push('\n');

    section
}

fn generate_footer(report: &ResultsReport) -> String {
    format!(
        "---\n\n*Generated {}*\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &ResultsReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn responses() -> Vec<SurveyResponse> {
        vec![
            SurveyResponse::new("Max", date(2025, 1, 5), [5; Metric::COUNT], Utc::now())
                .with_rating(Metric::WeekQuality, 5),
            SurveyResponse::new("Pavel", date(2025, 1, 12), [6; Metric::COUNT], Utc::now())
                .with_rating(Metric::WeekQuality, 8)
                .with_feedback("Release went smoothly"),
        ]
    }

    #[test]
    fn test_build_report() {
        let report = ResultsReport::build(&responses(), 3, true, Utc::now());

        assert_eq!(report.total_responses, 2);
        assert_eq!(report.weeks.len(), 2);
        assert_eq!(report.summaries.len(), Metric::COUNT);
        let feedback = report.recent_feedback.as_ref().unwrap();
        assert_eq!(feedback.week_ending, date(2025, 1, 12));
        assert_eq!(feedback.entries.len(), 1);
    }

    #[test]
    fn test_feedback_can_be_left_out() {
        let report = ResultsReport::build(&responses(), 3, false, Utc::now());
        assert!(report.recent_feedback.is_none());
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = ResultsReport::build(&responses(), 3, true, Utc::now());
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Team health metrics over time"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("3-week average"));
        assert!(markdown.contains("| Week quality | 8.0 | 6.5 | ↑ 3.0 |"));
        assert!(markdown.contains("| 2025-01-05 | 1 |"));
        assert!(markdown.contains("## Recent feedback (Week ending 12 Jan)"));
        assert!(markdown.contains("- **Pavel:** Release went smoothly"));
    }

    #[test]
    fn test_markdown_report_without_responses() {
        let report = ResultsReport::build(&[], 3, true, Utc::now());
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("No survey responses yet."));
        assert!(!markdown.contains("## Summary"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = ResultsReport::build(&responses(), 3, true, Utc::now());
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"weeks\""));
        assert!(json.contains("\"summaries\""));
        assert!(json.contains("\"weekQuality\""));
        assert!(json.contains("\"direction\": \"up\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalResponses"], 2);
        assert_eq!(value["weeks"][0]["weekEnding"], "2025-01-05");
        assert_eq!(value["summaries"][0]["rollingAverage"], 5.5);
        assert_eq!(value["recentFeedback"]["weekEnding"], "2025-01-12");
        assert!(value.get("total_responses").is_none());
    }
}
