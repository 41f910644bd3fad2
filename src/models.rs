//! Data models for the stand-up and survey tooling.
//!
//! This module contains the shared data structures: roster participants,
//! the survey metrics, raw survey responses and the weekly aggregates
//! derived from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValidationError;

/// Lowest accepted rating on the survey scale.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating on the survey scale.
pub const MAX_RATING: u8 = 10;

/// A member of the team roster, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One of the seven rated survey questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Share of the week spent blocked
    BlockedPercentage,
    /// How supported the respondent felt
    FeelSupported,
    /// Perceived workload
    Workload,
    /// How much the respondent learned
    LearnedNewSkills,
    /// Productivity of meetings
    MeetingProductivity,
    /// Productivity of focused solo work
    SoloProductivity,
    /// Overall quality of the week
    WeekQuality,
}

impl Metric {
    pub const COUNT: usize = 7;

    /// Every metric, in survey order.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::BlockedPercentage,
        Metric::FeelSupported,
        Metric::Workload,
        Metric::LearnedNewSkills,
        Metric::MeetingProductivity,
        Metric::SoloProductivity,
        Metric::WeekQuality,
    ];

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::BlockedPercentage => "Blocked percentage",
            Metric::FeelSupported => "Feel supported",
            Metric::Workload => "Workload",
            Metric::LearnedNewSkills => "Learned new skills",
            Metric::MeetingProductivity => "Meeting productivity",
            Metric::SoloProductivity => "Solo productivity",
            Metric::WeekQuality => "Week quality",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single weekly survey submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    /// Name of the respondent.
    pub name: String,
    /// Sunday closing the reported week.
    pub week_ending: NaiveDate,
    pub blocked_percentage: u8,
    pub feel_supported: u8,
    pub workload: u8,
    pub learned_new_skills: u8,
    pub meeting_productivity: u8,
    pub solo_productivity: u8,
    pub week_quality: u8,
    /// Optional free-text feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// When the response was created.
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl SurveyResponse {
    /// Creates a response from ratings given in [`Metric::ALL`] order.
    pub fn new(
        name: impl Into<String>,
        week_ending: NaiveDate,
        ratings: [u8; Metric::COUNT],
        created_at: DateTime<Utc>,
    ) -> Self {
        let [
            blocked_percentage,
            feel_supported,
            workload,
            learned_new_skills,
            meeting_productivity,
            solo_productivity,
            week_quality,
        ] = ratings;

        Self {
            name: name.into(),
            week_ending,
            blocked_percentage,
            feel_supported,
            workload,
            learned_new_skills,
            meeting_productivity,
            solo_productivity,
            week_quality,
            feedback: None,
            created_at,
        }
    }

    /// Attaches free-text feedback; blank text is dropped.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        let feedback = feedback.into();
        self.feedback = if feedback.trim().is_empty() {
            None
        } else {
            Some(feedback)
        };
        self
    }

    /// Replaces a single rating while the response is being built.
    #[cfg(test)]
    pub fn with_rating(mut self, metric: Metric, value: u8) -> Self {
        *self.rating_mut(metric) = value;
        self
    }

    /// Returns the rating given for a metric.
    pub fn rating(&self, metric: Metric) -> u8 {
        match metric {
            Metric::BlockedPercentage => self.blocked_percentage,
            Metric::FeelSupported => self.feel_supported,
            Metric::Workload => self.workload,
            Metric::LearnedNewSkills => self.learned_new_skills,
            Metric::MeetingProductivity => self.meeting_productivity,
            Metric::SoloProductivity => self.solo_productivity,
            Metric::WeekQuality => self.week_quality,
        }
    }

    #[cfg(test)]
    fn rating_mut(&mut self, metric: Metric) -> &mut u8 {
        match metric {
            Metric::BlockedPercentage => &mut self.blocked_percentage,
            Metric::FeelSupported => &mut self.feel_supported,
            Metric::Workload => &mut self.workload,
            Metric::LearnedNewSkills => &mut self.learned_new_skills,
            Metric::MeetingProductivity => &mut self.meeting_productivity,
            Metric::SoloProductivity => &mut self.solo_productivity,
            Metric::WeekQuality => &mut self.week_quality,
        }
    }

    /// Feedback text, ignoring blank entries.
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Checks the response before it is handed to a store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        for metric in Metric::ALL {
            let value = self.rating(metric);
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(ValidationError::InvalidRating { metric, value });
            }
        }

        Ok(())
    }
}

/// Per-week means of every metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAggregate {
    /// Week key shared by every response in the group.
    pub week_ending: NaiveDate,
    /// Arithmetic mean of each metric over the group.
    pub means: BTreeMap<Metric, f64>,
    /// Number of responses in the group.
    pub count: usize,
}

impl WeeklyAggregate {
    /// Mean for a metric, `0.0` if the metric is absent.
    pub fn mean(&self, metric: Metric) -> f64 {
        self.means.get(&metric).copied().unwrap_or(0.0)
    }
}
