//! Roster and survey persistence collaborators.
//!
//! The core never reads storage directly: callers fetch through these traits
//! and hand the materialised data over. Fetch failures go through the
//! explicit fallback policies below instead of being swallowed.

pub mod json_file;

pub use json_file::JsonFileStore;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{Participant, SurveyResponse};

/// Source of the team roster.
pub trait RosterSource {
    fn fetch_roster(&self) -> Result<Vec<Participant>, StoreError>;
}

/// Append-only store of survey responses.
pub trait SurveyStore {
    fn fetch_responses(&self) -> Result<Vec<SurveyResponse>, StoreError>;

    /// Persists one response. Failures are returned as-is; nothing retries.
    fn append_response(&self, response: &SurveyResponse) -> Result<(), StoreError>;

    /// Replaces every stored response with `responses`.
    fn replace_responses(&self, responses: &[SurveyResponse]) -> Result<(), StoreError>;
}

/// Where a resolved roster came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOrigin {
    Fetched,
    Fallback { reason: String },
}

/// Roster ready for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoster {
    pub members: Vec<Participant>,
    pub origin: RosterOrigin,
}

/// Use the fetched roster, or `fallback` when it failed or came back empty.
pub fn resolve_roster(
    fetched: Result<Vec<Participant>, StoreError>,
    fallback: &[Participant],
) -> ResolvedRoster {
    let failure = match fetched {
        Ok(members) if !members.is_empty() => {
            debug!("Roster loaded with {} members", members.len());
            return ResolvedRoster {
                members,
                origin: RosterOrigin::Fetched,
            };
        }
        Ok(_) => StoreError::RosterUnavailable {
            reason: "roster is empty".to_string(),
        },
        Err(e) => e,
    };

    warn!("{}; using {} default members", failure, fallback.len());
    ResolvedRoster {
        members: fallback.to_vec(),
        origin: RosterOrigin::Fallback {
            reason: failure.to_string(),
        },
    }
}

/// Treat a failed response fetch as having no responses.
pub fn responses_or_empty(fetched: Result<Vec<SurveyResponse>, StoreError>) -> Vec<SurveyResponse> {
    fetched.unwrap_or_else(|e| {
        warn!("{}; continuing without survey data", e);
        Vec::new()
    })
}
