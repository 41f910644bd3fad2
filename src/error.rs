//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::Metric;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures reported by the roster and survey collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The roster could not be read, or it was empty.
    #[error("roster unavailable: {reason}")]
    RosterUnavailable { reason: String },

    /// Survey responses could not be read.
    #[error("failed to fetch survey responses from {}", path.display())]
    ResponseFetchFailure {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// A survey response could not be written.
    #[error("failed to write survey response to {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

/// Input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{metric} rating {value} is outside 1..=10")]
    InvalidRating { metric: Metric, value: u8 },

    #[error("respondent name must not be empty")]
    EmptyName,
}
