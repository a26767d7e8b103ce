use std::fmt;

use crate::services::ServiceError;

/// Which collaborator call a transport failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scrape,
    Derive,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Scrape => write!(f, "scrape"),
            Phase::Derive => write!(f, "persona"),
        }
    }
}

/// Why a run ended in failure. Logged in full; users only see one generic message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisFailure {
    #[error("No activity to analyze ({posts} posts, {comments} comments)")]
    NoData { posts: usize, comments: usize },

    #[error("The {phase} call failed: {reason}")]
    TransportFailure { phase: Phase, reason: String },

    #[error("Persona generation returned HTTP {status}")]
    DerivationFailed { status: u16 },
}

impl AnalysisFailure {
    pub(crate) fn from_service(phase: Phase, err: ServiceError) -> Self {
        match (phase, err) {
            (Phase::Derive, ServiceError::Status { status, .. }) => {
                AnalysisFailure::DerivationFailed { status }
            }
            (phase, err) => AnalysisFailure::TransportFailure {
                phase,
                reason: err.to_string(),
            },
        }
    }
}

/// Why a call to `run_analysis` did nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    EmptyHandle,
    Busy,
}
