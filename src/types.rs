//! Core result types for batchfetch

use crate::config::duration_ms_serde;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal result for one candidate after the retry loop ends
///
/// Exactly one `FetchResult` is reported per candidate taken from the work
/// queue, regardless of how many attempts were made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// The candidate string as it was taken from the queue
    pub candidate: String,
    /// What happened to it
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FetchResult {
    /// Create a result for a candidate
    pub fn new(candidate: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            candidate: candidate.into(),
            outcome,
        }
    }
}

/// Terminal outcome of processing one candidate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Outcome {
    /// The fetch succeeded within the attempt budget
    Succeeded {
        /// Size of the fully read response body, in bytes
        bytes: u64,
        /// Wall-clock time from the start of the first attempt, so the value
        /// reflects the total user-visible cost including retry delays
        #[serde(with = "duration_ms_serde")]
        elapsed: Duration,
        /// Number of attempts made, including the successful one
        attempts: u32,
    },
    /// The retry budget was exhausted, or a fatal failure stopped retries
    GaveUp {
        /// Number of attempts made before giving up
        attempts: u32,
        /// The last attempt's failure, as a human-readable string
        reason: String,
    },
    /// The candidate failed validation; no network attempt was made
    Rejected {
        /// Why the candidate was rejected
        reason: String,
    },
}

impl Outcome {
    /// True if the candidate was fetched successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    /// Number of network attempts made for this candidate
    pub fn attempts(&self) -> u32 {
        match self {
            Outcome::Succeeded { attempts, .. } | Outcome::GaveUp { attempts, .. } => *attempts,
            Outcome::Rejected { .. } => 0,
        }
    }
}
