//! Candidate validation
//!
//! A [`Validator`] is a pure structural predicate: it decides whether a
//! candidate string is shaped like a fetchable URL before any network effort
//! is spent. Acceptance never implies the target is live.

use crate::error::{Error, Result};
use regex::Regex;

/// Pattern accepted by [`Validator::new`]: optional scheme, optional `www.`,
/// lowercase host labels, optional path segments.
const DEFAULT_URL_PATTERN: &str = r"^((https?)://)?(www\.)?[a-z0-9]+\.[a-z]+(/[a-zA-Z0-9#]+/?)*$";

/// Structural URL validator, compiled once and shared by all workers
#[derive(Clone, Debug)]
pub struct Validator {
    pattern: Regex,
}

impl Validator {
    /// Create a validator with the default URL pattern
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the pattern fails to compile; with the
    /// built-in pattern this does not happen in practice, but the error path
    /// is kept so custom patterns and the default share one code path.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_URL_PATTERN)
    }

    /// Create a validator with a custom pattern
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `pattern` is not a valid regex.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::config(
                format!("invalid validation pattern: {e}"),
                Some("validation_pattern"),
            )
        })?;
        Ok(Self { pattern })
    }

    /// Classify a candidate as well-formed or rejected
    ///
    /// Pure shape check: no I/O, no side effects, any input length or
    /// encoding is safe to pass.
    pub fn validate(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}
