//! Error types for batchfetch
//!
//! Two layers of errors live here:
//! - [`Error`]: crate-level failures (bad configuration, I/O on the input
//!   source, client construction). These abort a run before or outside the
//!   per-candidate pipeline.
//! - [`FetchError`]: the classified outcome of a single fetch attempt. These
//!   never escalate past the worker processing the candidate; the retry
//!   controller decides whether to try again.

use thiserror::Error;

/// Result type alias for batchfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "pool_size")
        key: Option<String>,
    },

    /// Failed to construct the HTTP client
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// I/O error (input source reading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The work queue was closed before the producer finished
    ///
    /// Only reachable if every worker exits while candidates remain, which
    /// indicates a pool configured with zero workers or a runtime shutdown.
    #[error("work queue closed: all consumers exited")]
    QueueClosed,
}

impl Error {
    /// Convenience constructor for configuration errors
    pub fn config(message: impl Into<String>, key: Option<&str>) -> Self {
        Error::Config {
            message: message.into(),
            key: key.map(String::from),
        }
    }
}

/// Classified failure of one fetch attempt
///
/// The variant decides retry eligibility (see `IsRetryable` in the retry
/// module): transport and status failures are transient, a torn body read
/// after a success status is permanent.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure before a response arrived
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("unexpected status code: {0}")]
    Status(reqwest::StatusCode),

    /// The status was a success but the body could not be fully read
    #[error("body read failed: {0}")]
    Body(#[source] reqwest::Error),
}
