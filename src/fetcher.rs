//! Single-attempt HTTP fetching
//!
//! A [`Fetcher`] performs exactly one bounded network attempt per call and
//! classifies the outcome for the retry controller. The deadline discipline
//! lives in the `reqwest` client: a connect timeout for dialing and a total
//! request timeout covering headers and body, so a hung target can never
//! stall an attempt past its budget.

use crate::config::FetchConfig;
use crate::error::{Error, FetchError, Result};

/// HTTP fetcher built once from [`FetchConfig`] and shared by all workers
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build the fetcher and its underlying HTTP client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the TLS backend or connection pool cannot
    /// be initialized.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }

    /// Perform one fetch attempt against `url`
    ///
    /// Returns the body size in bytes on success. Failure classification:
    /// - transport/connect/timeout error → [`FetchError::Transport`] (retryable)
    /// - non-success status → [`FetchError::Status`] (retryable); the body is
    ///   drained first so the connection is released back to the pool
    /// - body read failure after a success status → [`FetchError::Body`]
    ///   (fatal — a torn read is not retried)
    pub async fn fetch_once(&self, url: &str) -> std::result::Result<u64, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // Drain before returning so keep-alive connections are reusable
            let _ = response.bytes().await;
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        Ok(body.len() as u64)
    }
}
