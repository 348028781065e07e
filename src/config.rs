//! Configuration types for batchfetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for the fetch pipeline
///
/// Fields are organized into logical sub-configs:
/// - [`fetch`](FetchConfig) — per-attempt HTTP deadlines
/// - [`retry`](RetryConfig) — attempt budget and inter-attempt delay
///
/// Sub-config fields are flattened for serialization, so the JSON/TOML format
/// stays flat (no nesting). The struct is immutable once constructed and is
/// passed into the pipeline by value; there is no process-wide mutable state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Number of concurrent workers draining the queue (default: 10)
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Capacity of the bounded work queue (default: 100)
    ///
    /// The producer blocks on enqueue when the queue is full, bounding the
    /// memory held by pending candidates.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Per-attempt HTTP deadlines
    #[serde(flatten)]
    pub fetch: FetchConfig,

    /// Retry behavior for transient failures
    #[serde(flatten)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            queue_capacity: default_queue_capacity(),
            fetch: FetchConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning the first problem found
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a bound that must be at least 1 is zero.
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(Error::config(
                "pool_size must be at least 1",
                Some("pool_size"),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(Error::config(
                "queue_capacity must be at least 1",
                Some("queue_capacity"),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::config(
                "max_attempts must be at least 1 (it includes the first attempt)",
                Some("max_attempts"),
            ));
        }
        Ok(())
    }
}

/// Per-attempt HTTP deadline configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total budget for one attempt, including the body read (default: 5s)
    ///
    /// This is a per-attempt deadline, not a per-candidate total; a candidate
    /// that retries can take up to `max_attempts * request_timeout` plus the
    /// inter-attempt delays.
    #[serde(default = "default_request_timeout", with = "duration_ms_serde")]
    pub request_timeout: Duration,

    /// Deadline for establishing the connection (default: 1s)
    #[serde(default = "default_connect_timeout", with = "duration_ms_serde")]
    pub connect_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

/// Retry configuration for transient fetch failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, inclusive of the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts (default: 200ms)
    #[serde(default = "default_retry_delay", with = "duration_ms_serde")]
    pub retry_delay: Duration,

    /// Add random jitter to the delay (default: false)
    ///
    /// When enabled, each delay is stretched by a uniform factor up to 2x to
    /// avoid synchronized retries against a struggling target.
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay: default_retry_delay(),
            jitter: false,
        }
    }
}

fn default_pool_size() -> usize {
    10
}

fn default_queue_capacity() -> usize {
    100
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(1)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> Duration {
    Duration::from_millis(200)
}

/// Duration serialization helper (milliseconds)
pub(crate) mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.fetch.request_timeout, Duration::from_secs(5));
        assert_eq!(config.fetch.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.retry_delay, Duration::from_millis(200));
        assert!(!config.retry.jitter);
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.retry_delay, Duration::from_millis(200));
    }

    #[test]
    fn durations_round_trip_as_milliseconds() {
        let config = Config {
            retry: RetryConfig {
                retry_delay: Duration::from_millis(350),
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"retry_delay\":350"), "json was: {json}");

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.retry.retry_delay, Duration::from_millis(350));
    }

    #[test]
    fn flattened_fields_deserialize_from_flat_json() {
        let config: Config =
            serde_json::from_str(r#"{"pool_size": 4, "request_timeout": 1000, "max_attempts": 5}"#)
                .unwrap();
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.fetch.request_timeout, Duration::from_secs(1));
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn validate_rejects_zero_pool_size() {
        let config = Config {
            pool_size: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pool_size"));
    }

    #[test]
    fn validate_rejects_zero_queue_capacity() {
        let config = Config {
            queue_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_attempts() {
        let config = Config {
            retry: RetryConfig {
                max_attempts: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
