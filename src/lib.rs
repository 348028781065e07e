//! # batchfetch
//!
//! Bounded-concurrency URL fetcher: candidates enter a bounded work queue, a
//! fixed pool of workers drains it, and each candidate is independently
//! validated, fetched with a per-attempt timeout, retried on transient
//! failure, and reported.
//!
//! ## Design Philosophy
//!
//! - **Bounded everywhere** - fixed worker pool, bounded queue with producer
//!   backpressure, bounded retry budget, per-attempt deadline
//! - **Failure isolation** - one bad target never stalls or aborts the batch;
//!   every candidate ends in exactly one reported result
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding;
//!   reporting is a pluggable sink
//!
//! ## Quick Start
//!
//! ```no_run
//! use batchfetch::{BatchFetcher, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = BatchFetcher::new(Config::default())?;
//!
//!     fetcher
//!         .run(vec![
//!             "http://example.com/a".to_string(),
//!             "http://example.com/b".to_string(),
//!         ])
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Results go to the console by default; use [`BatchFetcher::with_sink`] and
//! a [`ChannelSink`] or [`JsonLinesSink`] for programmatic consumption.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Single-attempt HTTP fetching
pub mod fetcher;
/// Line-oriented input source
pub mod input;
/// Pipeline orchestration (worker pool, lifecycle)
pub mod pipeline;
/// Bounded work queue
pub mod queue;
/// Retry logic for transient failures
pub mod retry;
/// Report sinks
pub mod sink;
/// Core result types
pub mod types;
/// Candidate validation
pub mod validator;

// Re-export commonly used types
pub use config::{Config, FetchConfig, RetryConfig};
pub use error::{Error, FetchError, Result};
pub use fetcher::Fetcher;
pub use input::LineSource;
pub use pipeline::BatchFetcher;
pub use queue::{Producer, WorkQueue, work_queue};
pub use retry::{IsRetryable, RetryOutcome, run_with_retry};
pub use sink::{ChannelSink, ConsoleSink, JsonLinesSink, ReportSink};
pub use types::{FetchResult, Outcome};
