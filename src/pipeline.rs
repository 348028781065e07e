//! Pipeline orchestration: worker pool and lifecycle coordination
//!
//! [`BatchFetcher`] wires the components together. `run` spawns a fixed pool
//! of workers draining the shared work queue, feeds the queue from the
//! candidate source (blocking on backpressure when it is full), closes the
//! queue after the last enqueue, and returns only once every worker has
//! observed end-of-stream and finished its current candidate. Per-candidate
//! failure never escalates: a worker only terminates when the queue drains.

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::input::LineSource;
use crate::queue::{Producer, WorkQueue, work_queue};
use crate::retry::{RetryOutcome, run_with_retry};
use crate::sink::{ConsoleSink, ReportSink};
use crate::types::{FetchResult, Outcome};
use crate::validator::Validator;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Reason string used for candidates that fail structural validation
const REJECT_REASON: &str = "does not match url pattern";

/// Bounded-concurrency fetch pipeline (cloneable - all fields are shared or cheap)
#[derive(Clone)]
pub struct BatchFetcher {
    /// Immutable configuration, constructed once and shared across workers
    config: Arc<Config>,
    /// HTTP fetcher (one client, shared connection pool)
    fetcher: Fetcher,
    /// Structural candidate validator
    validator: Validator,
    /// Destination for terminal results
    sink: Arc<dyn ReportSink>,
}

impl BatchFetcher {
    /// Create a pipeline reporting to the console
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_sink(config, Arc::new(ConsoleSink))
    }

    /// Create a pipeline reporting to a custom sink
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn with_sink(config: Config, sink: Arc<dyn ReportSink>) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(&config.fetch)?;
        let validator = Validator::new()?;
        Ok(Self {
            config: Arc::new(config),
            fetcher,
            validator,
            sink,
        })
    }

    /// Replace the default validation pattern
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn with_validation_pattern(mut self, pattern: &str) -> Result<Self> {
        self.validator = Validator::with_pattern(pattern)?;
        Ok(self)
    }

    /// Fetch every candidate from an in-memory sequence
    ///
    /// Spawns the worker pool, enqueues all candidates (waiting whenever the
    /// queue is full), closes the queue, and waits for the pool to drain it.
    /// Every candidate produces exactly one report before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error only for pipeline-level failures (queue closed with
    /// no consumers). Per-candidate failures are reported through the sink,
    /// never returned.
    pub async fn run<I>(&self, candidates: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let (producer, queue) = work_queue(self.config.queue_capacity);
        let workers = self.spawn_workers(queue);

        let produced = async {
            for candidate in candidates {
                producer.enqueue(candidate).await?;
            }
            Ok(())
        }
        .await;

        producer.close();
        join_workers(workers).await;
        produced
    }

    /// Fetch every candidate listed in a file, one per line
    ///
    /// Lines are read lazily, so production is paced by queue backpressure
    /// and the file never has to fit in memory. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read. Candidates
    /// enqueued before a read failure are still fully processed.
    pub async fn run_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut source = LineSource::open(path).await?;
        let (producer, queue) = work_queue(self.config.queue_capacity);
        let workers = self.spawn_workers(queue);

        let produced = produce_from_source(&mut source, &producer).await;

        producer.close();
        join_workers(workers).await;
        produced
    }

    /// Spawn exactly `pool_size` workers draining the queue until it closes
    fn spawn_workers(&self, queue: WorkQueue) -> Vec<JoinHandle<()>> {
        (0..self.config.pool_size)
            .map(|worker_id| {
                let queue = queue.clone();
                let pipeline = self.clone();
                tokio::spawn(async move {
                    tracing::debug!(worker_id, "worker started");
                    while let Some(candidate) = queue.dequeue().await {
                        let result = pipeline.process_candidate(candidate).await;
                        pipeline.sink.report(result).await;
                    }
                    tracing::debug!(worker_id, "worker finished, queue drained");
                })
            })
            .collect()
    }

    /// Process one candidate to its terminal result
    ///
    /// Validation gates the fetch: a rejected candidate makes zero network
    /// attempts. Elapsed time on success is measured from the start of the
    /// first attempt, so it includes retry delays.
    async fn process_candidate(&self, candidate: String) -> FetchResult {
        if !self.validator.validate(&candidate) {
            tracing::warn!(url = %candidate, "invalid candidate");
            return FetchResult::new(
                candidate,
                Outcome::Rejected {
                    reason: REJECT_REASON.to_string(),
                },
            );
        }

        let started = Instant::now();
        let outcome =
            run_with_retry(&self.config.retry, || self.fetcher.fetch_once(&candidate)).await;

        match outcome {
            RetryOutcome::Succeeded { value, attempts } => FetchResult::new(
                candidate,
                Outcome::Succeeded {
                    bytes: value,
                    elapsed: started.elapsed(),
                    attempts,
                },
            ),
            RetryOutcome::GaveUp { error, attempts } => FetchResult::new(
                candidate,
                Outcome::GaveUp {
                    attempts,
                    reason: error.to_string(),
                },
            ),
        }
    }
}

/// Drain a line source into the queue, pacing on backpressure
async fn produce_from_source(source: &mut LineSource, producer: &Producer) -> Result<()> {
    while let Some(candidate) = source.next().await? {
        producer.enqueue(candidate).await?;
    }
    Ok(())
}

/// Wait for every worker to observe end-of-stream and return
async fn join_workers(workers: Vec<JoinHandle<()>>) {
    for joined in futures::future::join_all(workers).await {
        // Workers handle all per-candidate failure internally; a join error
        // means the task panicked or the runtime is shutting down
        if let Err(e) = joined {
            tracing::error!(error = %e, "worker task did not finish cleanly");
        }
    }
}
