//! Report sinks
//!
//! Every candidate ends in exactly one [`FetchResult`], delivered to a
//! [`ReportSink`]. The sink is a fire-and-forget seam: swapping console
//! output for structured JSON or a channel never touches retry or fetch
//! logic, and no sink failure propagates back into the pipeline.

use crate::types::{FetchResult, Outcome};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Destination for terminal per-candidate results
///
/// Implementations must be cheap and non-blocking in spirit: the pipeline
/// awaits `report` on the worker that processed the candidate, so a slow sink
/// slows that worker only.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Deliver one terminal result. Fire and forget; must not panic.
    async fn report(&self, result: FetchResult);
}

/// Human-readable console sink
///
/// Successes go to stdout with the payload size and the total processing time
/// (measured from the first attempt). Failures and rejections are logged via
/// `tracing` so they can be filtered separately from payload output.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl ReportSink for ConsoleSink {
    async fn report(&self, result: FetchResult) {
        match &result.outcome {
            Outcome::Succeeded {
                bytes,
                elapsed,
                attempts,
            } => {
                println!("Size of {{{}}}: {} bytes", result.candidate, bytes);
                println!(
                    "Processing time for {{{}}}: {:?} ({} attempt{})",
                    result.candidate,
                    elapsed,
                    attempts,
                    if *attempts == 1 { "" } else { "s" }
                );
                println!();
            }
            Outcome::GaveUp { attempts, reason } => {
                tracing::warn!(
                    url = %result.candidate,
                    attempts,
                    reason = %reason,
                    "gave up on candidate"
                );
            }
            Outcome::Rejected { reason } => {
                tracing::warn!(
                    url = %result.candidate,
                    reason = %reason,
                    "rejected candidate"
                );
            }
        }
    }
}

/// Structured sink: one JSON object per result on stdout
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLinesSink;

#[async_trait]
impl ReportSink for JsonLinesSink {
    async fn report(&self, result: FetchResult) {
        match serde_json::to_string(&result) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                tracing::error!(url = %result.candidate, error = %e, "failed to serialize result");
            }
        }
    }
}

/// Channel-backed sink for embedding and tests
///
/// Results are forwarded on an unbounded channel; if the receiver is gone the
/// result is dropped, matching the no-backpressure sink contract.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<FetchResult>,
}

impl ChannelSink {
    /// Create a sink and the receiver its results arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FetchResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ReportSink for ChannelSink {
    async fn report(&self, result: FetchResult) {
        // Receiver gone means nobody wants the results; drop silently
        let _ = self.tx.send(result);
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_result() -> FetchResult {
        FetchResult::new(
            "http://example.com/a",
            Outcome::Succeeded {
                bytes: 10,
                elapsed: Duration::from_millis(5),
                attempts: 1,
            },
        )
    }

    #[tokio::test]
    async fn channel_sink_forwards_results() {
        let (sink, mut rx) = ChannelSink::new();
        sink.report(sample_result()).await;

        let received = rx.recv().await.unwrap();
        assert_eq!(received.candidate, "http://example.com/a");
        assert!(received.outcome.is_success());
    }

    #[tokio::test]
    async fn channel_sink_drops_results_when_receiver_is_gone() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        // Must not panic or error
        sink.report(sample_result()).await;
    }

    #[tokio::test]
    async fn console_sink_accepts_every_outcome() {
        let sink = ConsoleSink;
        sink.report(sample_result()).await;
        sink.report(FetchResult::new(
            "http://example.com/b",
            Outcome::GaveUp {
                attempts: 3,
                reason: "unexpected status code: 503".to_string(),
            },
        ))
        .await;
        sink.report(FetchResult::new(
            "not a url",
            Outcome::Rejected {
                reason: "does not match url pattern".to_string(),
            },
        ))
        .await;
    }
}
