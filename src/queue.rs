//! Bounded work queue
//!
//! A FIFO conduit between the single producer and the worker pool, built on a
//! bounded `tokio::sync::mpsc` channel. The producer blocks on [`Producer::enqueue`]
//! when the queue is full (backpressure); workers block on [`WorkQueue::dequeue`]
//! when it is empty. Closing is done by consuming the producer, so double-close
//! and enqueue-after-close cannot be written.

use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Create a bounded work queue with the given capacity
///
/// Capacity is fixed for the lifetime of the queue. Panics are avoided by the
/// caller validating capacity >= 1 (`Config::validate`); `mpsc::channel`
/// itself requires a non-zero buffer.
pub fn work_queue(capacity: usize) -> (Producer, WorkQueue) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        Producer { tx },
        WorkQueue {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer half of the work queue
///
/// Deliberately not `Clone`: a single producer enqueues all candidates and
/// closes the queue exactly once, after the last enqueue.
#[derive(Debug)]
pub struct Producer {
    tx: mpsc::Sender<String>,
}

impl Producer {
    /// Enqueue a candidate, waiting while the queue is full
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueClosed`] if every consumer has been dropped,
    /// which means no worker will ever take the item.
    pub async fn enqueue(&self, candidate: String) -> Result<()> {
        self.tx
            .send(candidate)
            .await
            .map_err(|_| Error::QueueClosed)
    }

    /// Close the queue
    ///
    /// Consumes the producer; workers drain the remaining items and then
    /// observe end-of-stream.
    pub fn close(self) {
        drop(self.tx);
    }
}

/// Consumer half of the work queue, shared by all workers
#[derive(Clone, Debug)]
pub struct WorkQueue {
    rx: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl WorkQueue {
    /// Take the next candidate, waiting while the queue is empty
    ///
    /// Returns `None` only after the producer has closed the queue and all
    /// enqueued items have been taken. Each item is delivered to exactly one
    /// caller; handout order matches enqueue order.
    pub async fn dequeue(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn dequeue_order_matches_enqueue_order() {
        let (producer, queue) = work_queue(10);
        for i in 0..5 {
            producer.enqueue(format!("item-{i}")).await.unwrap();
        }
        producer.close();

        for i in 0..5 {
            assert_eq!(queue.dequeue().await.unwrap(), format!("item-{i}"));
        }
        assert_eq!(queue.dequeue().await, None);
    }

    #[tokio::test]
    async fn dequeue_signals_end_of_stream_after_close_and_drain() {
        let (producer, queue) = work_queue(4);
        producer.enqueue("last".to_string()).await.unwrap();
        producer.close();

        assert_eq!(queue.dequeue().await.as_deref(), Some("last"));
        assert_eq!(queue.dequeue().await, None);
        // End-of-stream is stable, not a one-shot
        assert_eq!(queue.dequeue().await, None);
    }

    #[tokio::test]
    async fn enqueue_blocks_when_full() {
        let (producer, queue) = work_queue(1);
        producer.enqueue("a".to_string()).await.unwrap();

        // The queue is full; the next enqueue must not complete until a
        // consumer makes room
        let mut blocked = tokio_test::task::spawn(producer.enqueue("b".to_string()));
        tokio_test::assert_pending!(blocked.poll());

        assert_eq!(queue.dequeue().await.as_deref(), Some("a"));
        assert!(blocked.await.is_ok());
        assert_eq!(queue.dequeue().await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn each_item_is_delivered_to_exactly_one_consumer() {
        let (producer, queue) = work_queue(100);
        let total = 50;
        for i in 0..total {
            producer.enqueue(format!("item-{i}")).await.unwrap();
        }
        producer.close();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let queue = queue.clone();
            handles.push(tokio::spawn(async move {
                let mut taken = Vec::new();
                while let Some(item) = queue.dequeue().await {
                    taken.push(item);
                }
                taken
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for item in handle.await.unwrap() {
                assert!(seen.insert(item), "item delivered twice");
            }
        }
        assert_eq!(seen.len(), total);
    }

    #[tokio::test]
    async fn enqueue_fails_when_all_consumers_are_gone() {
        let (producer, queue) = work_queue(2);
        drop(queue);

        let err = producer.enqueue("orphan".to_string()).await.unwrap_err();
        assert!(matches!(err, Error::QueueClosed));
    }
}
