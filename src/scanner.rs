//! Scan orchestration: a bounded worker pool over a rendezvous channel.
//!
//! Bucket names are handed to workers through a capacity-1 channel, so the
//! producer blocks whenever every worker is busy. That hand-off is the
//! backpressure mechanism: the pool never queues more work than it can
//! start, and input is consumed only as fast as buckets finish. Shutdown is
//! a rendezvous too: the sender is dropped once input is exhausted, each
//! worker drains its in-flight bucket, and the join below waits for all of
//! them.

use std::sync::Arc;

use async_channel::Sender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

use crate::pipeline::ProcessBucket;

pub struct ScanOrchestrator {
    concurrency: usize,
    processor: Arc<dyn ProcessBucket>,
}

impl ScanOrchestrator {
    pub fn new(concurrency: usize, processor: Arc<dyn ProcessBucket>) -> Self {
        Self {
            // A pool of zero workers would deadlock the producer
            concurrency: concurrency.max(1),
            processor,
        }
    }

    /// Spawn the worker pool. Each worker pulls one bucket name at a time
    /// and runs it to completion before pulling the next; the channel
    /// guarantees each name is delivered to exactly one worker. The pool
    /// shuts down when the returned sender is dropped.
    pub fn start(&self) -> (Sender<String>, Vec<JoinHandle<()>>) {
        let (tx, rx) = async_channel::bounded::<String>(1);

        let handles = (0..self.concurrency)
            .map(|worker_id| {
                let rx = rx.clone();
                let processor = Arc::clone(&self.processor);
                tokio::spawn(async move {
                    while let Ok(bucket) = rx.recv().await {
                        tracing::debug!(worker_id, bucket = bucket.as_str(), "scanning bucket");
                        processor.process(&bucket).await;
                    }
                })
            })
            .collect();

        (tx, handles)
    }

    /// Run a full scan over a stream of bucket names, one per line.
    /// Returns once every worker has drained its in-flight bucket.
    pub async fn run<R>(&self, input: R)
    where
        R: AsyncBufRead + Unpin,
    {
        let (tx, handles) = self.start();

        let mut lines = input.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let bucket = line.trim();
                    if bucket.is_empty() {
                        continue;
                    }
                    // Blocks until a worker is free; workers only stop once
                    // the sender is dropped, so this cannot fail here.
                    if tx.send(bucket.to_string()).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "failed to read bucket name from input");
                    break;
                }
            }
        }

        drop(tx);
        for handle in handles {
            let _ = handle.await;
        }
    }
}
