//! Draining shard registration results.
//!
//! Results arrive on a bounded channel while registrations are still being
//! dispatched, so the drain must be running before the first dispatch or the
//! dispatcher stalls once the channel fills. The number of results to wait
//! for is only known after dispatch ends, and arrives on a oneshot.
//!
//! ```text
//!   dispatcher ──register_shard(.., results.clone())──▶ index
//!       │                                                 │
//!       │ finish(total)                     ShardResult   │
//!       ▼                                                 ▼
//!   oneshot<usize> ──────────▶ ResultDrain ◀────── mpsc<ShardResult>
//! ```
//!
//! The drain treats the total as unknown (`usize::MAX`) until the oneshot
//! fires, and stops as soon as it has received that many results, whichever
//! of the two arrives last.

use shardreg_core::ShardResult;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Expected result count before the dispatcher reports the real total.
const TOTAL_UNKNOWN: usize = usize::MAX;

/// What the drain saw before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Results received.
    pub received: usize,
    /// Received results that carried an error.
    pub failed: usize,
}

/// Create a connected feed and drain.
///
/// `capacity` bounds the result channel; zero is treated as one.
pub fn channel(capacity: usize) -> (DrainFeed, ResultDrain) {
    let (results_tx, results_rx) = mpsc::channel(capacity.max(1));
    let (total_tx, total_rx) = oneshot::channel();
    (
        DrainFeed {
            results: results_tx,
            total: total_tx,
        },
        ResultDrain {
            results: results_rx,
            total: total_rx,
        },
    )
}

/// Dispatcher side of the drain.
pub struct DrainFeed {
    results: mpsc::Sender<ShardResult>,
    total: oneshot::Sender<usize>,
}

impl DrainFeed {
    /// Sender to hand to the index with each registration.
    pub fn results(&self) -> mpsc::Sender<ShardResult> {
        self.results.clone()
    }

    /// Report how many registrations were accepted.
    ///
    /// Consumes the feed, so the total can be sent only once. The feed's own
    /// result sender is dropped here; only the index holds senders after this.
    pub fn finish(self, total: usize) {
        if self.total.send(total).is_err() {
            debug!(total, "shard result drain stopped before total was reported");
        }
    }
}

/// Aggregates registration results until the reported total is reached.
pub struct ResultDrain {
    results: mpsc::Receiver<ShardResult>,
    total: oneshot::Receiver<usize>,
}

impl ResultDrain {
    /// Run the drain on its own task.
    pub fn spawn(self) -> JoinHandle<DrainSummary> {
        tokio::spawn(self.run())
    }

    /// Consume results until the total is known and that many have arrived.
    ///
    /// Also stops if the feed is dropped without reporting a total, or if
    /// every result sender is gone while results are still outstanding.
    pub async fn run(self) -> DrainSummary {
        let ResultDrain {
            mut results,
            total: mut total_rx,
        } = self;

        let mut total = TOTAL_UNKNOWN;
        let mut total_known = false;
        let mut results_open = true;
        let mut summary = DrainSummary::default();

        while summary.received < total {
            if total_known && !results_open {
                warn!(
                    received = summary.received,
                    total, "shard result channel closed with results outstanding"
                );
                break;
            }

            tokio::select! {
                reported = &mut total_rx, if !total_known => {
                    total_known = true;
                    match reported {
                        Ok(n) => {
                            debug!(total = n, received = summary.received, "shard registration total known");
                            total = n;
                        }
                        Err(_) => {
                            warn!(
                                received = summary.received,
                                "shard registration dispatcher went away without reporting a total"
                            );
                            break;
                        }
                    }
                }
                res = results.recv(), if results_open => match res {
                    Some(res) => {
                        summary.received += 1;
                        if let Some(err) = res.error {
                            summary.failed += 1;
                            warn!(piece = %res.key, error = %err, "shard migration: failed to register shard");
                        }
                    }
                    None => results_open = false,
                },
            }
        }

        info!(
            received = summary.received,
            failed = summary.failed,
            "shard registration results drained"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardreg_core::RegistrationError;
    use shardreg_test_helpers::piece;
    use std::time::Duration;

    fn ok(label: &str) -> ShardResult {
        ShardResult::success(piece(label))
    }

    fn failed(label: &str) -> ShardResult {
        ShardResult::failure(piece(label), RegistrationError::Failed("boom".into()))
    }

    async fn still_running(task: &JoinHandle<DrainSummary>) -> bool {
        tokio::time::sleep(Duration::from_millis(20)).await;
        !task.is_finished()
    }

    #[tokio::test]
    async fn test_zero_total_finishes_without_results() {
        let (feed, drain) = channel(32);
        let _keep_open = feed.results();
        let task = drain.spawn();

        feed.finish(0);

        assert_eq!(task.await.unwrap(), DrainSummary::default());
    }

    #[tokio::test]
    async fn test_total_before_results() {
        let (feed, drain) = channel(32);
        let tx = feed.results();
        let task = drain.spawn();

        feed.finish(3);
        assert!(still_running(&task).await);

        tx.send(ok("a")).await.unwrap();
        tx.send(failed("b")).await.unwrap();
        assert!(still_running(&task).await, "must wait for the third result");

        tx.send(ok("c")).await.unwrap();
        let summary = task.await.unwrap();
        assert_eq!(
            summary,
            DrainSummary {
                received: 3,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_results_before_total() {
        let (feed, drain) = channel(32);
        let tx = feed.results();
        let task = drain.spawn();

        for label in ["a", "b", "c"] {
            tx.send(ok(label)).await.unwrap();
        }
        assert!(still_running(&task).await, "total not yet known");

        feed.finish(3);
        let summary = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("drain should stop once the total arrives")
            .unwrap();
        assert_eq!(summary.received, 3);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_results_beyond_capacity_do_not_stall() {
        let (feed, drain) = channel(2);
        let task = drain.spawn();

        for i in 0..50 {
            feed.results().send(ok(&format!("p{}", i))).await.unwrap();
        }
        feed.finish(50);

        assert_eq!(task.await.unwrap().received, 50);
    }

    #[tokio::test]
    async fn test_failures_are_counted() {
        let (feed, drain) = channel(8);
        let tx = feed.results();
        let task = drain.spawn();

        tx.send(failed("a")).await.unwrap();
        tx.send(failed("b")).await.unwrap();
        feed.finish(2);

        assert_eq!(
            task.await.unwrap(),
            DrainSummary {
                received: 2,
                failed: 2
            }
        );
    }

    #[tokio::test]
    async fn test_dropped_feed_stops_drain() {
        let (feed, drain) = channel(8);
        let tx = feed.results();
        let task = drain.spawn();

        tx.send(ok("a")).await.unwrap();
        assert!(still_running(&task).await);
        drop(feed);

        let summary = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("drain should stop when the feed is dropped")
            .unwrap();
        assert_eq!(summary.received, 1);
    }

    #[tokio::test]
    async fn test_closed_results_with_outstanding_total() {
        let (feed, drain) = channel(8);
        let tx = feed.results();
        let task = drain.spawn();

        tx.send(ok("a")).await.unwrap();
        feed.finish(2);
        drop(tx);

        let summary = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("drain should stop once no sender can deliver the rest")
            .unwrap();
        assert_eq!(summary.received, 1);
    }

    #[tokio::test]
    async fn test_closed_results_before_total() {
        let (feed, drain) = channel(8);
        let task = drain.spawn();

        // Feed's own sender goes away with finish; nothing else was handed out.
        feed.finish(0);

        assert_eq!(task.await.unwrap().received, 0);
    }
}
