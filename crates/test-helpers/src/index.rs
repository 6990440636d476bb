//! Recording shard index.

use async_trait::async_trait;
use shardreg_core::{RegistrationError, ShardIndex, ShardResult};
use shardreg_types::PieceCid;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// One `register_shard` call as seen by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCall {
    pub piece: PieceCid,
    pub car_path: PathBuf,
    pub eager_init: bool,
}

/// When the index delivers results for accepted registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A task per registration sends the result right away.
    Spawned,
    /// Results are parked until [`RecordingShardIndex::release`] is called.
    Held,
}

/// Shard index that records every call and replies from a script.
///
/// Pieces in the reject set fail at submission; pieces in the fail set are
/// accepted and then reported as failed on the result channel.
pub struct RecordingShardIndex {
    delivery: Delivery,
    reject: HashSet<PieceCid>,
    fail: HashSet<PieceCid>,
    calls: Mutex<Vec<RegisterCall>>,
    held: Mutex<Vec<(mpsc::Sender<ShardResult>, ShardResult)>>,
}

impl RecordingShardIndex {
    pub fn new() -> Self {
        Self::with_delivery(Delivery::Spawned)
    }

    pub fn with_delivery(delivery: Delivery) -> Self {
        Self {
            delivery,
            reject: HashSet::new(),
            fail: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    /// Reject submission of this piece.
    pub fn rejecting(mut self, piece: PieceCid) -> Self {
        self.reject.insert(piece);
        self
    }

    /// Accept this piece but report the registration as failed.
    pub fn failing(mut self, piece: PieceCid) -> Self {
        self.fail.insert(piece);
        self
    }

    /// Every call made so far, in call order.
    pub fn calls(&self) -> Vec<RegisterCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn registered_pieces(&self) -> Vec<PieceCid> {
        self.calls().into_iter().map(|c| c.piece).collect()
    }

    /// Number of results parked under [`Delivery::Held`].
    pub fn held_count(&self) -> usize {
        self.held.lock().unwrap().len()
    }

    /// Deliver all parked results, most recent first.
    pub async fn release(&self) {
        let held: Vec<_> = self.held.lock().unwrap().drain(..).rev().collect();
        for (tx, result) in held {
            let _ = tx.send(result).await;
        }
    }

    fn outcome(&self, piece: PieceCid) -> ShardResult {
        if self.fail.contains(&piece) {
            ShardResult::failure(piece, RegistrationError::Failed("scripted failure".into()))
        } else {
            ShardResult::success(piece)
        }
    }
}

impl Default for RecordingShardIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShardIndex for RecordingShardIndex {
    async fn register_shard(
        &self,
        piece: PieceCid,
        car_path: &Path,
        eager_init: bool,
        results: mpsc::Sender<ShardResult>,
    ) -> Result<(), RegistrationError> {
        self.calls.lock().unwrap().push(RegisterCall {
            piece,
            car_path: car_path.to_path_buf(),
            eager_init,
        });

        if self.reject.contains(&piece) {
            return Err(RegistrationError::InvalidRequest(format!(
                "scripted rejection of {}",
                piece
            )));
        }

        let result = self.outcome(piece);
        match self.delivery {
            Delivery::Spawned => {
                tokio::spawn(async move {
                    let _ = results.send(result).await;
                });
            }
            Delivery::Held => self.held.lock().unwrap().push((results, result)),
        }
        Ok(())
    }
}
