//! Transaction coordinator.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Utc;

use crate::error::TransactionError;
use crate::snapshot::{Participant, Savepoint, Snapshotter};

/// Handle passed to a unit of work while its transaction is open.
#[derive(Debug)]
pub struct Transaction {
    id: u64,
}

impl Transaction {
    /// Sequence number of this transaction, unique per coordinator.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Runs units of work atomically across a fixed set of stores.
///
/// Every transaction holds one coordinator-wide lock from the first snapshot
/// until commit or rollback has finished, so transactions never interleave.
/// Snapshotting copies each store in full, which makes a transaction cost
/// O(store size) rather than O(records touched).
#[derive(Default)]
pub struct TransactionManager {
    sequence: Mutex<u64>,
    participants: Vec<Arc<dyn Participant>>,
}

impl TransactionManager {
    /// Creates a coordinator with no participants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant, builder style.
    pub fn with_participant<P: Snapshotter + 'static>(mut self, participant: P) -> Self {
        self.register(participant);
        self
    }

    /// Adds a participant. Stores are snapshotted and restored in
    /// registration order.
    pub fn register<P: Snapshotter + 'static>(&mut self, participant: P) {
        tracing::debug!(
            participant = Snapshotter::name(&participant),
            "registered participant"
        );
        self.participants.push(Arc::new(participant));
    }

    /// Number of registered participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Names of the registered participants, in registration order.
    pub fn participant_names(&self) -> Vec<&'static str> {
        self.participants.iter().map(|p| p.name()).collect()
    }

    /// Runs `body` inside a transaction.
    ///
    /// On success the body's writes stay in place. On failure every
    /// participant is put back to the state it had before the body ran and
    /// the body's error is returned unchanged. Coordinator failures
    /// (snapshot, rollback, poisoning) are converted into `E`.
    pub fn run_in_transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction) -> Result<T, E>,
        E: From<TransactionError> + std::fmt::Display,
    {
        let mut sequence = self.sequence.lock().map_err(|_| {
            tracing::error!("transaction coordinator poisoned, refusing to start");
            TransactionError::Poisoned
        })?;
        *sequence += 1;
        let tx = Transaction { id: *sequence };
        let started = Instant::now();

        let savepoints = match self.savepoints() {
            Ok(savepoints) => savepoints,
            Err(err) => {
                tracing::error!(tx = tx.id, error = %err, "transaction not started");
                record_outcome("snapshot_failed", started);
                return Err(err.into());
            }
        };

        match body(&tx) {
            Ok(value) => {
                drop(savepoints);
                tracing::debug!(tx = tx.id, "transaction committed");
                record_outcome("committed", started);
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(tx = tx.id, error = %err, "rolling back transaction");
                if let Err(failure) = rollback(savepoints) {
                    tracing::error!(
                        tx = tx.id,
                        error = %failure,
                        cause = %err,
                        "rollback failed"
                    );
                    record_outcome("rollback_failed", started);
                    return Err(failure.into());
                }
                record_outcome("rolled_back", started);
                Err(err)
            }
        }
    }

    fn savepoints(&self) -> Result<Vec<Box<dyn Savepoint + '_>>, TransactionError> {
        self.participants
            .iter()
            .map(|participant| {
                participant
                    .savepoint()
                    .map_err(|source| TransactionError::Snapshot {
                        participant: participant.name(),
                        source,
                    })
            })
            .collect()
    }
}

impl std::fmt::Debug for TransactionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionManager")
            .field("participants", &self.participant_names())
            .finish()
    }
}

/// Restores every savepoint, even after one fails, and reports the first
/// failure.
fn rollback(savepoints: Vec<Box<dyn Savepoint + '_>>) -> Result<(), TransactionError> {
    let mut first_failure = None;
    for savepoint in savepoints {
        let participant = savepoint.participant();
        let taken_at = savepoint.taken_at();
        match savepoint.restore() {
            Ok(()) => tracing::debug!(
                participant,
                snapshot_age_ms = (Utc::now() - taken_at).num_milliseconds(),
                "restored snapshot"
            ),
            Err(source) => {
                tracing::error!(
                    participant,
                    snapshot_taken_at = %taken_at,
                    error = %source,
                    "failed to restore snapshot"
                );
                first_failure.get_or_insert(TransactionError::RollbackFailed {
                    participant,
                    source,
                });
            }
        }
    }
    first_failure.map_or(Ok(()), Err)
}

fn record_outcome(outcome: &'static str, started: Instant) {
    metrics::counter!("transactions_total", "outcome" => outcome).increment(1);
    metrics::histogram!("transaction_duration_seconds").record(started.elapsed().as_secs_f64());
}
