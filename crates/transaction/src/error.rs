use thiserror::Error;

/// Errors raised by a store taking part in transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store's lock was poisoned by a writer that panicked.
    #[error("{store} store is poisoned")]
    Poisoned { store: &'static str },

    /// The store cannot serve the request.
    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: &'static str, reason: String },
}

/// Errors raised by the transaction coordinator itself.
///
/// Failures of the unit of work are not wrapped here; they reach the caller
/// unchanged once every participant has been restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A participant could not be snapshotted. The unit of work never ran.
    #[error("failed to snapshot {participant}: {source}")]
    Snapshot {
        participant: &'static str,
        #[source]
        source: StoreError,
    },

    /// A participant could not be restored after the unit of work failed.
    /// Its state is indeterminate.
    #[error("failed to roll back {participant}, state is inconsistent: {source}")]
    RollbackFailed {
        participant: &'static str,
        #[source]
        source: StoreError,
    },

    /// An earlier transaction panicked while holding the coordinator.
    #[error("transaction coordinator is poisoned by an aborted transaction")]
    Poisoned,
}

impl TransactionError {
    /// True when participants may be left in an indeterminate state.
    ///
    /// These must be alarmed on, not retried.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::RollbackFailed { .. } | Self::Poisoned)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
