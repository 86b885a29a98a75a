//! Snapshot-based transactions over independent in-memory stores.
//!
//! Stores opt in by implementing [`Snapshotter`]. A [`TransactionManager`]
//! snapshots every registered store before running a unit of work and puts
//! each one back to its snapshot if the work fails, which gives all-or-nothing
//! semantics without a shared log.

pub mod error;
pub mod manager;
pub mod snapshot;

pub use error::{Result, StoreError, TransactionError};
pub use manager::{Transaction, TransactionManager};
pub use snapshot::{Snapshot, Snapshotter};
