use chrono::{DateTime, Utc};

use crate::error::Result;

/// A full copy of a store's state, taken at a point in time.
///
/// `T` is the store's own state type, so a snapshot can only ever be handed
/// back to the kind of store that produced it.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    state: T,
    taken_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    /// Wraps an already deep-copied state.
    pub fn new(state: T) -> Self {
        Self {
            state,
            taken_at: Utc::now(),
        }
    }

    /// When the snapshot was taken.
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Gets a reference to the captured state.
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Consumes the snapshot, returning the captured state.
    pub fn into_state(self) -> T {
        self.state
    }
}

/// A store that can take part in a transaction.
///
/// Restoring is a full replacement of the live state: nothing written after
/// the snapshot was taken survives it.
///
/// A store backed by an engine with native transactions can implement this
/// trait with begin/rollback instead of copying its state.
pub trait Snapshotter: Send + Sync {
    /// Deep copy of the store's entire state.
    type State: Send + 'static;

    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Captures the current state.
    fn create_snapshot(&self) -> Result<Snapshot<Self::State>>;

    /// Replaces the current state with a previously captured one.
    fn restore_snapshot(&self, snapshot: Snapshot<Self::State>) -> Result<()>;
}

/// Object-safe view of a [`Snapshotter`] so stores with different state types
/// can be held in one list.
pub(crate) trait Participant: Send + Sync {
    fn name(&self) -> &'static str;

    fn savepoint(&self) -> Result<Box<dyn Savepoint + '_>>;
}

/// A captured snapshot bound to the store it came from.
pub(crate) trait Savepoint {
    fn participant(&self) -> &'static str;

    fn taken_at(&self) -> DateTime<Utc>;

    fn restore(self: Box<Self>) -> Result<()>;
}

struct Captured<'a, S: Snapshotter> {
    store: &'a S,
    snapshot: Snapshot<S::State>,
}

impl<S: Snapshotter> Savepoint for Captured<'_, S> {
    fn participant(&self) -> &'static str {
        Snapshotter::name(self.store)
    }

    fn taken_at(&self) -> DateTime<Utc> {
        self.snapshot.taken_at()
    }

    fn restore(self: Box<Self>) -> Result<()> {
        let Captured { store, snapshot } = *self;
        store.restore_snapshot(snapshot)
    }
}

impl<S: Snapshotter + 'static> Participant for S {
    fn name(&self) -> &'static str {
        Snapshotter::name(self)
    }

    fn savepoint(&self) -> Result<Box<dyn Savepoint + '_>> {
        let snapshot = self.create_snapshot()?;
        Ok(Box::new(Captured {
            store: self,
            snapshot,
        }))
    }
}
