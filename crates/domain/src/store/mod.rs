//! Store interfaces and in-memory implementations.
//!
//! The in-memory stores are cheap `Clone` handles over shared state. Each one
//! guards its state with its own lock, independent of the transaction
//! coordinator, and implements [`transaction::Snapshotter`] so it can be
//! registered as a participant.

mod availability;
mod order;

pub use availability::{AvailabilityKey, InMemoryAvailabilityRepository};
pub use order::InMemoryOrderRepository;

use common::{DateRange, HotelId, RoomId};
use transaction::Result;

use crate::booking::{Order, RoomAvailability};

/// Append-only store of confirmed orders.
pub trait OrderRepository: Send + Sync {
    /// Stores a copy of the order.
    fn save(&self, order: &Order) -> Result<()>;

    /// Returns every stored order in insertion order.
    fn list(&self) -> Result<Vec<Order>>;

    /// Returns the number of stored orders.
    fn count(&self) -> Result<usize>;
}

/// Day-level room inventory.
pub trait AvailabilityRepository: Send + Sync {
    /// Returns one record per day of `range`, in date order, taking the
    /// store's write lock. Days without stored inventory come back with
    /// quota 0.
    fn get_for_update(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<Vec<RoomAvailability>>;

    /// Same shape as [`get_for_update`](Self::get_for_update) under a shared
    /// read lock, for callers outside a transaction.
    fn range(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<Vec<RoomAvailability>>;

    /// Upserts each record by `(hotel_id, room_id, date)`.
    fn update_availabilities(&self, records: &[RoomAvailability]) -> Result<()>;
}
