//! Booking service: per-day quota allocation inside a transaction.

use std::sync::Arc;

use chrono::NaiveDate;
use common::{DateRange, HotelId, RoomId};
use transaction::TransactionManager;

use super::{Order, RoomAvailability, check_stay};
use crate::error::BookingError;
use crate::store::{
    AvailabilityRepository, InMemoryAvailabilityRepository, InMemoryOrderRepository,
    OrderRepository,
};

/// Books rooms against day-level inventory.
///
/// Every write runs through the shared [`TransactionManager`], which must
/// have both stores registered as participants for a failed booking to
/// leave no trace.
pub struct BookingService<O, A> {
    orders: O,
    availability: A,
    transactions: Arc<TransactionManager>,
}

/// Booking service over the in-memory stores.
pub type InMemoryBookingService =
    BookingService<InMemoryOrderRepository, InMemoryAvailabilityRepository>;

impl InMemoryBookingService {
    /// Wires an empty order store and the given inventory into a fresh
    /// coordinator.
    pub fn in_memory(availability: InMemoryAvailabilityRepository) -> Self {
        let orders = InMemoryOrderRepository::new();
        let transactions = TransactionManager::new()
            .with_participant(orders.clone())
            .with_participant(availability.clone());
        Self::new(orders, availability, Arc::new(transactions))
    }
}

impl<O: OrderRepository, A: AvailabilityRepository> BookingService<O, A> {
    /// Creates a service over the given stores and coordinator.
    pub fn new(orders: O, availability: A, transactions: Arc<TransactionManager>) -> Self {
        Self {
            orders,
            availability,
            transactions,
        }
    }

    pub fn order_repository(&self) -> &O {
        &self.orders
    }

    pub fn availability_repository(&self) -> &A {
        &self.availability
    }

    pub fn transactions(&self) -> &TransactionManager {
        &self.transactions
    }

    /// Books one unit of the order's room for every day of its stay and
    /// stores the order.
    ///
    /// All days are checked before anything is written. If any day has no
    /// quota left, nothing changes and the error lists every such day.
    #[tracing::instrument(
        skip(self, order),
        fields(hotel_id = %order.hotel_id(), room_id = %order.room_id(), stay = %order.stay())
    )]
    pub fn create_order(&self, order: Order) -> Result<Order, BookingError> {
        let result = self.transactions.run_in_transaction(|tx| {
            let days = self
                .availability
                .get_for_update(order.hotel_id(), order.room_id(), &order.stay())
                .map_err(BookingError::store("read availability"))?;

            let updates = allocate(days).map_err(|dates| {
                tracing::warn!(tx = tx.id(), unavailable = ?dates, "room is not available for selected dates");
                BookingError::RoomUnavailable {
                    hotel_id: order.hotel_id().clone(),
                    room_id: order.room_id().clone(),
                    dates,
                }
            })?;

            self.availability
                .update_availabilities(&updates)
                .map_err(BookingError::store("update availability"))?;
            self.orders
                .save(&order)
                .map_err(BookingError::store("save order"))
        });

        let outcome = match &result {
            Ok(()) => "confirmed",
            Err(BookingError::RoomUnavailable { .. }) => "unavailable",
            Err(_) => "failed",
        };
        metrics::counter!("bookings_total", "outcome" => outcome).increment(1);

        match result {
            Ok(()) => {
                tracing::info!(email = %order.email(), "order created");
                Ok(order)
            }
            Err(err) => {
                if err.is_integrity_failure() {
                    tracing::error!(error = %err, "booking left stores in an unknown state");
                }
                Err(err)
            }
        }
    }

    /// Upserts inventory records in one transaction.
    #[tracing::instrument(skip(self, records), fields(records = records.len()))]
    pub fn set_availability(&self, records: Vec<RoomAvailability>) -> Result<(), BookingError> {
        self.transactions.run_in_transaction(|_| {
            self.availability
                .update_availabilities(&records)
                .map_err(BookingError::store("update availability"))
        })
    }

    /// Reads the inventory of one room, one record per day of `range`.
    ///
    /// Ranges longer than [`MAX_STAY_DAYS`](super::MAX_STAY_DAYS) are
    /// rejected without reading the store.
    pub fn availability(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<Vec<RoomAvailability>, BookingError> {
        check_stay(range)?;
        self.availability
            .range(hotel_id, room_id, range)
            .map_err(BookingError::store("read availability"))
    }

    /// Lists confirmed orders.
    pub fn orders(&self) -> Result<Vec<Order>, BookingError> {
        self.orders
            .list()
            .map_err(BookingError::store("list orders"))
    }
}

/// Takes one unit from every day.
///
/// Scans the whole stay rather than stopping at the first full day so the
/// caller learns every unavailable date. Returns the decremented records, or
/// the unavailable dates if there is at least one.
fn allocate(days: Vec<RoomAvailability>) -> Result<Vec<RoomAvailability>, Vec<NaiveDate>> {
    let mut updates = Vec::with_capacity(days.len());
    let mut unavailable = Vec::new();

    for day in &days {
        match day.reserve_one() {
            Some(reserved) => updates.push(reserved),
            None => unavailable.push(day.date),
        }
    }

    if unavailable.is_empty() {
        Ok(updates)
    } else {
        Err(unavailable)
    }
}
