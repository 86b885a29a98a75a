//! Booking error types.

use chrono::NaiveDate;
use common::{HotelId, RoomId};
use thiserror::Error;
use transaction::{StoreError, TransactionError};

use crate::booking::OrderError;

/// Errors that can occur while booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// At least one day of the stay has no quota left. Lists every such day.
    #[error("Room {room_id} of hotel {hotel_id} is not available on {}", join_dates(.dates))]
    RoomUnavailable {
        hotel_id: HotelId,
        room_id: RoomId,
        dates: Vec<NaiveDate>,
    },

    /// The request was rejected before touching any store.
    #[error("Invalid request: {0}")]
    Invalid(#[from] OrderError),

    /// A store read or write failed.
    #[error("Failed to {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    /// The transaction coordinator failed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

impl BookingError {
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { operation, source }
    }

    /// True when stores may have been left inconsistent.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::Transaction(err) if err.is_integrity_failure())
    }
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(NaiveDate::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
