//! Orders, room availability, and the booking service.

mod availability;
mod order;
mod service;

pub use availability::RoomAvailability;
pub use order::Order;
pub use service::{BookingService, InMemoryBookingService};

use chrono::NaiveDate;
use common::DateRange;
use thiserror::Error;

/// Longest stay, in days, that a single order or inventory read may cover.
pub const MAX_STAY_DAYS: usize = 366;

/// Validation errors for a new order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Hotel ID is required.
    #[error("Hotel ID is required")]
    HotelIdRequired,

    /// Room ID is required.
    #[error("Room ID is required")]
    RoomIdRequired,

    /// Email is required.
    #[error("Email is required")]
    EmailRequired,

    /// The stay ends before it starts.
    #[error("Invalid dates: 'from' ({from}) cannot be after 'to' ({to})")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    /// The stay covers more days than [`MAX_STAY_DAYS`].
    #[error("Invalid dates: stay of {days} days exceeds the maximum of {max}")]
    StayTooLong { days: usize, max: usize },
}

/// Rejects ranges longer than [`MAX_STAY_DAYS`].
pub fn check_stay(range: &DateRange) -> Result<(), OrderError> {
    let days = range.len();
    if days > MAX_STAY_DAYS {
        return Err(OrderError::StayTooLong {
            days,
            max: MAX_STAY_DAYS,
        });
    }
    Ok(())
}
