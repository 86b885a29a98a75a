//! Shared value types for the hotel booking service.

mod range;
mod types;

pub use range::{DateRange, Days};
pub use types::{Email, HotelId, RoomId};
