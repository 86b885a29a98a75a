//! Booking domain for the hotel reservation service.
//!
//! This crate provides:
//! - `Order` and `RoomAvailability` value types
//! - Store interfaces and their in-memory implementations, which take part
//!   in snapshot transactions
//! - `BookingService`, which allocates per-day room quota inside a transaction

pub mod booking;
pub mod error;
pub mod store;

pub use booking::{
    BookingService, InMemoryBookingService, MAX_STAY_DAYS, Order, OrderError, RoomAvailability,
    check_stay,
};
pub use error::BookingError;
pub use store::{
    AvailabilityRepository, InMemoryAvailabilityRepository, InMemoryOrderRepository,
    OrderRepository,
};
