use chrono::NaiveDate;
use common::{DateRange, Email, HotelId, RoomId};
use serde::Serialize;

use super::{OrderError, check_stay};

/// A validated booking request for one room over a range of days.
///
/// Fields are only reachable through [`Order::new`], so every `Order` has
/// non-blank identifiers, `from <= to`, and a stay of at most
/// [`MAX_STAY_DAYS`](super::MAX_STAY_DAYS) days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    hotel_id: HotelId,
    room_id: RoomId,
    email: Email,
    from: NaiveDate,
    to: NaiveDate,
}

impl Order {
    /// Validates and builds an order.
    pub fn new(
        hotel_id: impl Into<HotelId>,
        room_id: impl Into<RoomId>,
        email: impl Into<Email>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, OrderError> {
        let hotel_id = hotel_id.into();
        if hotel_id.is_blank() {
            return Err(OrderError::HotelIdRequired);
        }

        let room_id = room_id.into();
        if room_id.is_blank() {
            return Err(OrderError::RoomIdRequired);
        }

        let email = email.into();
        if email.is_blank() {
            return Err(OrderError::EmailRequired);
        }

        let stay = DateRange::new(from, to).ok_or(OrderError::InvalidDateRange { from, to })?;
        check_stay(&stay)?;

        Ok(Self {
            hotel_id,
            room_id,
            email,
            from,
            to,
        })
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// The booked days, inclusive on both ends.
    pub fn stay(&self) -> DateRange {
        // from <= to was checked in `new`
        DateRange::new(self.from, self.to).unwrap_or_else(|| DateRange::single(self.from))
    }

    /// Number of room-days this order consumes.
    pub fn days(&self) -> usize {
        self.stay().len()
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} for {} ({}..={})",
            self.hotel_id, self.room_id, self.email, self.from, self.to
        )
    }
}
