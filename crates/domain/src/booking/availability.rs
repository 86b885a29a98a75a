use chrono::NaiveDate;
use common::{HotelId, RoomId};
use serde::{Deserialize, Serialize};

/// Remaining bookable units of one room on one day.
///
/// Identified by `(hotel_id, room_id, date)`. A day with no stored record is
/// treated as quota 0: no inventory means not bookable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub hotel_id: HotelId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub quota: u32,
}

impl RoomAvailability {
    pub fn new(hotel_id: HotelId, room_id: RoomId, date: NaiveDate, quota: u32) -> Self {
        Self {
            hotel_id,
            room_id,
            date,
            quota,
        }
    }

    /// Returns true if at least one unit is left.
    pub fn is_available(&self) -> bool {
        self.quota >= 1
    }

    /// Returns a copy with one unit taken, or `None` if nothing is left.
    pub fn reserve_one(&self) -> Option<Self> {
        self.quota.checked_sub(1).map(|quota| Self {
            quota,
            ..self.clone()
        })
    }
}
