use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use common::{DateRange, HotelId, RoomId};
use transaction::{Result, Snapshot, Snapshotter, StoreError};

use super::AvailabilityRepository;
use crate::booking::RoomAvailability;

const STORE: &str = "room_availability";

/// Composite identity of a room-day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AvailabilityKey {
    pub hotel_id: HotelId,
    pub room_id: RoomId,
    pub date: NaiveDate,
}

type Quotas = BTreeMap<AvailabilityKey, u32>;

/// In-memory room inventory keyed by hotel, room, and day.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityRepository {
    quotas: Arc<RwLock<Quotas>>,
}

impl InMemoryAvailabilityRepository {
    /// Creates an empty store; every day starts unbookable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with the given records.
    pub fn with_records(records: impl IntoIterator<Item = RoomAvailability>) -> Self {
        let quotas = records
            .into_iter()
            .map(|record| {
                let key = AvailabilityKey {
                    hotel_id: record.hotel_id,
                    room_id: record.room_id,
                    date: record.date,
                };
                (key, record.quota)
            })
            .collect();
        Self {
            quotas: Arc::new(RwLock::new(quotas)),
        }
    }

    /// Number of stored room-days.
    pub fn len(&self) -> Result<usize> {
        Ok(self.quotas.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Poisoned { store: STORE }
}

fn collect_days(
    quotas: &Quotas,
    hotel_id: &HotelId,
    room_id: &RoomId,
    range: &DateRange,
) -> Vec<RoomAvailability> {
    range
        .days()
        .map(|date| {
            let key = AvailabilityKey {
                hotel_id: hotel_id.clone(),
                room_id: room_id.clone(),
                date,
            };
            let quota = quotas.get(&key).copied().unwrap_or(0);
            RoomAvailability::new(key.hotel_id, key.room_id, date, quota)
        })
        .collect()
}

impl AvailabilityRepository for InMemoryAvailabilityRepository {
    fn get_for_update(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<Vec<RoomAvailability>> {
        let quotas = self.quotas.write().map_err(poisoned)?;
        Ok(collect_days(&quotas, hotel_id, room_id, range))
    }

    fn range(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<Vec<RoomAvailability>> {
        let quotas = self.quotas.read().map_err(poisoned)?;
        Ok(collect_days(&quotas, hotel_id, room_id, range))
    }

    fn update_availabilities(&self, records: &[RoomAvailability]) -> Result<()> {
        let mut quotas = self.quotas.write().map_err(poisoned)?;
        for record in records {
            let key = AvailabilityKey {
                hotel_id: record.hotel_id.clone(),
                room_id: record.room_id.clone(),
                date: record.date,
            };
            quotas.insert(key, record.quota);
        }
        Ok(())
    }
}

impl Snapshotter for InMemoryAvailabilityRepository {
    type State = Quotas;

    fn name(&self) -> &'static str {
        STORE
    }

    fn create_snapshot(&self) -> Result<Snapshot<Quotas>> {
        let quotas = self.quotas.read().map_err(poisoned)?;
        Ok(Snapshot::new(quotas.clone()))
    }

    fn restore_snapshot(&self, snapshot: Snapshot<Quotas>) -> Result<()> {
        *self.quotas.write().map_err(poisoned)? = snapshot.into_state();
        Ok(())
    }
}
