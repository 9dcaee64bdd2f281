mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;

pub use availability::{compute_slots, day_slots, parse_date, DAY_END_HOUR, DAY_START_HOUR};
pub use error::StoreError;

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::model::{Floor, ReservationId, RoomId, RoomState};

pub type SharedRoomState = Arc<RwLock<RoomState>>;

/// Exclusive owner of the floor, room, and reservation collections, and the
/// sole writer of all three.
///
/// Each room's state lives behind its own `RwLock`; a mutation holds the
/// room's write lock across validation, the conflict check, and the insert,
/// so writes to one room serialize and the per-room non-overlap invariant
/// holds on every commit. Reads take the read lock and see a consistent
/// snapshot relative to any in-flight write.
pub struct Store {
    pub(super) rooms: DashMap<RoomId, SharedRoomState>,
    pub(super) floors: DashMap<i32, Floor>,
    /// Reverse lookup: reservation id → room id.
    pub(super) reservation_index: DashMap<ReservationId, RoomId>,
    /// Reference time zone for calendar-day interpretation (availability
    /// dates, date filters).
    pub(super) timezone: FixedOffset,
}

impl Store {
    pub fn new(timezone: FixedOffset) -> Self {
        Self {
            rooms: DashMap::new(),
            floors: DashMap::new(),
            reservation_index: DashMap::new(),
            timezone,
        }
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn contains_room(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    pub(super) fn get_room_state(&self, id: &str) -> Option<SharedRoomState> {
        self.rooms.get(id).map(|e| e.value().clone())
    }

    /// Lookup reservation → room, get the room, acquire its write lock.
    pub(super) async fn resolve_reservation_write(
        &self,
        id: &ReservationId,
    ) -> Result<(RoomId, tokio::sync::OwnedRwLockWriteGuard<RoomState>), StoreError> {
        let room_id = self
            .reservation_index
            .get(id)
            .map(|e| e.value().clone())
            .ok_or(StoreError::ReservationNotFound(*id))?;
        let rs = self
            .get_room_state(&room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.clone()))?;
        let guard = rs.write_owned().await;
        Ok((room_id, guard))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}
