use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::{Floor, NewReservation, Reservation, ReservationId, Room, RoomId, RoomState, Span};
use crate::observability;

use super::conflict::{check_no_conflict, occupied_at, validate_request};
use super::{Store, StoreError};

impl Store {
    /// Register (or rename) a floor.
    pub fn add_floor(&self, id: i32, name: impl Into<String>) -> Floor {
        let floor = Floor { id, name: name.into() };
        self.floors.insert(id, floor.clone());
        floor
    }

    /// Register a room on an existing floor. Rooms start available with no
    /// reservations.
    pub fn add_room(
        &self,
        id: RoomId,
        name: String,
        floor: i32,
        capacity: u32,
        amenities: Vec<String>,
    ) -> Result<Room, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidInput("room id must not be empty"));
        }
        if name.is_empty() {
            return Err(StoreError::InvalidInput("room name must not be empty"));
        }
        if capacity == 0 {
            return Err(StoreError::InvalidInput("capacity must be positive"));
        }
        if !self.floors.contains_key(&floor) {
            return Err(StoreError::FloorNotFound(floor));
        }

        let rs = RoomState::new(id.clone(), name, floor, capacity, amenities);
        let room = rs.room();
        // Duplicate check and insert are one map operation, so a racing
        // registration of the same id cannot replace an earlier one.
        match self.rooms.entry(id) {
            Entry::Occupied(_) => Err(StoreError::InvalidInput("room id already registered")),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(RwLock::new(rs)));
                tracing::debug!(room = %room.id, floor, "room registered");
                Ok(room)
            }
        }
    }

    /// Create a reservation. Validate-then-commit under the room's write
    /// lock: the conflict check and the insert are one critical section, so
    /// no partial write can violate the non-overlap invariant.
    pub async fn create_reservation(&self, req: NewReservation) -> Result<Reservation, StoreError> {
        validate_request(&req)?;
        let rs = self
            .get_room_state(&req.room_id)
            .ok_or_else(|| StoreError::RoomNotFound(req.room_id.clone()))?;
        let mut guard = rs.write().await;

        let span = Span::new(req.start, req.end);
        if let Err(e) = check_no_conflict(&guard, &span) {
            metrics::counter!(observability::RESERVATION_CONFLICTS_TOTAL).increment(1);
            return Err(e);
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: Ulid::new(),
            room_id: req.room_id,
            requester_name: req.requester_name,
            requester_email: req.requester_email,
            span,
            title: req.title,
            description: req.description,
            created_at: now,
        };
        self.reservation_index
            .insert(reservation.id, reservation.room_id.clone());
        guard.insert_reservation(reservation.clone());
        // Recompute from the full set rather than patching the old value.
        guard.available = !occupied_at(&guard, now);

        tracing::debug!(room = %guard.id, reservation = %reservation.id, "reservation created");
        metrics::counter!(observability::RESERVATIONS_CREATED_TOTAL).increment(1);
        Ok(reservation)
    }

    /// Delete a reservation by id. On an unknown id this is a no-op that
    /// fails with `ReservationNotFound`; nothing is mutated.
    pub async fn delete_reservation(&self, id: ReservationId) -> Result<(), StoreError> {
        let (room_id, mut guard) = self.resolve_reservation_write(&id).await?;
        // A competing delete may have committed between the index lookup and
        // the lock acquisition; the room's list is authoritative.
        if guard.remove_reservation(id).is_none() {
            return Err(StoreError::ReservationNotFound(id));
        }
        self.reservation_index.remove(&id);
        guard.available = !occupied_at(&guard, Utc::now());

        tracing::debug!(room = %room_id, reservation = %id, "reservation deleted");
        metrics::counter!(observability::RESERVATIONS_DELETED_TOTAL).increment(1);
        Ok(())
    }
}
