use crate::model::{Floor, Reservation, ReservationFilter, Room, TimeSlot};
use crate::observability;

use super::availability::{compute_slots, day_slots, parse_date};
use super::{SharedRoomState, Store, StoreError};

impl Store {
    pub fn list_floors(&self) -> Vec<Floor> {
        let mut floors: Vec<Floor> = self.floors.iter().map(|e| e.value().clone()).collect();
        floors.sort_by_key(|f| f.id);
        floors
    }

    pub async fn get_room(&self, id: &str) -> Result<Room, StoreError> {
        let rs = self
            .get_room_state(id)
            .ok_or_else(|| StoreError::RoomNotFound(id.to_string()))?;
        let guard = rs.read().await;
        Ok(guard.room())
    }

    /// All rooms, or one floor's rooms. A floor filter naming an
    /// unregistered floor is an error rather than an empty list.
    pub async fn list_rooms(&self, floor: Option<i32>) -> Result<Vec<Room>, StoreError> {
        if let Some(f) = floor
            && !self.floors.contains_key(&f) {
                return Err(StoreError::FloorNotFound(f));
            }

        let states: Vec<SharedRoomState> = self.rooms.iter().map(|e| e.value().clone()).collect();
        let mut rooms = Vec::with_capacity(states.len());
        for rs in states {
            let guard = rs.read().await;
            if floor.is_none_or(|f| guard.floor == f) {
                rooms.push(guard.room());
            }
        }
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rooms)
    }

    /// Reservations matching all present filters, ordered by start instant.
    /// An unknown room id in the filter matches nothing.
    pub async fn list_reservations(&self, filter: &ReservationFilter) -> Vec<Reservation> {
        let states: Vec<SharedRoomState> = match &filter.room_id {
            Some(id) => self.get_room_state(id).into_iter().collect(),
            None => self.rooms.iter().map(|e| e.value().clone()).collect(),
        };

        let mut out = Vec::new();
        for rs in states {
            let guard = rs.read().await;
            for r in &guard.reservations {
                if self.matches(r, filter) {
                    out.push(r.clone());
                }
            }
        }
        out.sort_by_key(|r| (r.span.start, r.id));
        out
    }

    fn matches(&self, r: &Reservation, filter: &ReservationFilter) -> bool {
        if let Some(date) = filter.date
            && r.span.start.with_timezone(&self.timezone).date_naive() != date {
                return false;
            }
        if let Some(email) = &filter.requester_email
            && &r.requester_email != email {
                return false;
            }
        true
    }

    /// Partition a room's bookable day (`date` as `YYYY-MM-DD`) into
    /// booked/free hour slots. Pure read over the room's current snapshot.
    pub async fn compute_availability(
        &self,
        room_id: &str,
        date: &str,
    ) -> Result<Vec<TimeSlot>, StoreError> {
        let date = parse_date(date)?;
        let rs = self
            .get_room_state(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.to_string()))?;
        let slots = day_slots(date, self.timezone)
            .ok_or(StoreError::InvalidInput("date out of range"))?;

        let query_start = std::time::Instant::now();
        let guard = rs.read().await;
        let result = compute_slots(&guard, &slots);
        drop(guard);

        metrics::counter!(observability::AVAILABILITY_QUERIES_TOTAL).increment(1);
        metrics::histogram!(observability::AVAILABILITY_QUERY_DURATION_SECONDS)
            .record(query_start.elapsed().as_secs_f64());
        Ok(result)
    }
}
