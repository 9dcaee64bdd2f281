use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Room identifiers are caller-assigned strings (e.g. `"room-101"`).
pub type RoomId = String;

/// Reservation identifiers are store-generated ULIDs: time-ordered, never reused.
pub type ReservationId = Ulid;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Span {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Half-open overlap: adjacent spans (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// A named grouping of rooms. Purely organizational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: i32,
    pub name: String,
}

/// Room as seen by callers. `available` is a derived cache: true iff no
/// reservation for the room covers the current instant. The store recomputes
/// it from the full reservation set on every mutation of the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub floor: i32,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub available: bool,
}

/// A confirmed booking. Immutable after creation except for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub requester_name: String,
    pub requester_email: String,
    pub span: Span,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for `Store::create_reservation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub room_id: RoomId,
    pub requester_name: String,
    pub requester_email: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One bookable hour of a room's day. Derived on every availability query,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub span: Span,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<ReservationId>,
}

/// Conjunctive filters for `Store::list_reservations`; absent filters pass all.
/// The date filter matches on the start instant's calendar day in the store's
/// reference time zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub room_id: Option<RoomId>,
    pub date: Option<NaiveDate>,
    pub requester_email: Option<String>,
}

/// Per-room record owned by the store: room fields plus the room's
/// reservations, kept sorted by `span.start`.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub id: RoomId,
    pub name: String,
    pub floor: i32,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub available: bool,
    pub reservations: Vec<Reservation>,
}

impl RoomState {
    pub fn new(id: RoomId, name: String, floor: i32, capacity: u32, amenities: Vec<String>) -> Self {
        Self {
            id,
            name,
            floor,
            capacity,
            amenities,
            available: true,
            reservations: Vec::new(),
        }
    }

    /// Insert a reservation maintaining sort order by `span.start`.
    pub fn insert_reservation(&mut self, reservation: Reservation) {
        let pos = self
            .reservations
            .binary_search_by_key(&reservation.span.start, |r| r.span.start)
            .unwrap_or_else(|e| e);
        self.reservations.insert(pos, reservation);
    }

    /// Remove a reservation by id.
    pub fn remove_reservation(&mut self, id: ReservationId) -> Option<Reservation> {
        if let Some(pos) = self.reservations.iter().position(|r| r.id == id) {
            Some(self.reservations.remove(pos))
        } else {
            None
        }
    }

    /// Return only reservations whose span overlaps the query window.
    /// Uses binary search to skip reservations starting at or after `query.end`.
    pub fn overlapping(&self, query: &Span) -> impl Iterator<Item = &Reservation> {
        // Everything at index >= right_bound starts at or after query.end → can't overlap.
        let right_bound = self
            .reservations
            .partition_point(|r| r.span.start < query.end);
        self.reservations[..right_bound]
            .iter()
            .filter(move |r| r.span.end > query.start)
    }

    /// The caller-facing view of this room.
    pub fn room(&self) -> Room {
        Room {
            id: self.id.clone(),
            name: self.name.clone(),
            floor: self.floor,
            capacity: self.capacity,
            amenities: self.amenities.clone(),
            available: self.available,
        }
    }
}

/// Parse an ISO-8601 / RFC 3339 timestamp into a UTC instant. Boundary
/// helper for transports; a parse failure is the transport's cue for a
/// malformed-input response.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}
