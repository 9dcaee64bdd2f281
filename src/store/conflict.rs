use chrono::{DateTime, Utc};

use crate::model::{NewReservation, RoomState, Span};

use super::StoreError;

/// Field-level validation for a booking request: non-empty requester fields
/// and title, strictly positive duration.
pub(crate) fn validate_request(req: &NewReservation) -> Result<(), StoreError> {
    if req.requester_name.is_empty() {
        return Err(StoreError::InvalidInput("requester_name must not be empty"));
    }
    if req.requester_email.is_empty() {
        return Err(StoreError::InvalidInput("requester_email must not be empty"));
    }
    if req.title.is_empty() {
        return Err(StoreError::InvalidInput("title must not be empty"));
    }
    if req.end <= req.start {
        return Err(StoreError::InvalidInput("end must be strictly after start"));
    }
    Ok(())
}

/// Reject `span` if any existing reservation for the room overlaps it.
/// Half-open semantics throughout: `[s1,e1)` and `[s2,e2)` overlap iff
/// `s1 < e2 && s2 < e1`, so back-to-back bookings are allowed.
pub(crate) fn check_no_conflict(rs: &RoomState, span: &Span) -> Result<(), StoreError> {
    // `overlapping` already applies the half-open inequality; any hit blocks.
    if let Some(existing) = rs.overlapping(span).next() {
        return Err(StoreError::Conflict(existing.id));
    }
    Ok(())
}

/// True iff some reservation for the room covers `now`. Backs the recompute
/// of the derived `available` flag after every mutation.
pub(crate) fn occupied_at(rs: &RoomState, now: DateTime<Utc>) -> bool {
    rs.reservations.iter().any(|r| r.span.contains_instant(now))
}
