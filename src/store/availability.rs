use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::model::{Reservation, RoomState, Span, TimeSlot};

use super::StoreError;

// ── Availability Algorithm ────────────────────────────────────────

/// Bookable window: one slot per whole hour, 09:00–18:00 in the store's
/// reference time zone (9 slots).
pub const DAY_START_HOUR: u32 = 9;
pub const DAY_END_HOUR: u32 = 18;

/// Parse a `YYYY-MM-DD` calendar date. Exposed for transports, which receive
/// availability dates as strings.
pub fn parse_date(s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| StoreError::InvalidInput("unparseable date, expected YYYY-MM-DD"))
}

fn local_instant(date: NaiveDate, hour: u32, tz: FixedOffset) -> Option<DateTime<Utc>> {
    let ndt = date.and_hms_opt(hour, 0, 0)?;
    ndt.and_local_timezone(tz)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The day's bookable slots as spans, chronological. `None` only if the date
/// is outside chrono's representable range.
pub fn day_slots(date: NaiveDate, tz: FixedOffset) -> Option<Vec<Span>> {
    let mut slots = Vec::with_capacity((DAY_END_HOUR - DAY_START_HOUR) as usize);
    for hour in DAY_START_HOUR..DAY_END_HOUR {
        let start = local_instant(date, hour, tz)?;
        let end = local_instant(date, hour + 1, tz)?;
        slots.push(Span::new(start, end));
    }
    Some(slots)
}

/// Partition the given slots into booked/free against the room's current
/// reservations. A slot is booked iff some reservation is active at the
/// slot's start instant (`start <= slot_start < end`); the slot carries the
/// earliest-created such reservation's id. The non-overlap invariant means
/// at most one candidate exists, but the tie-break keeps the result
/// deterministic even against a violated invariant.
///
/// Pure read over the room snapshot; never mutates.
pub fn compute_slots(rs: &RoomState, slots: &[Span]) -> Vec<TimeSlot> {
    let Some(window) = slots
        .first()
        .zip(slots.last())
        .map(|(first, last)| Span::new(first.start, last.end))
    else {
        return Vec::new();
    };
    // One bounded scan for the whole window, then per-slot checks against
    // the (tiny) day subset. Catches reservations that started before the
    // window but are still active inside it.
    let day: Vec<&Reservation> = rs.overlapping(&window).collect();

    slots
        .iter()
        .map(|span| {
            let occupant = day
                .iter()
                .filter(|r| r.span.contains_instant(span.start))
                .min_by_key(|r| r.created_at);
            match occupant {
                Some(r) => TimeSlot {
                    span: *span,
                    available: false,
                    reservation_id: Some(r.id),
                },
                None => TimeSlot {
                    span: *span,
                    available: true,
                    reservation_id: None,
                },
            }
        })
        .collect()
}
