// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: reservations accepted.
pub const RESERVATIONS_CREATED_TOTAL: &str = "roombook_reservations_created_total";

/// Counter: reservations deleted.
pub const RESERVATIONS_DELETED_TOTAL: &str = "roombook_reservations_deleted_total";

/// Counter: booking attempts rejected by the overlap check.
pub const RESERVATION_CONFLICTS_TOTAL: &str = "roombook_reservation_conflicts_total";

/// Counter: availability queries served.
pub const AVAILABILITY_QUERIES_TOTAL: &str = "roombook_availability_queries_total";

/// Histogram: availability query latency in seconds.
pub const AVAILABILITY_QUERY_DURATION_SECONDS: &str =
    "roombook_availability_query_duration_seconds";
