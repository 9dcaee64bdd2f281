use crate::model::{ReservationId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    RoomNotFound(RoomId),
    FloorNotFound(i32),
    ReservationNotFound(ReservationId),
    InvalidInput(&'static str),
    Conflict(ReservationId),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::RoomNotFound(id) => write!(f, "room not found: {id}"),
            StoreError::FloorNotFound(id) => write!(f, "floor not found: {id}"),
            StoreError::ReservationNotFound(id) => write!(f, "reservation not found: {id}"),
            StoreError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            StoreError::Conflict(id) => write!(f, "time slot already booked by reservation: {id}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// True for the absence errors a transport maps to 404 (vs 400 for
    /// `InvalidInput` and 409 for `Conflict`).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::RoomNotFound(_)
                | StoreError::FloorNotFound(_)
                | StoreError::ReservationNotFound(_)
        )
    }
}
