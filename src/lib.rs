//! In-memory room reservation engine.
//!
//! Two pieces: [`store::Store`] owns the floor, room, and reservation
//! collections and enforces the per-room non-overlap invariant on every
//! write; the availability functions in [`store`] derive a room's bookable
//! day as an ordered partition of hour slots into booked/free.
//!
//! Transport and persistence live outside this crate. An embedding server
//! parses instants and dates at its boundary ([`model::parse_instant`],
//! [`store::parse_date`]), calls the store, and maps [`store::StoreError`]
//! to its status codes.

pub mod model;
pub mod observability;
pub mod store;
