//! Shared types for the reservation client
//!
//! Wire and domain types that mirror the reservation backend contract:
//! the reservation model, request payloads, and response envelopes.

pub mod client;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use models::{ArrivalSlot, Reservation, ReservationStatus};
pub use serde::{Deserialize, Serialize};
