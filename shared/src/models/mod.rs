//! Data models
//!
//! Server-owned records. The client keeps cached copies and never writes
//! the audit fields.

pub mod reservation;

// Re-exports
pub use reservation::*;
