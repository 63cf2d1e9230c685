//! Reservation Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the special requests note
pub const MAX_SPECIAL_REQUESTS_LEN: usize = 100;

/// Smallest bookable party
pub const MIN_TABLE_SIZE: u32 = 1;

/// Largest bookable party
pub const MAX_TABLE_SIZE: u32 = 20;

/// Reservation lifecycle status
///
/// Every reservation starts as `Requested`. `Cancelled` and `Completed`
/// are terminal. Transitions happen on the server only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Requested,
    Approved,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Requested,
        ReservationStatus::Approved,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// No further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected arrival slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalSlot {
    Lunch,
    Dinner,
}

impl ArrivalSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl std::fmt::Display for ArrivalSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity (server-owned, cached by the client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: String,
    /// 6-character guest-facing code
    #[serde(default)]
    pub reservation_code: String,

    pub guest_name: String,
    #[serde(default)]
    pub guest_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,

    pub table_size: u32,
    pub expected_arrival_date: DateTime<Utc>,
    pub expected_arrival_time: ArrivalSlot,
    #[serde(default)]
    pub special_requests: String,

    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    // Audit (server-written)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Guests may edit anything that has not been approved yet
    pub fn is_guest_editable(&self) -> bool {
        self.status != ReservationStatus::Approved
    }
}
