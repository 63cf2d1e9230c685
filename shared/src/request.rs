//! Request types for the reservation API
//!
//! Payloads sent to the backend. Controllers normalise the values
//! (trimmed text, canonical UTC instants) before building these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ArrivalSlot, ReservationStatus};

/// `POST /reservations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub table_size: u32,
    pub expected_arrival_date: DateTime<Utc>,
    pub expected_arrival_time: ArrivalSlot,
    pub special_requests: String,
}

/// `PATCH /reservations/guest/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub table_size: u32,
    pub expected_arrival_date: DateTime<Utc>,
    pub expected_arrival_time: ArrivalSlot,
    pub special_requests: String,
}

/// `PATCH /reservations/admin/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ReservationStatus,
}

/// `GET /reservations/guest` query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestLookupQuery {
    /// ISO 8601 instant of the arrival date
    pub date: String,
    pub phone: Option<String>,
    pub reservation_code: Option<String>,
}

impl GuestLookupQuery {
    /// Query pairs with empty values left out
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if !self.date.is_empty() {
            pairs.push(("date", self.date.clone()));
        }
        if let Some(phone) = self.phone.as_ref().filter(|p| !p.is_empty()) {
            pairs.push(("phone", phone.clone()));
        }
        if let Some(code) = self.reservation_code.as_ref().filter(|c| !c.is_empty()) {
            pairs.push(("reservationCode", code.clone()));
        }
        pairs
    }
}

/// Staff list query. The backend does not accept ad-hoc selections yet,
/// so every request carries this document unchanged.
pub const RESERVATIONS_QUERY: &str = r#"
  query FindReservations {
    reservations {
      _id
      guestName
      guestPhone
      guestEmail
      status
      expectedArrivalDate
      expectedArrivalTime
      tableSize
      reservationCode
      specialRequests
  }
}"#;

/// Variables accompanying [`RESERVATIONS_QUERY`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQueryVariables {
    /// ISO instant, or empty for "any date"
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    /// Matches phone or reservation code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: String,
}

/// `POST /reservations/admin/graphql`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<ReservationQueryVariables>,
}

impl GraphqlRequest {
    /// The fixed reservation list query with the given variables
    pub fn reservations(variables: ReservationQueryVariables) -> Self {
        Self {
            query: RESERVATIONS_QUERY.to_string(),
            variables: Some(variables),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_pairs_skip_empty_values() {
        let query = GuestLookupQuery {
            date: "2026-10-26T00:00:00Z".into(),
            phone: Some(String::new()),
            reservation_code: Some("AB12CD".into()),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("date", "2026-10-26T00:00:00Z".to_string()),
                ("reservationCode", "AB12CD".to_string()),
            ]
        );
    }

    #[test]
    fn test_graphql_variables_shape() {
        let request = GraphqlRequest::reservations(ReservationQueryVariables {
            date: String::new(),
            status: Some(ReservationStatus::Approved),
            search_text: None,
            page: 1,
            limit: 0,
            sort_by: String::new(),
            sort_order: String::new(),
        });
        let value = serde_json::to_value(&request).unwrap();
        let vars = &value["variables"];
        assert_eq!(vars["status"], "approved");
        assert_eq!(vars["page"], 1);
        assert!(vars.get("searchText").is_none());
        assert!(value["query"].as_str().unwrap().contains("FindReservations"));
    }
}
