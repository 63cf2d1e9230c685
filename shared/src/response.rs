//! API Response types
//!
//! Response envelopes returned by the reservation backend

use serde::{Deserialize, Serialize};

use crate::models::Reservation;

/// Pagination metadata attached to list queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Staff list response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Vec<Reservation>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

/// Error body the backend sends with rejected requests
///
/// ```json
/// { "message": "Conflict" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_response_without_metadata() {
        let response: GraphqlResponse =
            serde_json::from_str(r#"{"data": [], "metadata": null}"#).unwrap();
        assert!(response.data.is_empty());
        assert!(response.metadata.is_none());
    }

    #[test]
    fn test_error_body_tolerates_extra_fields() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "Conflict", "statusCode": 409}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Conflict"));
    }
}
