//! Client-related types shared with the staff login surface
//!
//! The authenticated session is kept (and persisted) by the client even
//! though reservation calls authenticate with the static Basic credential.

use serde::{Deserialize, Serialize};

/// Staff user information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}
