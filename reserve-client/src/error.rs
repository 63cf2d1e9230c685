//! Client error types

use shared::ReservationStatus;
use thiserror::Error;

use crate::form::FieldErrors;
use crate::store::SessionError;

/// Shown when neither a body message nor a transport message is available
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted session could not be restored
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Message suitable for the inline error of a flow.
    ///
    /// Body message first, then the transport's own message, then
    /// [`FALLBACK_ERROR_MESSAGE`].
    pub fn display_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            Self::Api { status, .. } => format!("Request failed with status code {status}"),
            Self::Http(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
            Self::InvalidResponse(msg) if !msg.is_empty() => msg.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Why a workflow action did not complete
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The same action is already in flight
    #[error("Operation already in progress")]
    Busy,

    /// Local validation rejected the input; nothing was sent
    #[error("Validation failed for {} field(s)", .0.len())]
    Invalid(FieldErrors),

    /// No reservation is currently located
    #[error("No reservation selected")]
    NoReservation,

    /// Guest edits are closed for this reservation
    #[error("Reservation is {0} and can no longer be edited")]
    NotEditable(ReservationStatus),

    /// Server resolved with a status other than the declared success code
    #[error("Unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// Transport or server rejection
    #[error(transparent)]
    Remote(#[from] ClientError),
}

impl WorkflowError {
    /// Message stored in the flow's inline error field
    pub fn display_message(&self) -> String {
        match self {
            Self::Remote(e) => e.display_message(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_message_wins() {
        let err = ClientError::Api {
            status: 409,
            message: Some("Conflict".into()),
        };
        assert_eq!(err.display_message(), "Conflict");
    }

    #[test]
    fn test_bodiless_rejection_uses_status_text() {
        let err = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.display_message(), "Request failed with status code 500");

        let blank = ClientError::Api {
            status: 502,
            message: Some(String::new()),
        };
        assert_eq!(blank.display_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_unexpected_errors_fall_back() {
        let err = ClientError::Config("bad".into());
        assert_eq!(err.display_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(
            WorkflowError::UnexpectedStatus(204).display_message(),
            FALLBACK_ERROR_MESSAGE
        );
    }
}
