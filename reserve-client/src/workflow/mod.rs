//! Workflow controllers
//!
//! One controller per page, one async entry point per user action. Every
//! action follows the same shape:
//!
//! ```text
//! busy? ──yes──► Err(Busy), state untouched
//!   │
//! clear errors ─► validate ──invalid──► field errors + notice, no request
//!   │
//! BusyGuard ─► gateway call ─► declared status? ──yes──► store update + notice
//!   │                                          └─no───► inline error + notice
//! guard dropped: busy flag cleared on every path
//! ```

mod create;
mod guest_edit;
mod guest_search;
mod staff;

pub use create::CreateReservationFlow;
pub use guest_edit::{GuestEditFlow, SuccessHook};
pub use guest_search::GuestSearchFlow;
pub use staff::StaffListFlow;

use crate::http::GatewayResponse;
use crate::{ClientResult, WorkflowError};

/// Declared success status of `POST /reservations`
pub(crate) const STATUS_CREATED: u16 = 201;

/// Declared success status of every other operation
pub(crate) const STATUS_OK: u16 = 200;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Inline error stored after a failed round trip
pub(crate) fn failure_message(err: &WorkflowError) -> String {
    format!("Error occurred: {}", err.display_message())
}

/// Body of a response carrying the declared success status
pub(crate) fn expect_status<T>(
    result: ClientResult<GatewayResponse<T>>,
    status: u16,
) -> WorkflowResult<Option<T>> {
    let response = result?;
    if response.is(status) {
        Ok(response.data)
    } else {
        Err(WorkflowError::UnexpectedStatus(response.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;

    #[test]
    fn test_failure_message_prefix() {
        let err = WorkflowError::from(ClientError::Api {
            status: 409,
            message: Some("Conflict".into()),
        });
        assert_eq!(failure_message(&err), "Error occurred: Conflict");
        assert_eq!(
            failure_message(&WorkflowError::UnexpectedStatus(204)),
            "Error occurred: An unexpected error occurred"
        );
    }

    #[test]
    fn test_expect_status_branches_on_declared_code() {
        let ok: ClientResult<GatewayResponse<u8>> = Ok(GatewayResponse::new(201, Some(1)));
        assert_eq!(expect_status(ok, STATUS_CREATED).unwrap(), Some(1));

        let other: ClientResult<GatewayResponse<u8>> = Ok(GatewayResponse::new(200, Some(1)));
        assert!(matches!(
            expect_status(other, STATUS_CREATED),
            Err(WorkflowError::UnexpectedStatus(200))
        ));
    }
}
