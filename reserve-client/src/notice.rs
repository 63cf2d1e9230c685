//! User-facing notices
//!
//! Workflows report their outcome through a [`Notifier`], the stand-in for
//! a toast surface. Inline error strings live in the stores; notices are
//! fire-and-forget.

/// Success notice after create, update and cancel
pub const SUCCESS: &str = "Done!";

/// Success notice after a staff status change
pub const STATUS_UPDATED: &str = "Done";

/// Validation failure on the create and edit forms
pub const CHECK_FORM: &str = "Something went wrong. Please check the form and try again.";

/// Validation failure on the lookup form
pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";

/// Remote failure
pub const FAILED: &str = "Error";

/// Sink for transient outcome notices
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notices as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "reserve_client::notice", message, "Notice");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "reserve_client::notice", message, "Notice");
    }
}
