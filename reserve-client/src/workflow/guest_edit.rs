//! Guest edit and cancel of the located reservation

use std::sync::Arc;

use shared::Reservation;

use super::{STATUS_OK, WorkflowResult, expect_status, failure_message};
use crate::http::ReservationGateway;
use crate::notice::{self, Notifier};
use crate::store::GuestLookupStore;
use crate::{WorkflowError, time, validation};

/// Runs after a successful update or cancel
pub type SuccessHook = Arc<dyn Fn(&GuestLookupStore) + Send + Sync>;

fn back_to_search() -> SuccessHook {
    Arc::new(GuestLookupStore::back_to_search)
}

#[derive(Clone)]
pub struct GuestEditFlow {
    gateway: Arc<dyn ReservationGateway>,
    store: Arc<GuestLookupStore>,
    notifier: Arc<dyn Notifier>,
    on_update_success: SuccessHook,
    on_cancel_success: SuccessHook,
}

impl GuestEditFlow {
    /// Both success hooks default to [`GuestLookupStore::back_to_search`]
    pub fn new(
        gateway: Arc<dyn ReservationGateway>,
        store: Arc<GuestLookupStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
            on_update_success: back_to_search(),
            on_cancel_success: back_to_search(),
        }
    }

    pub fn with_on_update_success(mut self, hook: SuccessHook) -> Self {
        self.on_update_success = hook;
        self
    }

    pub fn with_on_cancel_success(mut self, hook: SuccessHook) -> Self {
        self.on_cancel_success = hook;
        self
    }

    pub fn store(&self) -> &Arc<GuestLookupStore> {
        &self.store
    }

    fn located(&self) -> WorkflowResult<Reservation> {
        self.store
            .found_reservation()
            .ok_or(WorkflowError::NoReservation)
    }

    /// Send the edit form for the located reservation
    ///
    /// Approved reservations are closed to guest edits. A rejected update
    /// keeps the form as typed.
    pub async fn update(&self) -> WorkflowResult<()> {
        if self.store.is_updating() {
            return Err(WorkflowError::Busy);
        }

        self.store.clear_update_error();
        self.store.clear_edit_form_errors();
        self.store.clear_cancel_error();

        let reservation = self.located()?;
        if !reservation.is_guest_editable() {
            return Err(WorkflowError::NotEditable(reservation.status));
        }

        let form = self.store.edit_form();
        let errors = validation::validate_update(&form, time::today());
        let request = match form.to_update_request() {
            Some(request) if errors.is_empty() => request,
            _ => {
                self.store.set_edit_form_errors(errors.clone());
                self.notifier.error(notice::CHECK_FORM);
                return Err(WorkflowError::Invalid(errors));
            }
        };

        let Some(_busy) = self.store.begin_update() else {
            return Err(WorkflowError::Busy);
        };

        let result = self
            .gateway
            .update_guest_reservation(&reservation.id, &request)
            .await;

        match expect_status(result, STATUS_OK) {
            Ok(_) => {
                tracing::info!(reservation_id = %reservation.id, "Reservation updated by guest");
                self.notifier.success(notice::SUCCESS);
                self.store.reset_edit_form();
                (self.on_update_success)(self.store.as_ref());
                Ok(())
            }
            Err(e) => {
                tracing::warn!(reservation_id = %reservation.id, error = %e, "Guest update failed");
                self.store.set_update_error(failure_message(&e));
                self.notifier.error(notice::FAILED);
                Err(e)
            }
        }
    }

    /// Cancel the located reservation, whatever its status
    pub async fn cancel(&self) -> WorkflowResult<()> {
        if self.store.is_cancelling() {
            return Err(WorkflowError::Busy);
        }

        self.store.clear_edit_form_errors();
        self.store.clear_update_error();
        self.store.clear_cancel_error();

        let reservation = self.located()?;

        let Some(_busy) = self.store.begin_cancel() else {
            return Err(WorkflowError::Busy);
        };

        let result = self.gateway.cancel_guest_reservation(&reservation.id).await;

        match expect_status(result, STATUS_OK) {
            Ok(_) => {
                tracing::info!(reservation_id = %reservation.id, "Reservation cancelled by guest");
                self.notifier.success(notice::SUCCESS);
                self.store.reset_edit_form();
                (self.on_cancel_success)(self.store.as_ref());
                Ok(())
            }
            Err(e) => {
                tracing::warn!(reservation_id = %reservation.id, error = %e, "Guest cancel failed");
                self.store.set_cancel_error(failure_message(&e));
                self.notifier.error(notice::FAILED);
                Err(e)
            }
        }
    }
}
