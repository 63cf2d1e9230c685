//! Guest reservation creation

use std::sync::Arc;

use shared::Reservation;

use super::{STATUS_CREATED, WorkflowResult, expect_status, failure_message};
use crate::http::ReservationGateway;
use crate::notice::{self, Notifier};
use crate::store::ReservationStore;
use crate::{ClientError, WorkflowError, time, validation};

#[derive(Clone)]
pub struct CreateReservationFlow {
    gateway: Arc<dyn ReservationGateway>,
    store: Arc<ReservationStore>,
    notifier: Arc<dyn Notifier>,
}

impl CreateReservationFlow {
    pub fn new(
        gateway: Arc<dyn ReservationGateway>,
        store: Arc<ReservationStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<ReservationStore> {
        &self.store
    }

    /// Submit the store's creation form
    ///
    /// On 201 the server's reservation becomes `created_reservation`, the
    /// success view replaces the form, and the form resets.
    pub async fn submit(&self) -> WorkflowResult<Reservation> {
        if self.store.is_creating() {
            return Err(WorkflowError::Busy);
        }

        self.store.clear_error();
        self.store.clear_form_errors();

        let form = self.store.form();
        let errors = validation::validate_create(&form, time::today());
        let request = match form.to_create_request() {
            Some(request) if errors.is_empty() => request,
            _ => {
                self.store.set_form_errors(errors.clone());
                self.notifier.error(notice::CHECK_FORM);
                return Err(WorkflowError::Invalid(errors));
            }
        };

        let Some(_busy) = self.store.begin_creating() else {
            return Err(WorkflowError::Busy);
        };

        let result = self.gateway.create_reservation(&request).await;
        let outcome = expect_status(result, STATUS_CREATED).and_then(|data| {
            data.ok_or_else(|| {
                ClientError::InvalidResponse("Created reservation missing from response".into())
                    .into()
            })
        });

        match outcome {
            Ok(reservation) => {
                tracing::info!(
                    reservation_id = %reservation.id,
                    code = %reservation.reservation_code,
                    "Reservation created"
                );
                self.store.record_created(reservation.clone());
                self.notifier.success(notice::SUCCESS);
                Ok(reservation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reservation creation failed");
                self.store.set_error(failure_message(&e));
                self.notifier.error(notice::FAILED);
                Err(e)
            }
        }
    }
}
