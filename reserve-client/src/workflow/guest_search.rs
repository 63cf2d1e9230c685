//! Guest lookup by date plus phone or reservation code

use std::sync::Arc;

use shared::Reservation;
use shared::request::GuestLookupQuery;

use super::{STATUS_OK, WorkflowResult, expect_status};
use crate::http::ReservationGateway;
use crate::notice::{self, Notifier};
use crate::store::GuestLookupStore;
use crate::{WorkflowError, time, validation};

#[derive(Clone)]
pub struct GuestSearchFlow {
    gateway: Arc<dyn ReservationGateway>,
    store: Arc<GuestLookupStore>,
    notifier: Arc<dyn Notifier>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl GuestSearchFlow {
    pub fn new(
        gateway: Arc<dyn ReservationGateway>,
        store: Arc<GuestLookupStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<GuestLookupStore> {
        &self.store
    }

    /// Look up the reservation described by the store's search form
    ///
    /// Once a request has been sent the search inputs and their errors are
    /// reset, whatever the outcome. A 200 with an empty body clears
    /// `found_reservation`.
    pub async fn search(&self) -> WorkflowResult<Option<Reservation>> {
        if self.store.is_searching() {
            return Err(WorkflowError::Busy);
        }

        self.store.clear_search_error();
        self.store.clear_search_form_errors();

        let form = self.store.search_form();
        let errors = validation::validate_search(&form);
        let date = match form.date {
            Some(date) if errors.is_empty() => date,
            _ => {
                self.store.set_search_form_errors(errors.clone());
                self.notifier.error(notice::TRY_AGAIN);
                return Err(WorkflowError::Invalid(errors));
            }
        };

        let Some(_busy) = self.store.begin_search() else {
            return Err(WorkflowError::Busy);
        };

        let query = GuestLookupQuery {
            date: time::canonical_iso(date),
            phone: non_empty(&form.phone),
            reservation_code: non_empty(&form.reservation_code),
        };
        let result = self.gateway.find_guest_reservation(&query).await;

        self.store.reset_search_form();
        self.store.clear_search_form_errors();

        match expect_status(result, STATUS_OK) {
            Ok(found) => {
                tracing::info!(
                    found = found.is_some(),
                    reservation_id = ?found.as_ref().map(|r| &r.id),
                    "Guest lookup completed"
                );
                self.store.set_found_reservation(found.clone());
                Ok(found)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Guest lookup failed");
                // Lookup errors are shown without the "Error occurred" prefix
                self.store.set_search_error(e.display_message());
                self.notifier.error(notice::FAILED);
                Err(e)
            }
        }
    }
}
