//! Staff reservation list: search, status changes, detail view

use std::sync::Arc;

use shared::request::{GraphqlRequest, StatusUpdateRequest};
use shared::{Reservation, ReservationStatus};

use super::{STATUS_OK, WorkflowResult, expect_status, failure_message};
use crate::http::ReservationGateway;
use crate::notice::{self, Notifier};
use crate::store::{BusyGuard, StaffFilter, StaffListState, StaffListStore};
use crate::{ClientError, WorkflowError};

#[derive(Clone)]
pub struct StaffListFlow {
    gateway: Arc<dyn ReservationGateway>,
    store: Arc<StaffListStore>,
    notifier: Arc<dyn Notifier>,
}

impl StaffListFlow {
    pub fn new(
        gateway: Arc<dyn ReservationGateway>,
        store: Arc<StaffListStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<StaffListStore> {
        &self.store
    }

    /// Make `filter` the active filter and load its reservations
    pub async fn search(&self, filter: StaffFilter) -> WorkflowResult<Vec<Reservation>> {
        if self.store.is_searching() {
            return Err(WorkflowError::Busy);
        }
        self.store.set_filter(filter);
        self.refresh().await
    }

    /// Re-run the active filter
    pub async fn refresh(&self) -> WorkflowResult<Vec<Reservation>> {
        if self.store.is_searching() {
            return Err(WorkflowError::Busy);
        }
        let Some(busy) = self.store.begin_search() else {
            return Err(WorkflowError::Busy);
        };
        self.run_search(busy).await
    }

    /// Search until no reload is left queued; the last pass decides the result
    async fn run_search(
        &self,
        mut busy: BusyGuard<'_, StaffListState>,
    ) -> WorkflowResult<Vec<Reservation>> {
        loop {
            let outcome = self.search_once().await;
            match busy.release_or_continue() {
                Some(still_busy) => {
                    tracing::debug!("Reloading staff list queued during search");
                    busy = still_busy;
                }
                None => return outcome,
            }
        }
    }

    async fn search_once(&self) -> WorkflowResult<Vec<Reservation>> {
        self.store.clear_error();

        let filter = self.store.filter();
        let request = GraphqlRequest::reservations(filter.to_variables());
        let result = self.gateway.query_reservations(&request).await;

        match expect_status(result, STATUS_OK) {
            Ok(body) => {
                let reservations = body.map(|b| b.data).unwrap_or_default();
                tracing::info!(count = reservations.len(), "Staff reservation list loaded");
                self.store.set_reservations(reservations.clone());
                Ok(reservations)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Staff reservation search failed");
                self.store.set_error(failure_message(&e));
                self.notifier.error(notice::FAILED);
                Err(e)
            }
        }
    }

    /// Change a reservation's status, then reload the list from the server
    ///
    /// The row is never patched locally; on success the active filter is
    /// searched again. If a search is already in flight the reload is queued
    /// behind it and runs before that search releases the list. A failed
    /// reload is recorded by the search itself and does not undo the status
    /// change.
    pub async fn update_status(&self, id: &str, status: ReservationStatus) -> WorkflowResult<()> {
        if self.store.is_updating_status() {
            return Err(WorkflowError::Busy);
        }

        self.store.clear_error();

        {
            let Some(_busy) = self.store.begin_status_update() else {
                return Err(WorkflowError::Busy);
            };

            let request = StatusUpdateRequest { status };
            let result = self.gateway.update_reservation_status(id, &request).await;

            if let Err(e) = expect_status(result, STATUS_OK) {
                tracing::warn!(reservation_id = %id, %status, error = %e, "Status change failed");
                self.store.set_error(failure_message(&e));
                // The toast carries the server's own message here
                self.notifier.error(&e.display_message());
                return Err(e);
            }

            tracing::info!(reservation_id = %id, %status, "Reservation status changed");
            self.notifier.success(notice::STATUS_UPDATED);
        }

        match self.store.begin_reload() {
            Some(busy) => {
                if let Err(e) = self.run_search(busy).await {
                    tracing::warn!(error = %e, "List reload after status change failed");
                }
            }
            None => tracing::debug!(reservation_id = %id, "List reload queued behind in-flight search"),
        }
        Ok(())
    }

    /// Load one reservation and open its contact details
    pub async fn fetch_detail(&self, id: &str) -> WorkflowResult<Reservation> {
        if self.store.is_fetching_detail() {
            return Err(WorkflowError::Busy);
        }

        self.store.clear_error();

        let Some(_busy) = self.store.begin_fetch_detail() else {
            return Err(WorkflowError::Busy);
        };

        let result = self.gateway.find_reservation_by_id(id).await;
        let outcome = expect_status(result, STATUS_OK).and_then(|data| {
            data.ok_or_else(|| {
                ClientError::InvalidResponse(format!("Reservation {id} missing from response"))
                    .into()
            })
        });

        match outcome {
            Ok(reservation) => {
                self.store.inspect(reservation.clone());
                Ok(reservation)
            }
            Err(e) => {
                tracing::warn!(reservation_id = %id, error = %e, "Reservation detail fetch failed");
                self.store.set_error(failure_message(&e));
                self.notifier.error(notice::FAILED);
                Err(e)
            }
        }
    }
}
