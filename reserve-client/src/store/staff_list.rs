//! Staff reservation list store
//!
//! The list is whatever the server returned for the active filter; each
//! search replaces it wholesale.

use chrono::NaiveDate;
use shared::request::ReservationQueryVariables;
use shared::{Reservation, ReservationStatus};
use tokio::sync::broadcast;

use super::{BusyGuard, Store, StoreChange, StoreSlice};
use crate::time;

/// Staff list filter, passed through to the server as query variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    /// Phone number or reservation code
    pub search_text: String,
    pub page: u32,
    /// 0 = server default
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: String,
}

impl Default for StaffFilter {
    fn default() -> Self {
        Self {
            date: Some(time::today()),
            status: None,
            search_text: String::new(),
            page: 1,
            limit: 0,
            sort_by: String::new(),
            sort_order: String::new(),
        }
    }
}

impl StaffFilter {
    pub fn to_variables(&self) -> ReservationQueryVariables {
        let search_text = self.search_text.trim();
        ReservationQueryVariables {
            date: self.date.map(time::canonical_iso).unwrap_or_default(),
            status: self.status,
            search_text: (!search_text.is_empty()).then(|| search_text.to_string()),
            page: self.page.max(1),
            limit: self.limit,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffListState {
    pub filter: StaffFilter,
    pub reservations: Vec<Reservation>,
    pub current_reservation: Option<Reservation>,
    pub show_contact_info_form: bool,
    pub searching: bool,
    /// Another search was asked for while one was in flight
    pub reload_pending: bool,
    pub updating_status: bool,
    pub fetching_detail: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct StaffListStore {
    inner: Store<StaffListState>,
}

impl Default for StaffListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffListStore {
    pub fn new() -> Self {
        Self {
            inner: Store::new(StoreSlice::StaffList, StaffListState::default()),
        }
    }

    pub(crate) fn with_upstream(upstream: broadcast::Sender<StoreChange>) -> Self {
        Self {
            inner: Store::new(StoreSlice::StaffList, StaffListState::default())
                .with_upstream(upstream),
        }
    }

    pub fn snapshot(&self) -> StaffListState {
        self.inner.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.inner.subscribe()
    }

    pub fn filter(&self) -> StaffFilter {
        self.inner.read(|s| s.filter.clone())
    }

    pub fn set_filter(&self, filter: StaffFilter) {
        self.inner.update("setFilter", |s| s.filter = filter);
    }

    pub fn reset_filter(&self) {
        self.inner
            .update("resetFilter", |s| s.filter = StaffFilter::default());
    }

    /// Replace the list with the server's result
    pub fn set_reservations(&self, reservations: Vec<Reservation>) {
        self.inner
            .update("setReservations", |s| s.reservations = reservations);
    }

    pub fn set_current_reservation(&self, reservation: Option<Reservation>) {
        self.inner
            .update("setCurrentReservation", |s| s.current_reservation = reservation);
    }

    pub fn set_show_contact_info_form(&self, show: bool) {
        self.inner
            .update("setShowContactInfoForm", |s| s.show_contact_info_form = show);
    }

    /// Show the contact details of one reservation
    pub fn inspect(&self, reservation: Reservation) {
        self.inner.update("inspect", |s| {
            s.current_reservation = Some(reservation);
            s.show_contact_info_form = true;
        });
    }

    pub fn close_contact_info(&self) {
        self.inner
            .update("setShowContactInfoForm", |s| s.show_contact_info_form = false);
    }

    pub fn is_searching(&self) -> bool {
        self.inner.read(|s| s.searching)
    }

    pub fn is_updating_status(&self) -> bool {
        self.inner.read(|s| s.updating_status)
    }

    pub fn set_searching(&self, searching: bool) {
        self.inner.update("setSearching", |s| s.searching = searching);
    }

    pub fn is_fetching_detail(&self) -> bool {
        self.inner.read(|s| s.fetching_detail)
    }

    pub fn set_fetching_detail(&self, fetching: bool) {
        self.inner
            .update("setFetchingDetail", |s| s.fetching_detail = fetching);
    }

    /// Busy guard for a user-initiated search; fails while one is in flight
    pub(crate) fn begin_search(&self) -> Option<BusyGuard<'_, StaffListState>> {
        BusyGuard::acquire(&self.inner, |s| &mut s.searching, "setSearching", "setSearching")
            .map(|guard| guard.with_pending(|s| &mut s.reload_pending))
    }

    /// Busy guard for a reload, or `None` when the reload was handed to the
    /// search already in flight
    pub(crate) fn begin_reload(&self) -> Option<BusyGuard<'_, StaffListState>> {
        BusyGuard::acquire_or_queue(
            &self.inner,
            |s| &mut s.searching,
            |s| &mut s.reload_pending,
            "setSearching",
            "setSearching",
        )
    }

    pub(crate) fn begin_fetch_detail(&self) -> Option<BusyGuard<'_, StaffListState>> {
        BusyGuard::acquire(
            &self.inner,
            |s| &mut s.fetching_detail,
            "setFetchingDetail",
            "setFetchingDetail",
        )
    }

    pub(crate) fn begin_status_update(&self) -> Option<BusyGuard<'_, StaffListState>> {
        BusyGuard::acquire(
            &self.inner,
            |s| &mut s.updating_status,
            "setUpdatingStatus",
            "setUpdatingStatus",
        )
    }

    pub fn error(&self) -> Option<String> {
        self.inner.read(|s| s.error.clone())
    }

    pub fn set_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.inner.update("setError", |s| s.error = Some(error));
    }

    pub fn clear_error(&self) {
        self.inner.update("clearError", |s| s.error = None);
    }

    pub fn reset(&self) {
        self.inner
            .update("resetForm", |s| *s = StaffListState::default());
    }
}
