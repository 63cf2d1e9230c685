//! Guest lookup, edit and cancel store
//!
//! Three slices share one page. Each has its own busy flag and error so a
//! failure in one never clobbers another. `found_reservation` is the hinge:
//! setting it seeds the edit form, and [`GuestLookupStore::back_to_search`]
//! clears everything in a single write.

use shared::Reservation;
use tokio::sync::broadcast;

use super::{BusyGuard, Store, StoreChange, StoreSlice};
use crate::form::{FieldErrors, FieldUpdate, ReservationForm, SearchFieldUpdate, SearchForm};

/// Locate a reservation by date plus phone or code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSlice {
    pub show_form: bool,
    pub form: SearchForm,
    pub loading: bool,
    pub error: Option<String>,
    pub form_errors: FieldErrors,
}

/// Edit a located, not-yet-approved reservation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSlice {
    pub show_form: bool,
    pub form: ReservationForm,
    pub updating: bool,
    pub error: Option<String>,
    pub form_errors: FieldErrors,
}

/// Cancel a located reservation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelSlice {
    pub cancelling: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestLookupState {
    pub search: SearchSlice,
    pub edit: EditSlice,
    pub cancel: CancelSlice,
    /// Snapshot returned by the last successful lookup
    pub found_reservation: Option<Reservation>,
}

#[derive(Debug)]
pub struct GuestLookupStore {
    inner: Store<GuestLookupState>,
}

impl Default for GuestLookupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestLookupStore {
    pub fn new() -> Self {
        Self {
            inner: Store::new(StoreSlice::GuestLookup, GuestLookupState::default()),
        }
    }

    pub(crate) fn with_upstream(upstream: broadcast::Sender<StoreChange>) -> Self {
        Self {
            inner: Store::new(StoreSlice::GuestLookup, GuestLookupState::default())
                .with_upstream(upstream),
        }
    }

    pub fn snapshot(&self) -> GuestLookupState {
        self.inner.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.inner.subscribe()
    }

    pub fn found_reservation(&self) -> Option<Reservation> {
        self.inner.read(|s| s.found_reservation.clone())
    }

    pub fn is_searching(&self) -> bool {
        self.inner.read(|s| s.search.loading)
    }

    pub fn is_updating(&self) -> bool {
        self.inner.read(|s| s.edit.updating)
    }

    pub fn is_cancelling(&self) -> bool {
        self.inner.read(|s| s.cancel.cancelling)
    }

    // ========== Search ==========

    pub fn search_form(&self) -> SearchForm {
        self.inner.read(|s| s.search.form.clone())
    }

    pub fn set_show_search_form(&self, show: bool) {
        self.inner
            .update("setShowSearchReservationForm", |s| s.search.show_form = show);
    }

    pub fn set_search_form(&self, updates: impl IntoIterator<Item = SearchFieldUpdate>) {
        self.inner
            .update("setSearchForm", |s| s.search.form.apply(updates));
    }

    /// Merge the user's edits and drop the errors of exactly those fields
    pub fn search_fields_changed(&self, updates: impl IntoIterator<Item = SearchFieldUpdate>) {
        self.inner.update("searchFieldsChanged", |s| {
            for update in updates {
                s.search.form_errors.remove(update.field());
                s.search.form.apply([update]);
            }
        });
    }

    pub fn reset_search_form(&self) {
        self.inner
            .update("resetSearchForm", |s| s.search.form = SearchForm::default());
    }

    pub fn set_search_form_errors(&self, errors: FieldErrors) {
        self.inner
            .update("setSearchFormErrors", |s| s.search.form_errors = errors);
    }

    pub fn clear_search_form_errors(&self) {
        self.inner.update("clearSearchFormErrors", |s| {
            s.search.form_errors = FieldErrors::new()
        });
    }

    pub fn set_search_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.inner
            .update("setSearchError", |s| s.search.error = Some(error));
    }

    pub fn clear_search_error(&self) {
        self.inner.update("clearSearchError", |s| s.search.error = None);
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.update("setLoading", |s| s.search.loading = loading);
    }

    pub(crate) fn begin_search(&self) -> Option<BusyGuard<'_, GuestLookupState>> {
        BusyGuard::acquire(&self.inner, |s| &mut s.search.loading, "setLoading", "setLoading")
    }

    /// Set (or clear) the located reservation, seeding the edit form from it
    ///
    /// Clearing it also drops the edit form, so no edit view outlives the
    /// reservation it was seeded from.
    pub fn set_found_reservation(&self, reservation: Option<Reservation>) {
        self.inner.update("setFoundReservation", |s| {
            match &reservation {
                Some(r) => {
                    s.edit.form = ReservationForm::from(r);
                    s.edit.show_form = r.is_guest_editable();
                }
                None => {
                    s.edit.form = ReservationForm::default();
                    s.edit.show_form = false;
                }
            }
            s.found_reservation = reservation;
        });
    }

    // ========== Edit ==========

    pub fn edit_form(&self) -> ReservationForm {
        self.inner.read(|s| s.edit.form.clone())
    }

    pub fn set_show_update_form(&self, show: bool) {
        self.inner
            .update("setShowUpdateReservationForm", |s| s.edit.show_form = show);
    }

    pub fn set_edit_form(&self, updates: impl IntoIterator<Item = FieldUpdate>) {
        self.inner.update("setEditForm", |s| s.edit.form.apply(updates));
    }

    /// Merge the user's edits and drop the errors of exactly those fields
    pub fn edit_fields_changed(&self, updates: impl IntoIterator<Item = FieldUpdate>) {
        self.inner.update("editFieldsChanged", |s| {
            for update in updates {
                s.edit.form_errors.remove(update.field());
                s.edit.form.apply([update]);
            }
        });
    }

    pub fn reset_edit_form(&self) {
        self.inner
            .update("resetEditForm", |s| s.edit.form = ReservationForm::default());
    }

    pub fn set_edit_form_errors(&self, errors: FieldErrors) {
        self.inner
            .update("setEditFormErrors", |s| s.edit.form_errors = errors);
    }

    pub fn clear_edit_form_errors(&self) {
        self.inner.update("clearEditFormErrors", |s| {
            s.edit.form_errors = FieldErrors::new()
        });
    }

    pub fn set_update_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.inner
            .update("setUpdateError", |s| s.edit.error = Some(error));
    }

    pub fn clear_update_error(&self) {
        self.inner.update("clearUpdateError", |s| s.edit.error = None);
    }

    pub fn set_updating(&self, updating: bool) {
        self.inner.update("setUpdating", |s| s.edit.updating = updating);
    }

    pub(crate) fn begin_update(&self) -> Option<BusyGuard<'_, GuestLookupState>> {
        BusyGuard::acquire(&self.inner, |s| &mut s.edit.updating, "setUpdating", "setUpdating")
    }

    // ========== Cancel ==========

    pub fn set_cancel_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.inner
            .update("setCancelError", |s| s.cancel.error = Some(error));
    }

    pub fn clear_cancel_error(&self) {
        self.inner.update("clearCancelError", |s| s.cancel.error = None);
    }

    pub fn set_cancelling(&self, cancelling: bool) {
        self.inner
            .update("setCancelling", |s| s.cancel.cancelling = cancelling);
    }

    pub(crate) fn begin_cancel(&self) -> Option<BusyGuard<'_, GuestLookupState>> {
        BusyGuard::acquire(
            &self.inner,
            |s| &mut s.cancel.cancelling,
            "setCancelling",
            "setCancelling",
        )
    }

    // ========== Compound ==========

    /// Drop the located reservation and every form value and error on the
    /// page. Busy flags of in-flight actions are left to their guards.
    pub fn back_to_search(&self) {
        self.inner.update("backToSearch", |s| {
            s.found_reservation = None;
            s.search.form = SearchForm::default();
            s.search.form_errors = FieldErrors::new();
            s.search.error = None;
            s.edit.form = ReservationForm::default();
            s.edit.form_errors = FieldErrors::new();
            s.edit.error = None;
            s.edit.show_form = false;
            s.cancel.error = None;
        });
    }

    /// Restore the initial state
    pub fn clear_state(&self) {
        self.inner
            .update("clearState", |s| *s = GuestLookupState::default());
    }
}
