//! Guest creation store
//!
//! Holds the creation form, its busy/error flags, the reservations known to
//! this client, and which of the form/success views is showing.

use shared::Reservation;
use tokio::sync::broadcast;

use super::{BusyGuard, Store, StoreChange, StoreSlice};
use crate::form::{FieldErrors, FieldUpdate, FormField, ReservationForm};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationState {
    // UI
    pub show_make_reservation_form: bool,
    pub show_success_reservation: bool,

    // Form
    pub reservation_form: ReservationForm,

    // Data
    pub reservations: Vec<Reservation>,
    pub selected_reservation: Option<Reservation>,
    pub reservation_count: usize,
    pub created_reservation: Option<Reservation>,

    // Loading
    pub is_creating: bool,

    // Errors
    pub error: Option<String>,
    pub form_errors: FieldErrors,
}

/// Store for the guest creation flow
#[derive(Debug)]
pub struct ReservationStore {
    inner: Store<ReservationState>,
}

impl Default for ReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationStore {
    pub fn new() -> Self {
        Self {
            inner: Store::new(StoreSlice::Reservation, ReservationState::default()),
        }
    }

    pub(crate) fn with_upstream(upstream: broadcast::Sender<StoreChange>) -> Self {
        Self {
            inner: Store::new(StoreSlice::Reservation, ReservationState::default())
                .with_upstream(upstream),
        }
    }

    pub fn snapshot(&self) -> ReservationState {
        self.inner.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.inner.subscribe()
    }

    pub fn form(&self) -> ReservationForm {
        self.inner.read(|s| s.reservation_form.clone())
    }

    pub fn is_creating(&self) -> bool {
        self.inner.read(|s| s.is_creating)
    }

    pub fn error(&self) -> Option<String> {
        self.inner.read(|s| s.error.clone())
    }

    pub fn form_errors(&self) -> FieldErrors {
        self.inner.read(|s| s.form_errors.clone())
    }

    // ========== UI ==========

    pub fn set_show_make_reservation_form(&self, show: bool) {
        self.inner
            .update("setShowMakeReservationForm", |s| s.show_make_reservation_form = show);
    }

    pub fn set_show_success_reservation(&self, show: bool) {
        self.inner
            .update("setShowSuccessReservation", |s| s.show_success_reservation = show);
    }

    /// Leave the success view and start a new form
    pub fn create_another(&self) {
        self.inner.update("createAnother", |s| {
            s.show_success_reservation = false;
            s.show_make_reservation_form = true;
        });
    }

    // ========== Form ==========

    /// Merge field updates into the form
    pub fn set_reservation_form(&self, updates: impl IntoIterator<Item = FieldUpdate>) {
        self.inner
            .update("setReservationForm", |s| s.reservation_form.apply(updates));
    }

    /// Merge the user's edits and drop the errors of exactly those fields
    pub fn fields_changed(&self, updates: impl IntoIterator<Item = FieldUpdate>) {
        self.inner.update("fieldsChanged", |s| {
            for update in updates {
                s.form_errors.remove(update.field());
                s.reservation_form.apply([update]);
            }
        });
    }

    pub fn reset_reservation_form(&self) {
        self.inner.update("resetReservationForm", |s| {
            s.reservation_form = ReservationForm::default()
        });
    }

    pub fn set_form_errors(&self, errors: FieldErrors) {
        self.inner.update("setFormErrors", |s| s.form_errors = errors);
    }

    pub fn clear_form_errors(&self) {
        self.inner
            .update("clearFormErrors", |s| s.form_errors = FieldErrors::new());
    }

    pub fn clear_field_errors(&self, fields: impl IntoIterator<Item = FormField>) {
        self.inner
            .update("clearFieldErrors", |s| s.form_errors.clear_fields(fields));
    }

    // ========== Data ==========

    pub fn set_reservations(&self, reservations: Vec<Reservation>) {
        self.inner.update("setReservations", |s| {
            s.reservation_count = reservations.len();
            s.reservations = reservations;
        });
    }

    pub fn add_reservation(&self, reservation: Reservation) {
        self.inner.update("addReservation", |s| {
            s.reservations.push(reservation);
            s.reservation_count = s.reservations.len();
        });
    }

    /// Replace the cached entry with the same id; unknown ids are ignored
    pub fn replace_reservation(&self, reservation: Reservation) {
        self.inner.update("updateReservation", |s| {
            if let Some(slot) = s.reservations.iter_mut().find(|r| r.id == reservation.id) {
                *slot = reservation;
            }
        });
    }

    pub fn remove_reservation(&self, id: &str) {
        self.inner.update("removeReservation", |s| {
            s.reservations.retain(|r| r.id != id);
            s.reservation_count = s.reservations.len();
        });
    }

    pub fn set_selected_reservation(&self, reservation: Option<Reservation>) {
        self.inner
            .update("setSelectedReservation", |s| s.selected_reservation = reservation);
    }

    pub fn set_created_reservation(&self, reservation: Option<Reservation>) {
        self.inner
            .update("setCreatedReservation", |s| s.created_reservation = reservation);
    }

    /// Store the server's new reservation and switch to the success view
    pub(crate) fn record_created(&self, reservation: Reservation) {
        self.inner.update("recordCreated", |s| {
            s.created_reservation = Some(reservation.clone());
            s.show_success_reservation = true;
            s.show_make_reservation_form = false;
            s.reservations.push(reservation);
            s.reservation_count = s.reservations.len();
            s.reservation_form = ReservationForm::default();
        });
    }

    // ========== Loading ==========

    pub fn set_is_creating(&self, creating: bool) {
        self.inner.update("setIsCreating", |s| s.is_creating = creating);
    }

    pub(crate) fn begin_creating(&self) -> Option<BusyGuard<'_, ReservationState>> {
        BusyGuard::acquire(
            &self.inner,
            |s| &mut s.is_creating,
            "setIsCreating",
            "setIsCreating",
        )
    }

    // ========== Errors ==========

    pub fn set_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.inner.update("setError", |s| s.error = Some(error));
    }

    pub fn clear_error(&self) {
        self.inner.update("clearError", |s| s.error = None);
    }

    // ========== Reset ==========

    pub fn reset(&self) {
        self.inner
            .update("resetReservationState", |s| *s = ReservationState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{ArrivalSlot, ReservationStatus};

    fn reservation(id: &str, name: &str) -> Reservation {
        Reservation {
            id: id.into(),
            reservation_code: "AB12CD".into(),
            guest_name: name.into(),
            guest_phone: "13912345678".into(),
            guest_email: None,
            table_size: 2,
            expected_arrival_date: Utc.with_ymd_and_hms(2026, 10, 26, 0, 0, 0).unwrap(),
            expected_arrival_time: ArrivalSlot::Lunch,
            special_requests: String::new(),
            status: ReservationStatus::Requested,
            remarks: None,
            approved_by: None,
            cancelled_by: None,
            cancelled_at: None,
            completed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_list_mutations_by_id() {
        let store = ReservationStore::new();
        store.add_reservation(reservation("a", "Ann"));
        store.add_reservation(reservation("b", "Bob"));
        assert_eq!(store.snapshot().reservation_count, 2);

        store.replace_reservation(reservation("b", "Bobby"));
        store.replace_reservation(reservation("zzz", "Nobody"));
        let state = store.snapshot();
        assert_eq!(state.reservations.len(), 2);
        assert_eq!(state.reservations[1].guest_name, "Bobby");

        store.remove_reservation("a");
        store.remove_reservation("a");
        let state = store.snapshot();
        assert_eq!(state.reservation_count, 1);
        assert_eq!(state.reservations[0].id, "b");
    }

    #[test]
    fn test_form_merge_and_reset() {
        let store = ReservationStore::new();
        store.set_reservation_form([FieldUpdate::GuestName("John".into())]);
        store.set_reservation_form([FieldUpdate::TableSize(Some(4))]);
        let form = store.form();
        assert_eq!(form.guest_name, "John");
        assert_eq!(form.table_size, Some(4));

        store.reset_reservation_form();
        assert_eq!(store.form(), ReservationForm::default());
    }

    #[test]
    fn test_fields_changed_clears_only_edited_errors() {
        let store = ReservationStore::new();
        let mut errors = FieldErrors::new();
        errors.insert(FormField::GuestName, "Guest name is required");
        errors.insert(FormField::GuestPhone, "Phone number is required");
        store.set_form_errors(errors);

        store.fields_changed([FieldUpdate::GuestName("J".into())]);
        let state = store.snapshot();
        assert!(!state.form_errors.contains(FormField::GuestName));
        assert!(state.form_errors.contains(FormField::GuestPhone));
        assert_eq!(state.reservation_form.guest_name, "J");
    }

    #[test]
    fn test_clearing_errors_is_idempotent() {
        let store = ReservationStore::new();
        let mut errors = FieldErrors::new();
        errors.insert(FormField::TableSize, "Table size must be at least 1");
        store.set_form_errors(errors);

        store.clear_form_errors();
        let once = store.snapshot();
        store.clear_form_errors();
        assert_eq!(store.snapshot(), once);
        assert!(once.form_errors.is_empty());

        store.clear_error();
        store.clear_error();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_create_another_flips_views() {
        let store = ReservationStore::new();
        store.record_created(reservation("a", "Ann"));
        let state = store.snapshot();
        assert!(state.show_success_reservation);
        assert!(!state.show_make_reservation_form);

        store.create_another();
        let state = store.snapshot();
        assert!(!state.show_success_reservation);
        assert!(state.show_make_reservation_form);
        // The created snapshot stays available
        assert!(state.created_reservation.is_some());
    }
}
