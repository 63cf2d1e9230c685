//! Form data and field-level errors
//!
//! Field identifiers are a closed set, so clearing the error of an edited
//! field is a typed lookup rather than string indexing.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::request::{CreateReservationRequest, UpdateReservationRequest};
use shared::{ArrivalSlot, Reservation};

use crate::time;

/// Default party size of a fresh form
pub const DEFAULT_TABLE_SIZE: u32 = 2;

/// Every input that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    GuestName,
    GuestPhone,
    GuestEmail,
    ExpectedArrivalDate,
    ExpectedArrivalTime,
    TableSize,
    SpecialRequests,
    ReservationCode,
}

impl FormField {
    /// Wire/form key of the field
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::GuestName => "guestName",
            Self::GuestPhone => "guestPhone",
            Self::GuestEmail => "guestEmail",
            Self::ExpectedArrivalDate => "expectedArrivalDate",
            Self::ExpectedArrivalTime => "expectedArrivalTime",
            Self::TableSize => "tableSize",
            Self::SpecialRequests => "specialRequests",
            Self::ReservationCode => "reservationCode",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Field → message map produced by validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    /// Drop the errors of the given fields, leaving the rest untouched
    pub fn clear_fields(&mut self, fields: impl IntoIterator<Item = FormField>) {
        for field in fields {
            self.0.remove(&field);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl FromIterator<(FormField, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FormField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Reservation form (create + edit)
// =============================================================================

/// Creatable/editable subset of a reservation, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationForm {
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub expected_arrival_date: Option<NaiveDate>,
    pub expected_arrival_time: Option<ArrivalSlot>,
    pub table_size: Option<u32>,
    pub special_requests: String,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            guest_name: String::new(),
            guest_phone: String::new(),
            guest_email: String::new(),
            expected_arrival_date: None,
            expected_arrival_time: None,
            table_size: Some(DEFAULT_TABLE_SIZE),
            special_requests: String::new(),
        }
    }
}

impl ReservationForm {
    /// Merge field updates into the form
    pub fn apply(&mut self, updates: impl IntoIterator<Item = FieldUpdate>) {
        for update in updates {
            match update {
                FieldUpdate::GuestName(v) => self.guest_name = v,
                FieldUpdate::GuestPhone(v) => self.guest_phone = v,
                FieldUpdate::GuestEmail(v) => self.guest_email = v,
                FieldUpdate::ExpectedArrivalDate(v) => self.expected_arrival_date = v,
                FieldUpdate::ExpectedArrivalTime(v) => self.expected_arrival_time = v,
                FieldUpdate::TableSize(v) => self.table_size = v,
                FieldUpdate::SpecialRequests(v) => self.special_requests = v,
            }
        }
    }
}

impl From<&Reservation> for ReservationForm {
    fn from(r: &Reservation) -> Self {
        Self {
            guest_name: r.guest_name.clone(),
            guest_phone: r.guest_phone.clone(),
            guest_email: r.guest_email.clone().unwrap_or_default(),
            expected_arrival_date: Some(r.expected_arrival_date.with_timezone(&Local).date_naive()),
            expected_arrival_time: Some(r.expected_arrival_time),
            table_size: Some(r.table_size),
            special_requests: r.special_requests.clone(),
        }
    }
}

impl ReservationForm {
    /// Trimmed payload for `POST /reservations`; `None` while a required
    /// field is still empty
    pub fn to_create_request(&self) -> Option<CreateReservationRequest> {
        Some(CreateReservationRequest {
            guest_name: self.guest_name.trim().to_string(),
            guest_email: self.guest_email.trim().to_string(),
            guest_phone: self.guest_phone.trim().to_string(),
            table_size: self.table_size?,
            expected_arrival_date: time::canonical_instant(self.expected_arrival_date?),
            expected_arrival_time: self.expected_arrival_time?,
            special_requests: self.special_requests.trim().to_string(),
        })
    }

    /// Trimmed payload for `PATCH /reservations/guest/{id}`
    pub fn to_update_request(&self) -> Option<UpdateReservationRequest> {
        Some(UpdateReservationRequest {
            guest_name: self.guest_name.trim().to_string(),
            guest_phone: self.guest_phone.trim().to_string(),
            guest_email: self.guest_email.trim().to_string(),
            table_size: self.table_size?,
            expected_arrival_date: time::canonical_instant(self.expected_arrival_date?),
            expected_arrival_time: self.expected_arrival_time?,
            special_requests: self.special_requests.trim().to_string(),
        })
    }
}

/// A single edited input of a [`ReservationForm`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    GuestName(String),
    GuestPhone(String),
    GuestEmail(String),
    ExpectedArrivalDate(Option<NaiveDate>),
    ExpectedArrivalTime(Option<ArrivalSlot>),
    TableSize(Option<u32>),
    SpecialRequests(String),
}

impl FieldUpdate {
    pub fn field(&self) -> FormField {
        match self {
            Self::GuestName(_) => FormField::GuestName,
            Self::GuestPhone(_) => FormField::GuestPhone,
            Self::GuestEmail(_) => FormField::GuestEmail,
            Self::ExpectedArrivalDate(_) => FormField::ExpectedArrivalDate,
            Self::ExpectedArrivalTime(_) => FormField::ExpectedArrivalTime,
            Self::TableSize(_) => FormField::TableSize,
            Self::SpecialRequests(_) => FormField::SpecialRequests,
        }
    }
}

// =============================================================================
// Guest lookup form
// =============================================================================

/// Inputs used to locate a reservation: date plus phone or code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchForm {
    pub date: Option<NaiveDate>,
    pub phone: String,
    pub reservation_code: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            date: Some(time::today()),
            phone: String::new(),
            reservation_code: String::new(),
        }
    }
}

impl SearchForm {
    pub fn apply(&mut self, updates: impl IntoIterator<Item = SearchFieldUpdate>) {
        for update in updates {
            match update {
                SearchFieldUpdate::Date(v) => self.date = v,
                SearchFieldUpdate::Phone(v) => self.phone = v,
                SearchFieldUpdate::ReservationCode(v) => self.reservation_code = v,
            }
        }
    }
}

/// A single edited input of a [`SearchForm`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFieldUpdate {
    Date(Option<NaiveDate>),
    Phone(String),
    ReservationCode(String),
}

impl SearchFieldUpdate {
    /// Search inputs report errors under the reservation field keys
    pub fn field(&self) -> FormField {
        match self {
            Self::Date(_) => FormField::ExpectedArrivalDate,
            Self::Phone(_) => FormField::GuestPhone,
            Self::ReservationCode(_) => FormField::ReservationCode,
        }
    }
}
