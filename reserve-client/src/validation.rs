//! Input validation
//!
//! Pure functions from form input to a [`FieldErrors`] map. An empty map
//! means the input may be submitted. No I/O, no clock reads: callers pass
//! `today`.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use shared::models::{MAX_SPECIAL_REQUESTS_LEN, MAX_TABLE_SIZE, MIN_TABLE_SIZE};

use crate::form::{FieldErrors, FormField, ReservationForm, SearchForm};

/// How far ahead a reservation may be booked
pub const MAX_DAYS_AHEAD: u64 = 30;

/// Mobile number after stripping non-digits
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("phone pattern is valid"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validate the guest creation form
pub fn validate_create(form: &ReservationForm, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_guest_name(form, &mut errors);
    check_phone(&form.guest_phone, &mut errors);
    check_booking(form, today, &mut errors);
    errors
}

/// Validate the guest edit form
///
/// The phone number identified the guest during lookup and is not
/// re-checked here.
pub fn validate_update(form: &ReservationForm, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_guest_name(form, &mut errors);
    check_booking(form, today, &mut errors);
    errors
}

/// Validate the guest lookup form
pub fn validate_search(form: &SearchForm) -> FieldErrors {
    const ONE_OF: &str = "At least one of the field is required";

    let mut errors = FieldErrors::new();
    if form.date.is_none() {
        errors.insert(FormField::ExpectedArrivalDate, "Date is required");
    }
    if form.phone.trim().is_empty() && form.reservation_code.trim().is_empty() {
        errors.insert(FormField::GuestPhone, ONE_OF);
        errors.insert(FormField::ReservationCode, ONE_OF);
    }
    errors
}

/// Is `phone` a valid mobile number once non-digits are stripped?
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    PHONE_RE.is_match(&digits)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_guest_name(form: &ReservationForm, errors: &mut FieldErrors) {
    if form.guest_name.trim().is_empty() {
        errors.insert(FormField::GuestName, "Guest name is required");
    }
}

fn check_phone(phone: &str, errors: &mut FieldErrors) {
    if phone.trim().is_empty() {
        errors.insert(FormField::GuestPhone, "Phone number is required");
    } else if !is_valid_phone(phone) {
        errors.insert(FormField::GuestPhone, "Please enter a valid phone number");
    }
}

/// Email, date, slot, party size, and notes: shared by create and edit
fn check_booking(form: &ReservationForm, today: NaiveDate, errors: &mut FieldErrors) {
    let email = form.guest_email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(FormField::GuestEmail, "Please enter a valid email address");
    }

    match form.expected_arrival_date {
        None => errors.insert(FormField::ExpectedArrivalDate, "Expected arrival date is required"),
        Some(date) => {
            if let Some(message) = check_arrival_date(date, today) {
                errors.insert(FormField::ExpectedArrivalDate, message);
            }
        }
    }

    if form.expected_arrival_time.is_none() {
        errors.insert(FormField::ExpectedArrivalTime, "Please select arrival time");
    }

    match form.table_size {
        Some(size) if size > MAX_TABLE_SIZE => {
            errors.insert(FormField::TableSize, "Table size cannot exceed 20 people")
        }
        Some(size) if size >= MIN_TABLE_SIZE => {}
        _ => errors.insert(FormField::TableSize, "Table size must be at least 1"),
    }

    if form.special_requests.chars().count() > MAX_SPECIAL_REQUESTS_LEN {
        errors.insert(
            FormField::SpecialRequests,
            "Special requests cannot exceed 100 characters",
        );
    }
}

/// Day granularity: tomorrow is the earliest bookable day, today + 30 the
/// latest.
fn check_arrival_date(date: NaiveDate, today: NaiveDate) -> Option<&'static str> {
    let earliest = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let latest = today
        .checked_add_days(Days::new(MAX_DAYS_AHEAD))
        .unwrap_or(NaiveDate::MAX);

    if date < earliest {
        Some("Arrival date must be at least tomorrow")
    } else if date > latest {
        Some("Arrival date cannot be more than 30 days in advance")
    } else {
        None
    }
}
