//! Calendar helpers
//!
//! Form dates are plain calendar days in the guest's local timezone.
//! Requests carry them as the UTC instant of local midnight.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Today's calendar date (local timezone)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local midnight of `date` as a UTC instant
///
/// DST gap fallback: if local midnight does not exist, UTC midnight is used.
pub fn canonical_instant(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// RFC 3339 rendering of [`canonical_instant`], as sent in query strings
pub fn canonical_iso(date: NaiveDate) -> String {
    canonical_instant(date).to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_instant_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 26).unwrap();
        let instant = canonical_instant(date);
        assert_eq!(instant.with_timezone(&Local).date_naive(), date);
        assert_eq!(instant.with_timezone(&Local).time(), chrono::NaiveTime::MIN);
    }

    #[test]
    fn test_canonical_iso_uses_z_suffix() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 26).unwrap();
        let iso = canonical_iso(date);
        assert!(iso.ends_with('Z'));
        assert_eq!(DateTime::parse_from_rfc3339(&iso).unwrap(), canonical_instant(date));
    }
}
