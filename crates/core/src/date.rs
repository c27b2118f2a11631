//! Project date validation and canonicalization.
//!
//! Project documents carry their date as free text entered in the admin
//! form. Only strict `YYYY-MM-DD` strings that name a real calendar day are
//! accepted; everything else is treated as "no date" by the gallery.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Canonical on-disk and display format for project dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

/// Parse `input` as a canonical calendar date.
///
/// Returns `None` when the string does not have the `YYYY-MM-DD` shape or
/// when the parts do not form a real date (`2023-02-30`, `2023-13-01`).
/// Each rejection is logged at warn level; callers drop the value silently.
pub fn normalize_date(input: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(input) {
        tracing::warn!(value = %input, "Invalid date format");
        return None;
    }

    // ASCII-only pattern, so the byte offsets below are char boundaries.
    let year: i32 = input[0..4].parse().ok()?;
    let month: u32 = input[5..7].parse().ok()?;
    let day: u32 = input[8..10].parse().ok()?;

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => Some(date),
        None => {
            tracing::warn!(value = %input, "Invalid date value");
            None
        }
    }
}

/// Canonical `YYYY-MM-DD` rendering of `input`, or `None` if it is invalid.
pub fn canonical_date(input: &str) -> Option<String> {
    normalize_date(input).map(|d| d.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_dates_round_trip_unchanged() {
        for input in ["2024-01-31", "2000-02-29", "1999-12-01", "2023-06-15"] {
            assert_eq!(canonical_date(input).as_deref(), Some(input));
        }
    }

    #[test]
    fn rolled_over_day_is_rejected() {
        assert_eq!(canonical_date("2023-02-30"), None);
        assert_eq!(canonical_date("2023-02-29"), None);
        assert_eq!(canonical_date("2023-04-31"), None);
    }

    #[test]
    fn out_of_range_month_and_day_zero_are_rejected() {
        assert_eq!(canonical_date("2023-13-01"), None);
        assert_eq!(canonical_date("2023-00-10"), None);
        assert_eq!(canonical_date("2023-05-00"), None);
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        for input in ["", "2023-1-01", "2023/01/01", "20230101", " 2023-01-01", "2023-01-01T00:00"] {
            assert_eq!(normalize_date(input), None, "{input:?} should be rejected");
        }
    }

    #[test]
    fn normalize_returns_calendar_date() {
        let date = normalize_date("2021-10-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 10, 5).unwrap());
    }
}
