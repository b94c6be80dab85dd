//! Calendar-date helpers for the `published` field. Dates are treated as
//! plain calendar dates with no time zone attached, so a `2024-01-10` article
//! reads as January 10 for every reader regardless of their offset.

use crate::escape::escape_html;
use chrono::{Duration, NaiveDate};
use std::convert::TryFrom;

/// Parses a `YYYY-MM-DD` string. The text is split on `-` and the first three
/// components are read as year, month (1-based), and day. Returns `None` if
/// any of them is missing, non-numeric, or zero. Components past the third
/// are ignored.
///
/// Out-of-range months and days roll forward the way a local calendar
/// constructor does: `2023-02-30` is March 2, 2023 and `2023-13-01` is
/// January 1, 2024. Two-digit years (1 through 99) are read as 1901 through
/// 1999.
pub fn parse_local_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-').map(component);
    let year = parts.next()??;
    let month = parts.next()??;
    let day = parts.next()??;

    let year = if (1..=99).contains(&year) {
        year + 1900
    } else {
        year
    };

    // Normalize the month first so the day offset is applied to a real
    // first-of-month.
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    let day_offset = i32::try_from(day - 1).ok()?;
    first_of_month.checked_add_signed(Duration::days(i64::from(day_offset)))
}

/// Formats a `YYYY-MM-DD` string as `Month D, YYYY` (e.g. `January 10,
/// 2024`). If the string doesn't parse (see [`parse_local_date`]), the
/// original text is returned HTML-escaped.
pub fn format_display_date(s: &str) -> String {
    match parse_local_date(s) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => escape_html(s),
    }
}

// A date component is usable if it's a nonzero integer.
fn component(s: &str) -> Option<i64> {
    match s.trim().parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_local_date() {
        assert_eq!(parse_local_date("2024-01-10"), ymd(2024, 1, 10));
        assert_eq!(parse_local_date("2023-12-31"), ymd(2023, 12, 31));
        assert_eq!(parse_local_date("2024-1-5"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_local_date_rejects_missing_or_zero_components() {
        assert_eq!(parse_local_date(""), None);
        assert_eq!(parse_local_date("2024"), None);
        assert_eq!(parse_local_date("2024-01"), None);
        assert_eq!(parse_local_date("2024-00-10"), None);
        assert_eq!(parse_local_date("2024-01-00"), None);
        assert_eq!(parse_local_date("soon"), None);
        assert_eq!(parse_local_date("2024-Jan-10"), None);
        assert_eq!(parse_local_date("2024/01/10"), None);
    }

    #[test]
    fn test_parse_local_date_rolls_over() {
        assert_eq!(parse_local_date("2023-02-30"), ymd(2023, 3, 2));
        assert_eq!(parse_local_date("2023-13-01"), ymd(2024, 1, 1));
        assert_eq!(parse_local_date("2024-02-29"), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_local_date_two_digit_year() {
        assert_eq!(parse_local_date("99-06-01"), ymd(1999, 6, 1));
    }

    #[test]
    fn test_parse_local_date_ignores_extra_components() {
        assert_eq!(parse_local_date("2024-01-10-extra"), ymd(2024, 1, 10));
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-01-10"), "January 10, 2024");
        assert_eq!(format_display_date("2023-05-01"), "May 1, 2023");
    }

    #[test]
    fn test_format_display_date_falls_back_to_escaped_input() {
        assert_eq!(format_display_date("TBD <soon>"), "TBD &lt;soon&gt;");
        assert_eq!(format_display_date(""), "");
    }
}
