//! Calendar-date helpers shared by the period generator and the aggregator.
//!
//! Warranty arithmetic works on whole calendar days. An instant is reduced to
//! the date shown on its own wall clock, and that date is pinned to
//! 00:00:00 UTC whenever an instant is needed again (for output).
//!
//! # Anniversaries
//!
//! [`add_years`] shifts by whole calendar years. A Feb-29 date shifted into a
//! non-leap year clamps to Feb-28.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, ParseError, TimeZone, Utc};

/// Calendar date of `t` as seen in its own offset.
pub fn calendar_date<Tz: TimeZone>(t: &DateTime<Tz>) -> NaiveDate {
    t.date_naive()
}

/// Strip the time of day: the calendar date of `t` at 00:00:00 UTC.
///
/// Idempotent: `normalize(&normalize(&t)) == normalize(&t)`.
pub fn normalize<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Utc> {
    at_utc_midnight(calendar_date(t))
}

/// The instant at 00:00:00 UTC on `date`.
pub fn at_utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Shift `date` by `years` calendar years (negative shifts go back).
///
/// Returns `None` only when the result falls outside chrono's date range.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let months = Months::new(years.unsigned_abs().checked_mul(12)?);
    if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

/// Number of calendar days from `start` to `end`, counting both ends.
///
/// A range that opens and closes on the same day is one day long.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// Parse a reference date given either as `YYYY-MM-DD` or as an RFC 3339
/// instant. Instants keep the calendar date of their own offset.
pub fn parse_reference_date(s: &str) -> Result<NaiveDate, ParseError> {
    let s = s.trim();
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => DateTime::parse_from_rfc3339(s).map(|t| calendar_date(&t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalize_strips_time_of_day() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 17, 42, 9).unwrap();
        assert_eq!(
            normalize(&t),
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn normalize_keeps_wall_clock_date_of_offset() {
        // 23:30 in UTC-5 is already the next day in UTC.
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let t = est.with_ymd_and_hms(2024, 3, 15, 23, 30, 0).unwrap();
        assert_eq!(calendar_date(&t), ymd(2024, 3, 15));
        assert_eq!(normalize(&t), at_utc_midnight(ymd(2024, 3, 15)));
    }

    #[test]
    fn normalize_is_idempotent() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let t = ist.with_ymd_and_hms(2023, 12, 31, 1, 5, 0).unwrap();
        let once = normalize(&t);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn add_years_plain() {
        assert_eq!(add_years(ymd(2023, 3, 15), 1), Some(ymd(2024, 3, 15)));
        assert_eq!(add_years(ymd(2023, 3, 15), -2), Some(ymd(2021, 3, 15)));
        assert_eq!(add_years(ymd(2023, 3, 15), 0), Some(ymd(2023, 3, 15)));
    }

    #[test]
    fn add_years_clamps_leap_day_to_feb_28() {
        assert_eq!(add_years(ymd(2020, 2, 29), 1), Some(ymd(2021, 2, 28)));
        assert_eq!(add_years(ymd(2020, 2, 29), 4), Some(ymd(2024, 2, 29)));
        assert_eq!(add_years(ymd(2024, 2, 29), -1), Some(ymd(2023, 2, 28)));
    }

    #[test]
    fn days_inclusive_counts_both_ends() {
        assert_eq!(days_inclusive(ymd(2024, 1, 10), ymd(2024, 1, 10)), 1);
        assert_eq!(days_inclusive(ymd(2024, 1, 10), ymd(2024, 1, 20)), 11);
        assert_eq!(days_inclusive(ymd(2024, 2, 28), ymd(2024, 3, 1)), 3);
    }

    #[test]
    fn parse_reference_date_forms() {
        assert_eq!(parse_reference_date("2024-06-01").unwrap(), ymd(2024, 6, 1));
        assert_eq!(
            parse_reference_date(" 2024-06-01T22:10:00-04:00 ").unwrap(),
            ymd(2024, 6, 1)
        );
        assert!(parse_reference_date("06/01/2024").is_err());
        assert!(parse_reference_date("").is_err());
    }
}
