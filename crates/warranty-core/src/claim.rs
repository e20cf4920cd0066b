//! Repair-order claims as read from the claims feed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::days_inclusive;

/// Stable claim identifier. Also the tie-breaker when two claims open on the
/// same day.
pub type ClaimId = i64;

/// One repair order filed against a vehicle's warranty.
///
/// The retail date belongs to the vehicle but is carried on every row of the
/// feed. `ro_close_date >= ro_open_date` is expected, not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub vin: String,
    pub retail_date: NaiveDate,
    pub ro_open_date: NaiveDate,
    pub ro_close_date: NaiveDate,
}

impl Claim {
    /// `false` when the repair order closes before it opens.
    pub fn is_well_formed(&self) -> bool {
        self.ro_close_date >= self.ro_open_date
    }

    /// Raw repair duration in days, both ends counted. Zero for malformed rows.
    pub fn duration_days(&self) -> i64 {
        if self.is_well_formed() {
            days_inclusive(self.ro_open_date, self.ro_close_date)
        } else {
            0
        }
    }

    /// Case-insensitive VIN match; surrounding whitespace is ignored.
    pub fn matches_vin(&self, vin: &str) -> bool {
        self.vin.trim().to_lowercase() == vin.trim().to_lowercase()
    }
}

/// Trim a VIN taken from user input.
pub fn normalize_vin(vin: &str) -> &str {
    vin.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(open: (i32, u32, u32), close: (i32, u32, u32)) -> Claim {
        Claim {
            id: 1,
            vin: "1HGCM82633A004352".into(),
            retail_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
            ro_open_date: NaiveDate::from_ymd_opt(open.0, open.1, open.2).unwrap(),
            ro_close_date: NaiveDate::from_ymd_opt(close.0, close.1, close.2).unwrap(),
        }
    }

    #[test]
    fn duration_is_inclusive() {
        assert_eq!(claim((2024, 1, 10), (2024, 1, 20)).duration_days(), 11);
        assert_eq!(claim((2024, 1, 10), (2024, 1, 10)).duration_days(), 1);
    }

    #[test]
    fn malformed_claim_has_no_duration() {
        let c = claim((2024, 1, 20), (2024, 1, 10));
        assert!(!c.is_well_formed());
        assert_eq!(c.duration_days(), 0);
    }

    #[test]
    fn vin_match_ignores_case_and_padding() {
        let c = claim((2024, 1, 10), (2024, 1, 20));
        assert!(c.matches_vin("  1hgcm82633a004352 "));
        assert!(!c.matches_vin("1HGCM82633A004353"));
    }

    #[test]
    fn claim_json_uses_iso_dates() {
        let c = claim((2024, 1, 10), (2024, 1, 20));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["ro_open_date"], "2024-01-10");
        assert_eq!(json["retail_date"], "2023-03-15");
        let back: Claim = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }
}
