//! Per-vehicle warranty-year report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::PeriodResult;

/// Repair days per warranty year for one vehicle, newest year first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyYearsReport {
    pub vin: String,
    pub retail_date: NaiveDate,
    pub periods: Vec<PeriodResult>,
}

impl WarrantyYearsReport {
    /// Repair days summed over every period.
    pub fn total_days(&self) -> i64 {
        self.periods.iter().map(|p| p.total_days).sum()
    }

    /// The period containing the reference date the report was built for.
    pub fn current(&self) -> Option<&PeriodResult> {
        self.periods.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Claim, aggregate, build_periods};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn totals_across_periods() {
        let retail = ymd(2023, 3, 15);
        let claims = vec![Claim {
            id: 1,
            vin: "VIN1".into(),
            retail_date: retail,
            ro_open_date: ymd(2024, 3, 10),
            ro_close_date: ymd(2024, 3, 20),
        }];
        let periods = build_periods(retail, ymd(2024, 6, 1));
        let report = WarrantyYearsReport {
            vin: "VIN1".into(),
            retail_date: retail,
            periods: aggregate(&periods, &claims).periods,
        };
        assert_eq!(report.total_days(), 11);
        assert_eq!(report.current().unwrap().total_days, 6);
    }

    #[test]
    fn empty_report_serialises_empty_periods() {
        let report = WarrantyYearsReport {
            vin: "VIN1".into(),
            retail_date: ymd(2024, 1, 1),
            periods: Vec::new(),
        };
        assert!(report.current().is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["periods"], serde_json::json!([]));
        assert_eq!(json["retail_date"], "2024-01-01");
    }
}
