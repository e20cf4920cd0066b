//! Plain-text rendering of claims and warranty-year reports.

use warranty_core::{Claim, WarrantyYearsReport};

/// One line per claim: id, repair range, raw duration.
pub fn render_claims(vin: &str, claims: &[Claim]) -> String {
    let mut out = format!("=== {vin} ===\n");
    if claims.is_empty() {
        out.push_str("no claims on file\n");
        return out;
    }
    for claim in claims {
        let note = if claim.is_well_formed() {
            ""
        } else {
            "  (closes before it opens)"
        };
        out.push_str(&format!(
            "  #{:<8} {} .. {}  retail {}  {:>4} days{}\n",
            claim.id,
            claim.ro_open_date,
            claim.ro_close_date,
            claim.retail_date,
            claim.duration_days(),
            note
        ));
    }
    out
}

/// Warranty years newest first, each with its clipped repair days.
pub fn render_report(report: &WarrantyYearsReport) -> String {
    let mut out = format!("=== {} ===\n", report.vin);
    out.push_str(&format!("  {:<26} {}\n\n", "retail_date", report.retail_date));

    if report.periods.is_empty() {
        out.push_str("no warranty period has started yet\n");
        return out;
    }

    for result in &report.periods {
        out.push_str(&format!(
            "Warranty year {} .. {}  {} days\n",
            result.period.start, result.period.end, result.total_days
        ));
        for item in &result.items {
            out.push_str(&format!(
                "  #{:<8} {} .. {}  {:>4} days\n",
                item.claim.id, item.claim.ro_open_date, item.claim.ro_close_date, item.repair_days
            ));
        }
    }
    out.push_str(&format!("\nTotal repair days: {}\n", report.total_days()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warranty_core::{aggregate, build_periods};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn claim(id: i64, open: NaiveDate, close: NaiveDate) -> Claim {
        Claim {
            id,
            vin: "VIN1".into(),
            retail_date: ymd(2023, 3, 15),
            ro_open_date: open,
            ro_close_date: close,
        }
    }

    #[test]
    fn report_lists_periods_and_total() {
        let claims = vec![claim(7, ymd(2024, 3, 10), ymd(2024, 3, 20))];
        let periods = build_periods(ymd(2023, 3, 15), ymd(2024, 6, 1));
        let report = WarrantyYearsReport {
            vin: "VIN1".into(),
            retail_date: ymd(2023, 3, 15),
            periods: aggregate(&periods, &claims).periods,
        };
        let text = render_report(&report);
        assert!(text.starts_with("=== VIN1 ===\n"));
        assert!(text.contains("Warranty year 2024-03-15 .. 2025-03-14  6 days"));
        assert!(text.contains("Warranty year 2023-03-15 .. 2024-03-14  5 days"));
        assert!(text.contains("#7"));
        assert!(text.ends_with("Total repair days: 11\n"));
    }

    #[test]
    fn report_without_periods() {
        let report = WarrantyYearsReport {
            vin: "VIN1".into(),
            retail_date: ymd(2030, 1, 1),
            periods: Vec::new(),
        };
        assert!(render_report(&report).contains("no warranty period has started yet"));
    }

    #[test]
    fn claims_flag_malformed_rows() {
        let text = render_claims(
            "VIN1",
            &[
                claim(2, ymd(2024, 1, 5), ymd(2024, 1, 1)),
                claim(1, ymd(2024, 1, 1), ymd(2024, 1, 3)),
            ],
        );
        assert!(text.contains("(closes before it opens)"));
        assert!(text.contains("   3 days"));
        assert!(render_claims("VIN2", &[]).contains("no claims on file"));
    }
}
