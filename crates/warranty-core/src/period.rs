//! Warranty-year period generation.
//!
//! A vehicle's warranty is split into consecutive one-year periods anchored on
//! the retail date anniversary. Period `k` (0 = first year) runs from
//! `retail + k years` up to the day before `retail + (k + 1) years`.
//!
//! Anniversaries are always derived from the retail date itself rather than
//! from the previous period, so a Feb-29 retail date clamps to Feb-28 in
//! non-leap years without opening a gap between periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{add_years, days_inclusive};

/// One warranty year. Both bounds are inclusive calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarrantyPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WarrantyPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Length in days (365 or 366).
    pub fn len_days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }

    /// Clip `open..=close` to this period. `None` when they do not overlap,
    /// which includes every range whose close is before its open.
    pub fn clip(&self, open: NaiveDate, close: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let open = open.max(self.start);
        let close = close.min(self.end);
        (close >= open).then_some((open, close))
    }

    /// Inclusive day count of `open..=close` falling inside this period.
    pub fn overlap_days(&self, open: NaiveDate, close: NaiveDate) -> Option<i64> {
        self.clip(open, close)
            .map(|(open, close)| days_inclusive(open, close))
    }
}

fn nth_period(retail_date: NaiveDate, k: i32) -> Option<WarrantyPeriod> {
    let start = add_years(retail_date, k)?;
    let end = add_years(retail_date, k.checked_add(1)?)?.pred_opt()?;
    Some(WarrantyPeriod { start, end })
}

/// Index of the warranty year containing `now`, or `None` if `now` is before
/// the retail date.
fn current_year_index(retail_date: NaiveDate, now: NaiveDate) -> Option<i32> {
    let mut years = now.year() - retail_date.year();
    // `now` can fall before this calendar year's anniversary.
    if add_years(retail_date, years)? > now {
        years -= 1;
    }
    (years >= 0).then_some(years)
}

/// The warranty year that contains `now`.
///
/// Always satisfies `start <= now <= end` when `retail_date <= now`; returns
/// `None` when the retail date is after `now`.
pub fn current_window(retail_date: NaiveDate, now: NaiveDate) -> Option<WarrantyPeriod> {
    nth_period(retail_date, current_year_index(retail_date, now)?)
}

/// Every warranty year from the one containing `now` back to the first one,
/// newest first.
///
/// Empty when `retail_date` is after `now`; callers present that as "no
/// applicable warranty period", not as an error.
pub fn build_periods(retail_date: NaiveDate, now: NaiveDate) -> Vec<WarrantyPeriod> {
    let Some(current) = current_year_index(retail_date, now) else {
        return Vec::new();
    };

    (0..=current)
        .rev()
        .map_while(|k| nth_period(retail_date, k))
        .take_while(|period| period.start >= retail_date)
        .collect()
}

/// The range covered by a newest-first period list: oldest start to newest
/// end. Claims outside it cannot contribute to any period.
pub fn span(periods: &[WarrantyPeriod]) -> Option<WarrantyPeriod> {
    Some(WarrantyPeriod {
        start: periods.last()?.start,
        end: periods.first()?.end,
    })
}
