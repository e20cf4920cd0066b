//! Warranty-year engine: splits the time since a vehicle's retail date into
//! one-year periods and counts how many repair days fall inside each.

pub mod aggregate;
pub mod claim;
pub mod date;
pub mod period;
pub mod report;

pub use aggregate::{Aggregation, PeriodResult, RepairDaysItem, aggregate};
pub use claim::{Claim, ClaimId, normalize_vin};
pub use period::{WarrantyPeriod, build_periods, current_window, span};
pub use report::WarrantyYearsReport;
