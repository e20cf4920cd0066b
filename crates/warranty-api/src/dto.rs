//! JSON response bodies. Calendar dates go out as RFC 3339 instants at
//! midnight UTC.

use chrono::{DateTime, Utc};
use serde::Serialize;
use warranty_core::date::at_utc_midnight;
use warranty_core::{Claim, PeriodResult, RepairDaysItem, WarrantyYearsReport};

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub vin: String,
    pub retail_date: DateTime<Utc>,
    pub ro_open_date: DateTime<Utc>,
    pub ro_close_date: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id,
            vin: claim.vin,
            retail_date: at_utc_midnight(claim.retail_date),
            ro_open_date: at_utc_midnight(claim.ro_open_date),
            ro_close_date: at_utc_midnight(claim.ro_close_date),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarrantyYearResponse {
    pub vin: String,
    pub retail_date: DateTime<Utc>,
    pub periods: Vec<WarrantyYearPeriodResponse>,
}

#[derive(Debug, Serialize)]
pub struct WarrantyYearPeriodResponse {
    pub warranty_period: WarrantyPeriodResponse,
    pub total_days: i64,
    pub items: Vec<WarrantyPeriodItem>,
}

#[derive(Debug, Serialize)]
pub struct WarrantyPeriodResponse {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct WarrantyPeriodItem {
    pub claim: WarrantyPeriodClaim,
    pub repair_days: i64,
}

/// The claim fields relevant to a period; the VIN and retail date are
/// already on the enclosing report.
#[derive(Debug, Serialize)]
pub struct WarrantyPeriodClaim {
    pub id: i64,
    pub ro_open_date: DateTime<Utc>,
    pub ro_close_date: DateTime<Utc>,
}

impl From<RepairDaysItem> for WarrantyPeriodItem {
    fn from(item: RepairDaysItem) -> Self {
        Self {
            claim: WarrantyPeriodClaim {
                id: item.claim.id,
                ro_open_date: at_utc_midnight(item.claim.ro_open_date),
                ro_close_date: at_utc_midnight(item.claim.ro_close_date),
            },
            repair_days: item.repair_days,
        }
    }
}

impl From<PeriodResult> for WarrantyYearPeriodResponse {
    fn from(result: PeriodResult) -> Self {
        Self {
            warranty_period: WarrantyPeriodResponse {
                start: at_utc_midnight(result.period.start),
                end: at_utc_midnight(result.period.end),
            },
            total_days: result.total_days,
            items: result.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<WarrantyYearsReport> for WarrantyYearResponse {
    fn from(report: WarrantyYearsReport) -> Self {
        Self {
            vin: report.vin,
            retail_date: at_utc_midnight(report.retail_date),
            periods: report.periods.into_iter().map(Into::into).collect(),
        }
    }
}
