//! Repair-day aggregation: intersects claims with warranty periods.

use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimId};
use crate::period::WarrantyPeriod;

/// A claim together with the days of it that fall inside one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairDaysItem {
    pub claim: Claim,
    pub repair_days: i64,
}

/// One warranty period with the claims that overlapped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    pub period: WarrantyPeriod,
    pub total_days: i64,
    pub items: Vec<RepairDaysItem>,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Same order as the input periods.
    pub periods: Vec<PeriodResult>,
    /// Claims excluded because they close before they open.
    pub skipped: Vec<ClaimId>,
}

/// Count the repair days each claim contributes to each period.
///
/// Claims are ordered by `(ro_open_date, id)` before assignment, so items
/// inside a period come out in that order whatever order the caller used. A
/// claim spanning a period boundary is clipped independently against each
/// period it touches. Malformed claims never overlap a period; their ids are
/// reported in [`Aggregation::skipped`].
pub fn aggregate(periods: &[WarrantyPeriod], claims: &[Claim]) -> Aggregation {
    let mut ordered: Vec<&Claim> = claims.iter().collect();
    ordered.sort_by_key(|claim| (claim.ro_open_date, claim.id));

    let skipped = ordered
        .iter()
        .filter(|claim| !claim.is_well_formed())
        .map(|claim| claim.id)
        .collect();

    let periods = periods
        .iter()
        .map(|period| {
            let mut items = Vec::new();
            let mut total_days = 0;
            for claim in &ordered {
                let Some(repair_days) = period.overlap_days(claim.ro_open_date, claim.ro_close_date)
                else {
                    continue;
                };
                total_days += repair_days;
                items.push(RepairDaysItem {
                    claim: (*claim).clone(),
                    repair_days,
                });
            }
            PeriodResult {
                period: *period,
                total_days,
                items,
            }
        })
        .collect();

    Aggregation { periods, skipped }
}
