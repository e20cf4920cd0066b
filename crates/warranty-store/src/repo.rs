//! Claim repository: joins storage lookups with the warranty-year engine.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use warranty_core::{
    Aggregation, Claim, WarrantyYearsReport, aggregate, build_periods, normalize_vin, span,
};

use crate::{ClaimSource, ServiceError};

/// Claim lookups by VIN over any [`ClaimSource`].
pub struct ClaimRepo<S> {
    source: S,
}

impl<S: ClaimSource> ClaimRepo<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every claim on file for the vehicle, newest id first.
    pub fn list_by_vin(&self, vin: &str) -> Result<Vec<Claim>, ServiceError> {
        let vin = normalize_vin(vin);
        if vin.is_empty() {
            return Err(ServiceError::EmptyVin);
        }
        let claims = self.source.claims_by_vin(vin)?;
        debug!(vin, count = claims.len(), "listed claims");
        Ok(claims)
    }

    /// Repair days per warranty year for the vehicle as of `now`.
    ///
    /// The vehicle's retail date is the earliest one on its claims; a VIN with
    /// no claims is [`ServiceError::NotFound`]. A retail date after `now`
    /// yields a report with no periods.
    pub fn warranty_years(
        &self,
        vin: &str,
        now: NaiveDate,
    ) -> Result<WarrantyYearsReport, ServiceError> {
        let vin = normalize_vin(vin);
        if vin.is_empty() {
            return Err(ServiceError::EmptyVin);
        }

        let retail_date = self
            .source
            .retail_date(vin)?
            .ok_or_else(|| ServiceError::NotFound(vin.to_string()))?;

        let periods = build_periods(retail_date, now);
        let Some(range) = span(&periods) else {
            debug!(vin, %retail_date, %now, "retail date is after reference date");
            return Ok(WarrantyYearsReport {
                vin: vin.to_string(),
                retail_date,
                periods: Vec::new(),
            });
        };

        let claims = self
            .source
            .claims_overlapping(vin, range.start, range.end)?;
        let Aggregation { periods, skipped } = aggregate(&periods, &claims);

        for claim_id in skipped {
            warn!(vin, claim_id, "claim closes before it opens; excluded from repair days");
        }
        info!(
            vin,
            %retail_date,
            periods = periods.len(),
            claims = claims.len(),
            "computed warranty-year repair days"
        );

        Ok(WarrantyYearsReport {
            vin: vin.to_string(),
            retail_date,
            periods,
        })
    }
}
