use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use warranty_core::date::{calendar_date, parse_reference_date};

use crate::{
    ApiError, ApiResult, AppState,
    dto::{ClaimResponse, WarrantyYearResponse},
};

#[derive(Debug, Deserialize)]
pub struct VinQuery {
    pub vin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WarrantyYearQuery {
    pub vin: Option<String>,
    /// Reference date; defaults to today in UTC.
    pub now: Option<String>,
}

pub async fn health() -> &'static str {
    "ok"
}

fn required_vin(vin: Option<String>, example: &str) -> ApiResult<String> {
    let vin = vin.unwrap_or_default().trim().to_string();
    if vin.is_empty() {
        return Err(ApiError::bad_request(format!(
            "vin query param is required, example: {example}?vin=XXX"
        )));
    }
    Ok(vin)
}

pub async fn claims_by_vin(
    State(state): State<AppState>,
    Query(query): Query<VinQuery>,
) -> ApiResult<Json<Vec<ClaimResponse>>> {
    let vin = required_vin(query.vin, "/claims")?;
    let claims = state.with_repo(move |repo| repo.list_by_vin(&vin)).await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

pub async fn warranty_year_claims(
    State(state): State<AppState>,
    Query(query): Query<WarrantyYearQuery>,
) -> ApiResult<Json<WarrantyYearResponse>> {
    let vin = required_vin(query.vin, "/claims/warranty-year")?;
    let now = match query.now.as_deref() {
        Some(raw) => parse_reference_date(raw).map_err(|err| {
            ApiError::bad_request(format!(
                "now must be YYYY-MM-DD or an RFC 3339 timestamp: {err}"
            ))
        })?,
        None => calendar_date(&state.now()),
    };

    let report = state
        .with_repo(move |repo| repo.warranty_years(&vin, now))
        .await?;
    Ok(Json(report.into()))
}
