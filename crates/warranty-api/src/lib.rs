//! HTTP surface: claim listing and warranty-year reports by VIN.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, Clock};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/claims", get(handlers::claims_by_vin))
        .route("/claims/warranty-year", get(handlers::warranty_year_claims))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
