use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use warranty_store::ServiceError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmptyVin => Self::BadRequest("vin query param is required".into()),
            ServiceError::NotFound(_) => Self::NotFound("claims not found for vin".into()),
            ServiceError::Store(err) => Self::Internal(format!("db error: {err}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::BadRequest(message) => warn!(%status, reason = %message, "rejected request"),
            Self::NotFound(message) => info!(%status, reason = %message, "nothing found"),
            Self::Internal(message) => error!(%status, reason = %message, "request failed"),
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warranty_store::StoreError;

    #[test]
    fn service_errors_map_to_status() {
        assert_eq!(
            ApiError::from(ServiceError::EmptyVin).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ServiceError::NotFound("X".into())).status(),
            StatusCode::NOT_FOUND
        );
        let internal = ApiError::from(ServiceError::Store(StoreError::NoResults));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "db error: no results for query");
    }
}
