use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("claims file not found: {0}")]
    FileNotFound(std::path::PathBuf),

    #[error("unsupported claims file (expected .csv or .parquet): {0}")]
    UnsupportedFormat(std::path::PathBuf),

    #[error("no results for query")]
    NoResults,

    #[cfg(feature = "duckdb")]
    #[error("duckdb error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    #[cfg(feature = "duckdb")]
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("{0}")]
    Other(String),
}

/// Failures surfaced by [`ClaimRepo`](crate::ClaimRepo) to request handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("vin is required")]
    EmptyVin,

    #[error("claims not found for vin {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
