//! Claim storage and the warranty-year repository built on top of it.

mod error;
pub use error::{ServiceError, StoreError};

mod source;
pub use source::{ClaimSource, MemoryStore};

mod repo;
pub use repo::ClaimRepo;

#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::DuckStore;
