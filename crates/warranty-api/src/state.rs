use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use warranty_store::{ClaimRepo, ClaimSource, ServiceError};

use crate::ApiError;

/// Reference clock for requests that do not pass `now` explicitly.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

type SharedRepo = Arc<Mutex<ClaimRepo<Box<dyn ClaimSource>>>>;

#[derive(Clone)]
pub struct AppState {
    repo: SharedRepo,
    clock: Clock,
}

impl AppState {
    /// State reading the system clock.
    pub fn new(source: Box<dyn ClaimSource>) -> Self {
        Self::with_clock(source, Arc::new(Utc::now))
    }

    pub fn with_clock(source: Box<dyn ClaimSource>, clock: Clock) -> Self {
        Self {
            repo: Arc::new(Mutex::new(ClaimRepo::new(source))),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Run a repository call on the blocking pool. The store connection is
    /// not shareable across threads, so calls are serialised.
    pub async fn with_repo<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ClaimRepo<Box<dyn ClaimSource>>) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || {
            let repo = repo
                .lock()
                .map_err(|_| ApiError::Internal("claim store lock poisoned".into()))?;
            f(&repo).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("claim lookup task failed: {err}")))?
    }
}
