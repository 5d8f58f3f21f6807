use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    domain::services::ClockService,
    repositories::{EntryRepositoryImpl, JobRepositoryImpl},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub clock_service: Arc<ClockService>,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        let job_repo = Arc::new(JobRepositoryImpl::new(db_pool.clone()));
        let entry_repo = Arc::new(EntryRepositoryImpl::new(db_pool.clone()));
        let clock_service = Arc::new(ClockService::new(job_repo, entry_repo));

        Self {
            db_pool,
            clock_service,
        }
    }
}
