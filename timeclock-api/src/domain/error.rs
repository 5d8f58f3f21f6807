use thiserror::Error;

use super::JobId;
use crate::repositories::RepositoryError;

/// Errors from the time-entry lifecycle operations.
#[derive(Debug, Error)]
pub enum TimeClockError {
    #[error("Job not found")]
    JobNotFound,
    #[error("Entry not found")]
    EntryNotFound,
    #[error("No active clock-in found for this job.")]
    NoActiveEntry,
    #[error("This job is already clocked in.")]
    AlreadyClockedIn,
    #[error("{0}")]
    InvalidInput(String),
    #[error("job {job_id} has {count} active entries, expected at most one")]
    IntegrityViolation { job_id: JobId, count: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TimeClockError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
