use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use time::OffsetDateTime;

use crate::{
    domain::{
        job_view, validate_comment, validate_new_entry, validate_new_job, EntryId, EntryKind,
        EntryView, Job, JobId, JobView, TimeClockError, TimeEntry,
    },
    repositories::{EntryRepository, JobRepository, RepositoryError},
};

/// Orchestrates the time-entry lifecycle over the repository ports.
///
/// The single-session invariant is enforced in two places: a fast check
/// here, for a friendly conflict response, and the store's partial unique
/// index, which settles races between concurrent clock-ins.
pub struct ClockService {
    jobs: Arc<dyn JobRepository>,
    entries: Arc<dyn EntryRepository>,
}

impl ClockService {
    pub fn new(jobs: Arc<dyn JobRepository>, entries: Arc<dyn EntryRepository>) -> Self {
        Self { jobs, entries }
    }

    pub async fn create_job(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Job, TimeClockError> {
        let new_job = validate_new_job(name, color)?;
        Ok(self.jobs.create_job(&new_job).await?)
    }

    pub async fn delete_job(&self, job_id: JobId) -> Result<(), TimeClockError> {
        self.jobs.delete_job(job_id).await.map_err(|err| match err {
            RepositoryError::NotFound(_) => TimeClockError::JobNotFound,
            other => other.into(),
        })
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobView>, TimeClockError> {
        let jobs = self.jobs.list_jobs().await?;
        let entries = self.entries.list_all().await?;

        let mut by_job: HashMap<JobId, Vec<TimeEntry>> = entries
            .into_iter()
            .map(|entry| (entry.job_id, entry))
            .into_group_map();

        Ok(jobs
            .iter()
            .map(|job| {
                let job_entries = by_job.remove(&job.id).unwrap_or_default();
                job_view(job, &job_entries)
            })
            .collect())
    }

    pub async fn list_entries(&self, job_id: JobId) -> Result<Vec<EntryView>, TimeClockError> {
        self.require_job(job_id).await?;
        let entries = self.entries.list_for_job(job_id).await?;
        Ok(entries.iter().map(EntryView::from).collect())
    }

    pub async fn clock_in(&self, job_id: JobId) -> Result<EntryView, TimeClockError> {
        self.require_job(job_id).await?;

        let active = self.entries.active_entries(job_id).await?;
        match active.len() {
            0 => {}
            1 => return Err(TimeClockError::AlreadyClockedIn),
            count => {
                tracing::error!(
                    %job_id,
                    count,
                    "single-session invariant violated outside normal operation"
                );
                return Err(TimeClockError::IntegrityViolation { job_id, count });
            }
        }

        let kind = EntryKind::Clocked {
            clock_in: OffsetDateTime::now_utc(),
            clock_out: None,
        };
        let entry = self
            .entries
            .insert(job_id, &kind, "")
            .await
            .map_err(|err| match err {
                // lost the race against a concurrent clock-in
                RepositoryError::UniqueViolation(_) => TimeClockError::AlreadyClockedIn,
                other => other.into(),
            })?;

        Ok(EntryView::from(&entry))
    }

    pub async fn clock_out(&self, job_id: JobId) -> Result<EntryView, TimeClockError> {
        let entry = self
            .entries
            .close_latest_active(job_id, OffsetDateTime::now_utc())
            .await?
            .ok_or(TimeClockError::NoActiveEntry)?;

        Ok(EntryView::from(&entry))
    }

    pub async fn create_entry(
        &self,
        job_id: JobId,
        manual_hours: Option<f64>,
        clock_in: Option<OffsetDateTime>,
        clock_out: Option<OffsetDateTime>,
        comment: Option<&str>,
    ) -> Result<EntryView, TimeClockError> {
        self.require_job(job_id).await?;

        let kind = validate_new_entry(manual_hours, clock_in, clock_out)?;
        let comment = validate_comment(comment)?;

        let entry = self.entries.insert(job_id, &kind, &comment).await?;
        Ok(EntryView::from(&entry))
    }

    pub async fn update_comment(
        &self,
        entry_id: EntryId,
        comment: Option<&str>,
    ) -> Result<EntryView, TimeClockError> {
        let comment = validate_comment(comment)?;
        let entry = self
            .entries
            .update_comment(entry_id, &comment)
            .await?
            .ok_or(TimeClockError::EntryNotFound)?;

        Ok(EntryView::from(&entry))
    }

    pub async fn delete_entry(&self, entry_id: EntryId) -> Result<(), TimeClockError> {
        self.entries
            .delete_entry(entry_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => TimeClockError::EntryNotFound,
                other => other.into(),
            })
    }

    async fn require_job(&self, job_id: JobId) -> Result<Job, TimeClockError> {
        self.jobs
            .get_job(job_id)
            .await?
            .ok_or(TimeClockError::JobNotFound)
    }
}
