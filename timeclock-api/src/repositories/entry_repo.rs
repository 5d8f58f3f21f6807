use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::repo_error::RepositoryError;
use crate::domain::{EntryId, EntryKind, JobId, TimeEntry};

#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TimeEntry>, RepositoryError>;
    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<TimeEntry>, RepositoryError>;
    async fn active_entries(&self, job_id: JobId) -> Result<Vec<TimeEntry>, RepositoryError>;
    async fn insert(
        &self,
        job_id: JobId,
        kind: &EntryKind,
        comment: &str,
    ) -> Result<TimeEntry, RepositoryError>;
    async fn close_latest_active(
        &self,
        job_id: JobId,
        clock_out: OffsetDateTime,
    ) -> Result<Option<TimeEntry>, RepositoryError>;
    async fn update_comment(
        &self,
        id: EntryId,
        comment: &str,
    ) -> Result<Option<TimeEntry>, RepositoryError>;
    async fn delete_entry(&self, id: EntryId) -> Result<(), RepositoryError>;
}

pub struct EntryRepositoryImpl {
    pool: PgPool,
}

impl EntryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ENTRY_COLUMNS: &str = "id, job_id, clock_in, clock_out, manual_minutes, comment, created_at";

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: i32,
    job_id: i32,
    clock_in: Option<OffsetDateTime>,
    clock_out: Option<OffsetDateTime>,
    manual_minutes: Option<i32>,
    comment: String,
    created_at: OffsetDateTime,
}

impl TryFrom<EntryRow> for TimeEntry {
    type Error = RepositoryError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let kind = match (row.manual_minutes, row.clock_in, row.clock_out) {
            (Some(minutes), None, None) => EntryKind::Manual { minutes },
            (None, Some(clock_in), clock_out) => EntryKind::Clocked {
                clock_in,
                clock_out,
            },
            _ => return Err(RepositoryError::CorruptEntry(row.id)),
        };

        Ok(TimeEntry {
            id: EntryId::new(row.id),
            job_id: JobId::new(row.job_id),
            kind,
            comment: row.comment,
            created_at: row.created_at,
        })
    }
}

fn kind_columns(kind: &EntryKind) -> (Option<OffsetDateTime>, Option<OffsetDateTime>, Option<i32>) {
    match *kind {
        EntryKind::Manual { minutes } => (None, None, Some(minutes)),
        EntryKind::Clocked {
            clock_in,
            clock_out,
        } => (Some(clock_in), clock_out, None),
    }
}

#[async_trait]
impl EntryRepository for EntryRepositoryImpl {
    async fn list_all(&self) -> Result<Vec<TimeEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TimeEntry::try_from).collect()
    }

    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<TimeEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries WHERE job_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(job_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TimeEntry::try_from).collect()
    }

    async fn active_entries(&self, job_id: JobId) -> Result<Vec<TimeEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM time_entries
            WHERE job_id = $1
              AND clock_in IS NOT NULL
              AND clock_out IS NULL
              AND manual_minutes IS NULL
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(job_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TimeEntry::try_from).collect()
    }

    async fn insert(
        &self,
        job_id: JobId,
        kind: &EntryKind,
        comment: &str,
    ) -> Result<TimeEntry, RepositoryError> {
        let (clock_in, clock_out, manual_minutes) = kind_columns(kind);

        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            INSERT INTO time_entries (job_id, clock_in, clock_out, manual_minutes, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(job_id.as_i32())
        .bind(clock_in)
        .bind(clock_out)
        .bind(manual_minutes)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
        .map_err(as_unique_violation)?;

        row.try_into()
    }

    async fn close_latest_active(
        &self,
        job_id: JobId,
        clock_out: OffsetDateTime,
    ) -> Result<Option<TimeEntry>, RepositoryError> {
        // Single statement so concurrent clock-outs cannot both close the
        // same entry; the outer clock_out IS NULL re-check settles the race.
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            UPDATE time_entries
            SET clock_out = $2
            WHERE id = (
                SELECT id
                FROM time_entries
                WHERE job_id = $1
                  AND clock_in IS NOT NULL
                  AND clock_out IS NULL
                  AND manual_minutes IS NULL
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
              AND clock_out IS NULL
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(job_id.as_i32())
        .bind(clock_out)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TimeEntry::try_from).transpose()
    }

    async fn update_comment(
        &self,
        id: EntryId,
        comment: &str,
    ) -> Result<Option<TimeEntry>, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            UPDATE time_entries
            SET comment = $2
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id.as_i32())
        .bind(comment)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TimeEntry::try_from).transpose()
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

fn as_unique_violation(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return RepositoryError::UniqueViolation(
                db_err.constraint().unwrap_or("time_entries").to_owned(),
            );
        }
    }
    err.into()
}
