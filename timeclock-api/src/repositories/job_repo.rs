use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_error::RepositoryError;
use crate::domain::{Job, JobId, NewJob};

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
    async fn get_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;
    async fn create_job(&self, job: &NewJob) -> Result<Job, RepositoryError>;
    async fn delete_job(&self, id: JobId) -> Result<(), RepositoryError>;
}

pub struct JobRepositoryImpl {
    pool: PgPool,
}

impl JobRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i32,
    name: String,
    color: String,
    created_at: time::OffsetDateTime,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: JobId::new(row.id),
            name: row.name,
            color: row.color,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl JobRepository for JobRepositoryImpl {
    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, name, color, created_at
            FROM jobs
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn get_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, name, color, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Job::from))
    }

    async fn create_job(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color, created_at
            "#,
        )
        .bind(&job.name)
        .bind(&job.color)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_job(&self, id: JobId) -> Result<(), RepositoryError> {
        // entries go with the job via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
