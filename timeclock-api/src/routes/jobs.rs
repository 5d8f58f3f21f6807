use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use super::ApiError;
use crate::{
    app_state::AppState,
    domain::{EntryView, Job, JobId, JobView},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/:id", delete(delete_job))
        .route("/:id/entries", get(list_entries).post(create_entry))
        .route("/:id/clock-in", post(clock_in))
        .route("/:id/clock-out", post(clock_out))
}

#[instrument(name = "GET /jobs", skip(app_state))]
async fn list_jobs(State(app_state): State<AppState>) -> Result<Json<Vec<JobView>>, ApiError> {
    let jobs = app_state.clock_service.list_jobs().await?;
    Ok(Json(jobs))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateJobBody {
    name: String,
    color: Option<String>,
}

#[instrument(name = "POST /jobs", skip(app_state))]
async fn create_job(
    State(app_state): State<AppState>,
    Json(body): Json<CreateJobBody>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let job = app_state
        .clock_service
        .create_job(&body.name, body.color.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

#[instrument(name = "DELETE /jobs/:id", skip(app_state))]
async fn delete_job(
    State(app_state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state
        .clock_service
        .delete_job(JobId::new(job_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /jobs/:id/entries", skip(app_state))]
async fn list_entries(
    State(app_state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<Vec<EntryView>>, ApiError> {
    let entries = app_state
        .clock_service
        .list_entries(JobId::new(job_id))
        .await?;

    Ok(Json(entries))
}

#[instrument(name = "POST /jobs/:id/clock-in", skip(app_state))]
async fn clock_in(
    State(app_state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<(StatusCode, Json<EntryView>), ApiError> {
    let entry = app_state.clock_service.clock_in(JobId::new(job_id)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(name = "POST /jobs/:id/clock-out", skip(app_state))]
async fn clock_out(
    State(app_state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<EntryView>, ApiError> {
    let entry = app_state
        .clock_service
        .clock_out(JobId::new(job_id))
        .await?;

    Ok(Json(entry))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEntryBody {
    comment: Option<String>,
    manual_hours: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    clock_in: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    clock_out: Option<OffsetDateTime>,
}

#[instrument(name = "POST /jobs/:id/entries", skip(app_state, body))]
async fn create_entry(
    State(app_state): State<AppState>,
    Path(job_id): Path<i32>,
    Json(body): Json<CreateEntryBody>,
) -> Result<(StatusCode, Json<EntryView>), ApiError> {
    let entry = app_state
        .clock_service
        .create_entry(
            JobId::new(job_id),
            body.manual_hours,
            body.clock_in,
            body.clock_out,
            body.comment.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}
