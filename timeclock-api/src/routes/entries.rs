use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::patch,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::{
    app_state::AppState,
    domain::{EntryId, EntryView},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/:id", patch(update_entry).delete(delete_entry))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateEntryBody {
    comment: Option<String>,
}

#[instrument(name = "PATCH /entries/:id", skip(app_state, body))]
async fn update_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
    Json(body): Json<UpdateEntryBody>,
) -> Result<Json<EntryView>, ApiError> {
    let entry = app_state
        .clock_service
        .update_comment(EntryId::new(entry_id), body.comment.as_deref())
        .await?;

    Ok(Json(entry))
}

#[instrument(name = "DELETE /entries/:id", skip(app_state))]
async fn delete_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state
        .clock_service
        .delete_entry(EntryId::new(entry_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
