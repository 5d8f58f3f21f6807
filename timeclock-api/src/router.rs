use axum::{
    extract::State,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes, routes::ApiError};

pub fn create(connection_pool: PgPool, config: &Settings) -> Router<()> {
    let app_state = AppState::new(connection_pool);

    let api = Router::new()
        .route("/health", get(health))
        .route("/health/db", get(health_db))
        .nest("/jobs", routes::jobs::router())
        .nest("/entries", routes::entries::router());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(["content-type".parse().unwrap()])
        .allow_origin(
            config
                .application
                .client_origin
                .parse::<HeaderValue>()
                .expect("Invalid client origin"),
        );

    Router::new()
        .nest("/api", api)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn health_db(State(app_state): State<AppState>) -> Result<Json<Value>, ApiError> {
    sqlx::query("SELECT 1")
        .execute(&app_state.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Database health check failed: {:?}", err);
            ApiError::internal("database unreachable")
        })?;

    Ok(Json(json!({ "status": "ok", "db": "ok" })))
}
