use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod domain;
mod repositories;
mod router;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::from_filename("./timeclock-api/.env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = config::read_config().expect("Failed to read configuration");

    let db_pool = PgPoolOptions::new()
        .connect_with(config.database.with_db())
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let app = router::create(db_pool, &config);

    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind listener");

    tracing::info!("API listening on http://{}", address);
    axum::serve(listener, app).await.expect("Server error");
}
