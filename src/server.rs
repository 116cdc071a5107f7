//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, state wiring, and the Axum server
//! lifecycle.

use crate::application::services::UrlRecordService;
use crate::config::Config;
use crate::infrastructure::persistence::PgRecordRepository;
use crate::ratelimit::FixedWindowGate;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool with bounded acquire/idle timeouts
/// - Schema migrations
/// - URL record service and rate policy gate
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let repository = Arc::new(PgRecordRepository::new(Arc::new(pool)));
    let records = Arc::new(UrlRecordService::new(repository, config.code_length));
    let rate_gate = Arc::new(FixedWindowGate::new());

    let state = AppState::new(records, rate_gate, config.behind_proxy);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
