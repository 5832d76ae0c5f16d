//! Kioskpulse kiosk status service.
//!
//! Main entry point. Initializes logging, loads configuration, establishes
//! the database pool, runs schema migration, and serves the status-update
//! endpoint until shutdown.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use kioskpulse_api::{start_server, AppState, Config};
use kioskpulse_core::{storage::Repository, SystemClock};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting kioskpulse kiosk status service");

    let config = Config::load()?;
    info!(
        database_url = %config.database_url_masked(),
        host = %config.host,
        port = config.port,
        max_connections = config.database_max_connections,
        "Configuration loaded"
    );

    let db_pool = create_database_pool(&config).await?;
    info!("Database connection pool established");

    run_migrations(&db_pool).await?;
    info!("Database migrations completed");

    let addr = config.parse_server_addr()?;
    let state = AppState::new(
        Arc::new(Repository::new(Arc::new(db_pool.clone()))),
        Arc::new(SystemClock::new()),
    );

    info!(addr = %addr, "Kioskpulse is ready to receive status webhooks");

    start_server(state, addr).await.context("Server failed")?;

    db_pool.close().await;
    info!("Database connections closed");

    info!("Kioskpulse shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,kioskpulse=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Creates the database connection pool with retry logic.
async fn create_database_pool(config: &Config) -> Result<sqlx::PgPool> {
    let mut retries = 0;
    const MAX_RETRIES: u32 = 5;
    const RETRY_DELAY: Duration = Duration::from_secs(2);

    loop {
        match PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connection_timeout))
            .idle_timeout(Duration::from_secs(config.database_idle_timeout))
            .max_lifetime(Duration::from_secs(config.database_max_lifetime))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                sqlx::query("SELECT 1")
                    .fetch_one(&pool)
                    .await
                    .context("Failed to verify database connection")?;

                return Ok(pool);
            },
            Err(_e) if retries < MAX_RETRIES => {
                retries += 1;
                info!(
                    attempt = retries,
                    max_retries = MAX_RETRIES,
                    "Database connection failed, retrying..."
                );
                tokio::time::sleep(RETRY_DELAY).await;
            },
            Err(e) => {
                return Err(e).context("Failed to create database connection pool after retries");
            },
        }
    }
}

/// Runs database migrations.
///
/// The uniqueness constraint on `location` is what makes every write an
/// upsert: one live row per kiosk site.
async fn run_migrations(pool: &sqlx::PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kiosk_status (
            id TEXT NOT NULL,
            location TEXT NOT NULL,
            status TEXT NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL,
            UNIQUE(location)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create kiosk_status table")?;

    Ok(())
}
