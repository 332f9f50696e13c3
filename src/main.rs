use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;

use team_roster_api::api;
use team_roster_api::application::TeamService;
use team_roster_api::config::{AppConfig, StoreBackend};
use team_roster_api::domain::repositories::TeamRepository;
use team_roster_api::infrastructure::logging::init_logging;
use team_roster_api::infrastructure::repositories::{
    InMemoryTeamRepository, PostgresTeamRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (.env first, then the process environment)
    let config = AppConfig::from_env().context("failed to read configuration")?;

    init_logging(&config.logging);

    let repository: Arc<dyn TeamRepository> = match config.store {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Database connected successfully");
            Arc::new(PostgresTeamRepository::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            Arc::new(InMemoryTeamRepository::new())
        }
    };

    let app = api::router(TeamService::new(repository));

    // Start server
    let addr = config.socket_addr()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind address")?;

    axum::serve(listener, app).await.context("server failed")?;

    Ok(())
}
