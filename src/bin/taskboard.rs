//! Task board HTTP server.
//!
//! Usage:
//!
//! ```text
//! # In-memory store on the default address 0.0.0.0:5000
//! taskboard
//!
//! # PostgreSQL-backed store on a custom address
//! taskboard --bind 127.0.0.1:8080 --database-url postgres://board@localhost/board
//! ```
//!
//! Without a database URL the board is kept in memory and lost on exit. With
//! one, the `tasks` and `activity_log` tables are created if missing.

use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use taskboard::activity::adapters::{
    memory::InMemoryActivityRepository, postgres::PostgresActivityRepository,
};
use taskboard::api::{self, ServeError};
use taskboard::config::{CliArgs, ConfigError, ServerConfig};
use taskboard::task::adapters::{
    memory::InMemoryTaskRepository,
    postgres::{PostgresTaskRepository, TaskPgPool, apply_schema},
};
use taskboard::task::ports::TaskRepositoryError;
use taskboard::task::services::TaskBoardService;
use thiserror::Error;

/// Errors that abort server startup or operation.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to prepare database schema: {0}")]
    Schema(#[from] TaskRepositoryError),
    #[error("database pool setup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Serve(#[from] ServeError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "task board server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &CliArgs) -> Result<(), StartupError> {
    let config = ServerConfig::load(cli)?;
    let clock = Arc::new(DefaultClock);

    let board = if let Some(url) = config.database_url.clone() {
        let pool = build_pool(url, config.pool_size).await?;
        apply_schema(&pool).await?;
        tracing::info!(pool_size = config.pool_size, "using PostgreSQL store");
        let service = TaskBoardService::new(
            Arc::new(PostgresTaskRepository::new(pool.clone())),
            Arc::new(PostgresActivityRepository::new(pool)),
            clock,
        );
        api::router(Arc::new(service))
    } else {
        tracing::warn!("no database configured; tasks are kept in memory and lost on exit");
        let activity = InMemoryActivityRepository::new();
        let tasks = InMemoryTaskRepository::with_activity_log(activity.clone());
        let service = TaskBoardService::new(Arc::new(tasks), Arc::new(activity), clock);
        api::router(Arc::new(service))
    };

    let app = api::with_middleware(board, &config.frontend_url)?;
    let (listener, local_addr) = api::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %local_addr,
        frontend_url = %config.frontend_url,
        "task board server listening"
    );

    api::serve(listener, app, shutdown_signal()).await?;
    tracing::info!("task board server stopped");
    Ok(())
}

/// Builds the connection pool off the async runtime; r2d2 connects eagerly.
async fn build_pool(url: String, pool_size: u32) -> Result<TaskPgPool, StartupError> {
    let pool = tokio::task::spawn_blocking(move || {
        let manager = ConnectionManager::<PgConnection>::new(url);
        Pool::builder().max_size(pool_size).build(manager)
    })
    .await??;
    Ok(pool)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
