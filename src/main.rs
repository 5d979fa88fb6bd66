//! CollabHub Server: collaborator sharing and invitation API
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{EnvFilter, fmt};

use collabhub_api::{AppState, build_router};
use collabhub_core::config::AppConfig;
use collabhub_core::error::AppError;
use collabhub_database::{CollaboratorStore, DatabasePool, MemoryStore, PgStore};

/// `database.url` prefix that selects the in-memory store for local runs.
const MEMORY_URL_SCHEME: &str = "memory://";

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `COLLABHUB_ENV` overlay and
/// `COLLABHUB__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("COLLABHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting CollabHub");

    let (store, db): (Arc<dyn CollaboratorStore>, Option<DatabasePool>) =
        if config.database.url.starts_with(MEMORY_URL_SCHEME) {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            (Arc::new(MemoryStore::new()), None)
        } else {
            tracing::info!("Connecting to database...");
            let db = DatabasePool::connect(&config.database).await?;
            (Arc::new(PgStore::new(db.clone())), Some(db))
        };

    let mailer = collabhub_mail::build_mailer(&config.mail)?;
    tracing::info!(provider = ?config.mail.provider, "Mailer initialized");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_router(AppState::new(config, store, mailer));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "CollabHub server listening");

    let stopping = Arc::new(Notify::new());
    let notify = stopping.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, draining connections...");
            notify.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            stopping.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Grace period elapsed, dropping open connections"
            );
        }
    }

    if let Some(db) = db {
        db.close().await;
    }
    tracing::info!("CollabHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
