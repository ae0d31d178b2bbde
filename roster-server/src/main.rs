//! Roster Server
//!
//! CRUD service for soldier records backed by MongoDB.
//!
//! Architecture:
//! - Configuration: Load settings from environment variables
//! - Store: Shared connection to the document store and its unique index
//! - Repositories: CRUD over the soldier collection
//! - API: HTTP routes, input validation and status mapping
//!
//! A store that cannot be reached at startup leaves the service running in a
//! degraded mode where every data route answers 503, unless
//! REQUIRE_DATABASE is set.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod repository;
pub mod store;

use crate::config::Config;
use crate::store::StoreClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    config.validate().context("Invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "roster_server={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Roster Server...");

    let store = Arc::new(StoreClient::new(config.store_settings()));

    tracing::info!(
        "Connecting to database {}/{}...",
        config.db_name,
        config.collection_name
    );

    if store.connect().await {
        tracing::info!("Database connection established successfully");
    } else if config.require_database {
        anyhow::bail!("Database connection failed and REQUIRE_DATABASE is set");
    } else {
        tracing::warn!("Continuing without database; data routes will answer 503");
    }

    // Build router with all API endpoints
    let app = api::create_router(store.clone());

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    tracing::info!("Application shutdown: disconnecting from database...");
    store.disconnect().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
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
