//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, TokenService};
use kernel::db::{PgStore, PoolSettings};
use report::{HttpClassifier, ReportConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::router::{Services, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,report=info,kernel=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    tracing::info!("Connecting to database");
    let pool = PoolSettings::default()
        .options()
        .connect_with(config.database.connect_options()?)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    if config.run_migrations {
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await?;

        tracing::info!("Migrations completed");
    }

    // Services
    let auth_config = AuthConfig::new(config.jwt_key.as_bytes());
    let report_config = ReportConfig::new(config.predict_api_url.clone());
    let services = Services {
        store: Arc::new(PgStore::new(pool.clone())),
        tokens: Arc::new(TokenService::from_config(&auth_config)),
        classifier: Arc::new(HttpClassifier::from_config(&report_config)?),
        report_config,
    };

    let app = build_router(services, &config);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down server");
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
