//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize metrics, then the dispatch table and its configured routes
//! - Bind listeners last, so traffic only arrives when routes are in place
//! - Start the config watcher when a config file is in use
//! - Run until a shutdown signal, then stop every server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::admin::setup_admin_router;
use crate::config::{ConfigWatcher, DispatchConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routing::{register_routes, DispatchTable};

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to watch config file: {0}")]
    Watch(#[from] notify::Error),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

fn parse_addr(address: &str) -> Result<SocketAddr, StartupError> {
    address.parse().map_err(|source| StartupError::Address {
        address: address.to_string(),
        source,
    })
}

async fn bind(address: &str) -> Result<TcpListener, StartupError> {
    let address = parse_addr(address)?;
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Start every configured component and serve until shutdown.
///
/// `config_path` enables hot reload of the routes from that file.
pub async fn run(config: DispatchConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(parse_addr(&config.observability.metrics_address)?)?;
    }

    let table = Arc::new(DispatchTable::new());
    let registered = register_routes(&table, &config.routes);
    tracing::info!(routes = registered, "Configured routes registered");

    let (_watcher, config_updates) = match config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(&path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();

    let admin = if config.admin.enabled {
        let listener = bind(&config.admin.bind_address).await?;
        tracing::info!(address = %listener.local_addr()?, "Admin API listening");
        let app = setup_admin_router(Arc::clone(&table), &config.admin.api_key);
        let mut admin_shutdown = shutdown.subscribe();
        Some(tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = admin_shutdown.recv().await;
                })
                .await
        }))
    } else {
        None
    };

    let listener = bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, table);
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let served = server.run(listener, config_updates, server_shutdown).await;
    // Stop the admin API as well when the main server exits on an error.
    shutdown.trigger();

    if let Some(admin) = admin {
        match admin.await {
            Ok(Err(e)) => tracing::error!(error = %e, "Admin API error"),
            Err(e) => tracing::error!(error = %e, "Admin API task failed"),
            Ok(Ok(())) => {}
        }
    }

    served?;
    Ok(())
}
