//! Path dispatch server.
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ axum ──▶ request id / trace / timeout      │
//!                             │              │                                │
//!                             │              ▼                                │
//!                             │     DispatchTable::dispatch                   │
//!                             │       normalize(path) ─▶ snapshot lookup      │
//!                             │          │ hit                  │ miss        │
//!                             │          ▼                      ▼             │
//!     Client Response         │       handler             404 page not found  │
//!     ◀───────────────────────┼──────────┴──────────────────────┘             │
//!                             │                                               │
//!                             │  config watcher ──▶ register (batch)          │
//!                             │  admin API ──▶ is_registered                  │
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use path_dispatch::config::{load_config, DispatchConfig};
use path_dispatch::lifecycle;
use path_dispatch::observability::logging;

#[derive(Parser)]
#[command(name = "path-dispatch")]
#[command(about = "Exact-path request dispatch server", long_about = None)]
struct Args {
    /// TOML configuration file; watched for route changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file.
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DispatchConfig::default(),
    };

    let level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init_logging(level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "path-dispatch starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    lifecycle::run(config, args.config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
