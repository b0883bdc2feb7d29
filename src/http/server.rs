//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router whose fallback is the dispatch table
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve on a listener until shutdown
//! - Apply configuration updates to the dispatch table while serving

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, extract::State, http::Request, response::Response, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DispatchConfig;
use crate::http::request::UuidRequestId;
use crate::routing::{register_routes, DispatchTable};

/// HTTP server fronting a dispatch table.
pub struct HttpServer {
    router: Router,
    table: Arc<DispatchTable>,
}

impl HttpServer {
    /// Create a server for `table`, configured by `config`.
    ///
    /// Routes declared in `config` are not registered here; see
    /// [`register_routes`].
    pub fn new(config: &DispatchConfig, table: Arc<DispatchTable>) -> Self {
        let router = Self::build_router(config, Arc::clone(&table));
        Self { router, table }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DispatchConfig, table: Arc<DispatchTable>) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(table)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until a shutdown signal arrives.
    ///
    /// Each configuration received on `config_updates` has its routes
    /// registered into the table as one batch.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<DispatchConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.table.len(), "HTTP server starting");

        let table = Arc::clone(&self.table);
        let reload = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                let count = register_routes(&table, &config.routes);
                tracing::info!(routes = count, total = table.len(), "Routes reloaded from configuration");
            }
        });

        let result = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await;

        reload.abort();
        tracing::info!("HTTP server stopped");
        result
    }
}

/// Fallback handler: every request goes through the dispatch table.
async fn dispatch_handler(
    State(table): State<Arc<DispatchTable>>,
    request: Request<Body>,
) -> Response {
    table.dispatch(request).await
}
