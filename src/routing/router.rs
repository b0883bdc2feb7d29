//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store handlers under their normalized path key
//! - Resolve a request to its handler or the fixed not-found response
//! - Answer "is this path registered" for diagnostics
//!
//! # Design Decisions
//! - Readers load an immutable snapshot (lock-free, never torn)
//! - Writers serialize on a mutex, copy the snapshot, then publish it
//! - Last registration for a key wins, silently
//! - The snapshot is released before a handler runs, so handlers may register

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::http::request::{request_id, request_path};
use crate::http::response::not_found;
use crate::observability::metrics;
use crate::routing::handler::Handler;
use crate::routing::normalize::normalize;

type RouteMap = HashMap<String, Arc<dyn Handler>>;

/// Exact-match table from normalized path to handler.
pub struct DispatchTable {
    routes: ArcSwap<RouteMap>,
    write_lock: Mutex<()>,
}

impl DispatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            routes: ArcSwap::from_pointee(RouteMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Register `handler` for `path`, replacing any handler already stored
    /// under the same normalized key.
    pub fn register<H: Handler>(&self, path: &str, handler: H) {
        self.register_arc(path, Arc::new(handler));
    }

    /// Register an already shared handler.
    pub fn register_arc(&self, path: &str, handler: Arc<dyn Handler>) {
        self.register_all(std::iter::once((path.to_owned(), handler)));
    }

    /// Register a batch of handlers, published to readers in one swap.
    ///
    /// Returns the number of entries in the batch.
    pub fn register_all<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, Arc<dyn Handler>)>,
    {
        let entries: Vec<(String, Arc<dyn Handler>)> = entries
            .into_iter()
            .map(|(path, handler)| (normalize(&path), handler))
            .collect();
        let added = entries.len();

        let total = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            let mut next = RouteMap::clone(&self.routes.load());
            for (key, handler) in entries {
                let replaced = next.insert(key.clone(), handler).is_some();
                tracing::debug!(path = %key, replaced, "Handler registered");
            }
            let total = next.len();
            self.routes.store(Arc::new(next));
            total
        };

        metrics::record_routes_registered(total);
        added
    }

    /// The handler registered for `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<Arc<dyn Handler>> {
        self.routes.load().get(&normalize(path)).cloned()
    }

    /// Whether a handler is registered for `path`.
    pub fn is_registered(&self, path: &str) -> bool {
        self.routes.load().contains_key(&normalize(path))
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Route `request` to its handler, or answer 404 when none matches.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let key = normalize(&request_path(request.uri()));
        let handler = self.routes.load().get(&key).cloned();

        match handler {
            Some(handler) => {
                tracing::debug!(
                    request_id = %request_id(&request),
                    path = %key,
                    "Dispatching request"
                );
                let response = handler.call(request).await;
                metrics::record_dispatch(metrics::OUTCOME_MATCHED, start);
                response
            }
            None => {
                tracing::debug!(
                    request_id = %request_id(&request),
                    path = %key,
                    "No handler registered"
                );
                metrics::record_dispatch(metrics::OUTCOME_NOT_FOUND, start);
                not_found()
            }
        }
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("routes", &self.len())
            .finish()
    }
}
