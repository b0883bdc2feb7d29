//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup, config reload, application code):
//!     path + handler
//!     → normalize.rs (lower-case, collapse against "/")
//!     → router.rs (publish new snapshot under write lock)
//!
//! Incoming Request (path)
//!     → normalize.rs
//!     → router.rs (snapshot lookup)
//!     → handler.rs (invoke matched handler) or fixed 404
//! ```
//!
//! # Design Decisions
//! - Exact match on the normalized key only: no prefixes, wildcards or methods
//! - Same normalization on both sides, so keys always compare like-for-like
//! - Duplicate registrations overwrite silently

pub mod handler;
pub mod normalize;
pub mod router;

use std::sync::Arc;

use crate::config::RouteConfig;

pub use handler::{Handler, HandlerFuture, StaticResponse};
pub use normalize::normalize;
pub use router::DispatchTable;

/// Register the routes declared in configuration as static responses.
///
/// Routes whose status or content type cannot be represented are skipped
/// with a warning. Returns the number of routes registered.
pub fn register_routes(table: &DispatchTable, routes: &[RouteConfig]) -> usize {
    let entries = routes.iter().filter_map(|route| match StaticResponse::from_config(route) {
        Some(handler) => Some((route.path.clone(), Arc::new(handler) as Arc<dyn Handler>)),
        None => {
            tracing::warn!(
                path = %route.path,
                status = route.status,
                "Skipping route with invalid status or content type"
            );
            None
        }
    });
    table.register_all(entries)
}
