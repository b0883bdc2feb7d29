//! Admin API.
//!
//! Served on its own listener so diagnostics never share a path space with
//! dispatched routes. Every endpoint requires the configured bearer key.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::{check_route, get_status};
use crate::routing::DispatchTable;

/// State shared by admin handlers.
#[derive(Debug, Clone)]
pub struct AdminState {
    pub table: Arc<DispatchTable>,
    pub api_key: Arc<str>,
}

pub fn setup_admin_router(table: Arc<DispatchTable>, api_key: &str) -> Router {
    let state = AdminState {
        table,
        api_key: Arc::from(api_key),
    };

    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes/check", get(check_route))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
