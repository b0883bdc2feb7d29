use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::AdminState;
use crate::routing::normalize;

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub routes: usize,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteCheck {
    pub path: String,
    pub normalized: String,
    pub registered: bool,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        routes: state.table.len(),
    })
}

pub async fn check_route(
    State(state): State<AdminState>,
    Query(query): Query<CheckQuery>,
) -> Json<RouteCheck> {
    let registered = state.table.is_registered(&query.path);
    Json(RouteCheck {
        normalized: normalize(&query.path),
        path: query.path,
        registered,
    })
}
