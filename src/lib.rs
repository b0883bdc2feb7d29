//! Path dispatch library.
//!
//! Maps a request's normalized path to a registered handler and invokes it,
//! or answers `404 page not found`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{body::Body, http::Request};
//! use path_dispatch::routing::{DispatchTable, StaticResponse};
//!
//! # async fn demo() {
//! let table = Arc::new(DispatchTable::new());
//! table.register("a/b", StaticResponse::text("ab"));
//! table.register("/echo", |req: Request<Body>| async move { req.uri().to_string() });
//!
//! let response = table
//!     .dispatch(Request::builder().uri("/A/B").body(Body::empty()).unwrap())
//!     .await;
//! assert_eq!(response.status(), 200);
//! # }
//! ```

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::DispatchConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{normalize, DispatchTable, Handler};
