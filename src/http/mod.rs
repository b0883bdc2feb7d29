//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, decoded path)
//!     → routing::DispatchTable (handler lookup)
//!     → handler response, or response.rs (fixed 404)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_path, UuidRequestId, X_REQUEST_ID};
pub use response::{not_found, NOT_FOUND_BODY};
pub use server::HttpServer;
