//! Fixed responses produced by the dispatch layer itself.
//!
//! Handler output is never transformed here; only the miss case is built
//! locally.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Body sent when no handler is registered for a path.
pub const NOT_FOUND_BODY: &str = "404 page not found";

/// The response for a path with no registered handler.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        NOT_FOUND_BODY,
    )
        .into_response()
}
