//! Handler abstraction.
//!
//! # Responsibilities
//! - Define the capability the dispatch table invokes on a hit
//! - Adapt plain async functions and closures into handlers
//! - Provide a fixed-response handler for config-declared routes
//!
//! # Design Decisions
//! - Handlers are trait objects so tests can substitute their own
//! - Output is returned untouched; the table never inspects it

use std::future::Future;
use std::pin::Pin;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::RouteConfig;

/// Boxed future produced by a [`Handler`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Application logic invoked for a matched request.
pub trait Handler: Send + Sync + 'static {
    /// Handle the request and produce a response.
    fn call(&self, request: Request<Body>) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(&self, request: Request<Body>) -> HandlerFuture {
        let fut = self(request);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Responds with the same status, content type and body on every call.
#[derive(Debug, Clone)]
pub struct StaticResponse {
    status: StatusCode,
    content_type: HeaderValue,
    body: String,
}

impl StaticResponse {
    pub const DEFAULT_CONTENT_TYPE: &'static str = "text/plain; charset=utf-8";

    /// A `200 OK` plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: HeaderValue::from_static(Self::DEFAULT_CONTENT_TYPE),
            body: body.into(),
        }
    }

    /// Override the status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Override the content type.
    pub fn with_content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = content_type;
        self
    }

    /// Build from a route declared in the configuration file.
    ///
    /// Returns `None` when the status or content type cannot be represented.
    pub fn from_config(route: &RouteConfig) -> Option<Self> {
        let status = StatusCode::from_u16(route.status).ok()?;
        let content_type = HeaderValue::from_str(&route.content_type).ok()?;
        Some(
            Self::text(route.body.clone())
                .with_status(status)
                .with_content_type(content_type),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Handler for StaticResponse {
    fn call(&self, _request: Request<Body>) -> HandlerFuture {
        let response = (
            self.status,
            [(header::CONTENT_TYPE, self.content_type.clone())],
            self.body.clone(),
        )
            .into_response();
        Box::pin(async move { response })
    }
}
