//! REST Transport
//!
//! Opaque request-execute service for the platform REST API. The command
//! registry talks to the platform exclusively through the [`Transport`]
//! trait; [`HttpTransport`](http::HttpTransport) is the shipped HTTP
//! implementation.

pub mod http;
pub mod routes;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// HTTP method of a REST request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch a resource.
    Get,
    /// Create a resource.
    Post,
    /// Partially update a resource.
    Patch,
    /// Replace a resource.
    Put,
    /// Delete a resource.
    Delete,
}

impl Method {
    /// Stable name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single REST API request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// API route relative to the base URL, without a leading slash.
    pub route: String,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl Request {
    fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A GET request.
    #[must_use]
    pub fn get(route: impl Into<String>) -> Self {
        Self::new(Method::Get, route)
    }

    /// A POST request.
    #[must_use]
    pub fn post(route: impl Into<String>) -> Self {
        Self::new(Method::Post, route)
    }

    /// A PATCH request.
    #[must_use]
    pub fn patch(route: impl Into<String>) -> Self {
        Self::new(Method::Patch, route)
    }

    /// A PUT request.
    #[must_use]
    pub fn put(route: impl Into<String>) -> Self {
        Self::new(Method::Put, route)
    }

    /// A DELETE request.
    #[must_use]
    pub fn delete(route: impl Into<String>) -> Self {
        Self::new(Method::Delete, route)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Errors from executing a REST request.
#[derive(Debug, Error)]
pub enum RestError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        message: String,
    },
    /// The response body did not decode into the expected shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Opaque request-execute service for the platform REST API.
///
/// Retry policy, if any, belongs to the implementation; callers see failures
/// unmodified.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the decoded JSON body, `Value::Null`
    /// for empty responses.
    async fn execute(&self, request: Request) -> Result<Value, RestError>;
}
