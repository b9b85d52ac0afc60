//! Errors raised by the mock server.

use crate::types::route::HttpMethod;
use thiserror::Error;

/// Invalid lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Mock server is already listening")]
    AlreadyListening,
    #[error("Mock server was closed and can no longer listen")]
    Closed,
}

/// Simulated request could not be answered by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server is not intercepting requests
    #[error("Mock server is not listening; cannot handle {method} {url}")]
    NotListening { method: HttpMethod, url: String },
    /// No handler matched and the strategy is `error`
    #[error("Captured a request without a matching request handler: {method} {url}")]
    UnhandledRequest { method: HttpMethod, url: String },
    /// Delayed request was cancelled by closing the server
    #[error("Request {method} {url} was aborted before it resolved")]
    Aborted { method: HttpMethod, url: String },
}
