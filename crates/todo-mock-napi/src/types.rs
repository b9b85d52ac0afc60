//! Plain objects exchanged with Node.js.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use todo_mock_core::{
    Endpoint, Interception, ServerOptions as CoreServerOptions, UnhandledRequestStrategy,
};

/// Options for `MockServer.listen`
#[napi(object)]
#[derive(Clone, Default)]
pub struct ListenOptions {
    /// `bypass`, `warn` (default) or `error`
    pub on_unhandled_request: Option<String>,
}

impl TryFrom<ListenOptions> for CoreServerOptions {
    type Error = Error;

    fn try_from(options: ListenOptions) -> Result<Self> {
        let strategy = match options.on_unhandled_request {
            Some(name) => name
                .parse::<UnhandledRequestStrategy>()
                .map_err(|e| Error::from_reason(e.to_string()))?,
            None => UnhandledRequestStrategy::default(),
        };
        Ok(CoreServerOptions::new(strategy))
    }
}

/// Result of a simulated request
#[napi(object)]
pub struct FetchResponse {
    /// HTTP status; 0 when the request passed through unhandled
    pub status: u32,
    pub body: Option<serde_json::Value>,
    /// `true` when no handler matched and the request would reach the real network
    pub passthrough: bool,
}

impl From<Interception> for FetchResponse {
    fn from(interception: Interception) -> Self {
        match interception {
            Interception::Mocked(response) => Self {
                status: u32::from(response.status),
                body: response.body,
                passthrough: false,
            },
            Interception::Passthrough(_) => Self {
                status: 0,
                body: None,
                passthrough: true,
            },
        }
    }
}

/// Parse an endpoint name such as `create-task`.
pub(crate) fn parse_endpoint(name: &str) -> Result<Endpoint> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|_| Error::from_reason(format!("Unknown endpoint: {name}")))
}

/// Convert a JS status number to an HTTP status code.
pub(crate) fn parse_status(status: u32) -> Result<u16> {
    u16::try_from(status)
        .ok()
        .filter(|s| (100..=599).contains(s))
        .ok_or_else(|| Error::from_reason(format!("Invalid HTTP status: {status}")))
}
