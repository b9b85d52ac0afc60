//! Interception options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do with a request no handler matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnhandledRequestStrategy {
    /// Pass the request through silently
    Bypass,
    /// Log a warning and pass the request through
    #[default]
    Warn,
    /// Fail the request
    Error,
}

impl fmt::Display for UnhandledRequestStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnhandledRequestStrategy::Bypass => "bypass",
            UnhandledRequestStrategy::Warn => "warn",
            UnhandledRequestStrategy::Error => "error",
        })
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown unhandled request strategy: {0} (expected bypass, warn or error)")]
pub struct UnknownStrategy(pub String);

impl FromStr for UnhandledRequestStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bypass" => Ok(UnhandledRequestStrategy::Bypass),
            "warn" => Ok(UnhandledRequestStrategy::Warn),
            "error" => Ok(UnhandledRequestStrategy::Error),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Options passed to `MockServer::listen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOptions {
    #[serde(default)]
    pub on_unhandled_request: UnhandledRequestStrategy,
}

impl ServerOptions {
    pub fn new(on_unhandled_request: UnhandledRequestStrategy) -> Self {
        Self {
            on_unhandled_request,
        }
    }
}
