//! Request interception.
//!
//! - [`handler::Handler`]: a route bound to a responder and a latency
//! - [`registry::HandlerRegistry`]: default handlers plus per-test overrides
//! - [`server::MockServer`]: lifecycle controller dispatching simulated requests

pub mod endpoints;
pub mod error;
pub mod handler;
pub mod registry;
pub mod request;
pub mod server;
