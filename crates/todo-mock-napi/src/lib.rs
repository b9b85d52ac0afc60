//! NAPI-RS bindings for the to-do backend simulator.
//!
//! Exposes the mock server to the Node.js test runner that drives the front-end.

use napi_derive::napi;

mod server;
mod types;

pub use server::*;
pub use types::*;

/// Library version
#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
