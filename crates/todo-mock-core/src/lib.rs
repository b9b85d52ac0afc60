//! In-memory simulator of the to-do list/task REST backend.
//!
//! Interaction tests for the to-do front-end run against a [`MockServer`] instead of a real
//! network. Each server owns its own [`CollectionStore`], answers the list/task routes, and
//! lets a test inject latency or error responses on any of them.

pub mod allocator;
pub mod config;
pub mod matching;
pub mod mocks;
pub mod store;
pub mod types;

pub use allocator::IdsExhausted;
pub use config::error::ConfigError;
pub use config::options::{ServerOptions, UnhandledRequestStrategy};
pub use config::parser::load_initial_state;
pub use mocks::error::{FetchError, LifecycleError};
pub use mocks::handler::{Handler, HandlerFn, Latency, Responder};
pub use mocks::registry::HandlerRegistry;
pub use mocks::request::{MockRequest, MockResponse};
pub use mocks::server::{Interception, MockServer, ServerState};
pub use store::{Clock, CollectionStore, SystemClock};
pub use types::list::TodoList;
pub use types::route::{Endpoint, HttpMethod};
pub use types::state::InitialState;
pub use types::task::{Task, TaskPatch};
