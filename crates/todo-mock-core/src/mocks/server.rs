//! Mock server driving the store and registry through a test's lifecycle.
//!
//! A [`MockServer`] owns one [`CollectionStore`] and one [`HandlerRegistry`]. Build a fresh
//! server per test so no state leaks between tests:
//!
//! ```ignore
//! let server = MockServer::new(InitialState::with_default_list(1, "primary"));
//! server.listen(ServerOptions::new(UnhandledRequestStrategy::Warn))?;
//! server.use_error(Endpoint::CreateTask, 500);
//! // ... drive the front-end ...
//! server.reset_handlers();
//! server.close();
//! ```

use crate::config::options::{ServerOptions, UnhandledRequestStrategy};
use crate::mocks::error::{FetchError, LifecycleError};
use crate::mocks::handler::{Handler, Latency};
use crate::mocks::registry::HandlerRegistry;
use crate::mocks::request::{MockRequest, MockResponse};
use crate::store::CollectionStore;
use crate::types::route::Endpoint;
use crate::types::state::InitialState;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;

/// Lifecycle state of a [`MockServer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Built but not intercepting yet
    Stopped,
    /// Intercepting requests
    Listening,
    /// Torn down; handlers released
    Closed,
}

/// Outcome of a simulated request.
#[derive(Debug, Clone, PartialEq)]
pub enum Interception {
    /// A handler answered the request
    Mocked(MockResponse),
    /// No handler matched; the request would go to the real network
    Passthrough(MockRequest),
}

impl Interception {
    pub fn into_response(self) -> Option<MockResponse> {
        match self {
            Interception::Mocked(response) => Some(response),
            Interception::Passthrough(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Lifecycle {
    Stopped,
    Listening(ServerOptions),
    Closed,
}

#[derive(Debug)]
struct Shared {
    store: Mutex<CollectionStore>,
    registry: Mutex<HandlerRegistry>,
    lifecycle: Mutex<Lifecycle>,
    /// Delayed requests still waiting to resolve
    in_flight: Mutex<Vec<AbortHandle>>,
}

impl Shared {
    fn respond(&self, handler: &Handler, request: &MockRequest) -> MockResponse {
        let response = {
            let mut store = self.store.lock();
            handler.respond(&mut store, request)
        };
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "request handled"
        );
        response
    }

    /// Respond unless the server stopped listening while the request was delayed.
    fn respond_if_listening(&self, handler: &Handler, request: &MockRequest) -> Option<MockResponse> {
        let lifecycle = self.lifecycle.lock();
        if !matches!(*lifecycle, Lifecycle::Listening(_)) {
            return None;
        }
        Some(self.respond(handler, request))
    }

    fn track(&self, handle: AbortHandle) {
        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }

    fn abort_in_flight(&self) -> usize {
        let aborted: Vec<AbortHandle> = self.in_flight.lock().drain(..).collect();
        let pending = aborted.iter().filter(|h| !h.is_finished()).count();
        for handle in aborted {
            handle.abort();
        }
        pending
    }
}

/// In-memory backend answering simulated requests for one test.
#[derive(Debug)]
pub struct MockServer {
    shared: Arc<Shared>,
}

impl MockServer {
    /// Server over a store seeded from `seed`, serving every built-in endpoint.
    pub fn new(seed: InitialState) -> Self {
        Self::with_store(CollectionStore::new(seed))
    }

    /// Server over an existing store, serving every built-in endpoint.
    pub fn with_store(store: CollectionStore) -> Self {
        Self::with_registry(store, HandlerRegistry::with_default_endpoints())
    }

    /// Server over an existing store and registry.
    pub fn with_registry(store: CollectionStore, registry: HandlerRegistry) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(store),
                registry: Mutex::new(registry),
                lifecycle: Mutex::new(Lifecycle::Stopped),
                in_flight: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> ServerState {
        match *self.shared.lifecycle.lock() {
            Lifecycle::Stopped => ServerState::Stopped,
            Lifecycle::Listening(_) => ServerState::Listening,
            Lifecycle::Closed => ServerState::Closed,
        }
    }

    /// Start intercepting requests.
    pub fn listen(&self, options: ServerOptions) -> Result<(), LifecycleError> {
        let mut lifecycle = self.shared.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Stopped => {
                *lifecycle = Lifecycle::Listening(options);
                tracing::info!(
                    on_unhandled_request = %options.on_unhandled_request,
                    "mock server listening"
                );
                Ok(())
            }
            Lifecycle::Listening(_) => Err(LifecycleError::AlreadyListening),
            Lifecycle::Closed => Err(LifecycleError::Closed),
        }
    }

    /// Install per-test handlers in front of the current ones.
    pub fn use_handlers(&self, handlers: Vec<Handler>) {
        for handler in &handlers {
            tracing::debug!(
                method = %handler.method(),
                pattern = handler.pattern(),
                latency = ?handler.latency(),
                responder = ?handler.responder(),
                "installing handler override"
            );
        }
        self.shared.registry.lock().use_handlers(handlers);
    }

    /// Delay the handler currently answering `endpoint` by `delay`.
    pub fn use_delay(&self, endpoint: Endpoint, delay: Duration) {
        let handler = self.active_handler(endpoint).delayed(delay);
        self.use_handlers(vec![handler]);
    }

    /// Keep requests to `endpoint` pending until the server is closed.
    pub fn use_never_resolve(&self, endpoint: Endpoint) {
        let handler = self.active_handler(endpoint).never_resolve();
        self.use_handlers(vec![handler]);
    }

    /// Answer `endpoint` with `status` and an empty body, leaving the store untouched.
    pub fn use_error(&self, endpoint: Endpoint, status: u16) {
        self.use_handlers(vec![Handler::error(endpoint, status)]);
    }

    /// Answer `endpoint` with a fixed JSON body, leaving the store untouched.
    pub fn use_reply(&self, endpoint: Endpoint, status: u16, body: serde_json::Value) {
        self.use_handlers(vec![Handler::reply(endpoint, status, body)]);
    }

    /// Drop per-test overrides. Store contents are kept.
    pub fn reset_handlers(&self) {
        let mut registry = self.shared.registry.lock();
        let dropped = registry.overrides().len();
        registry.reset_to_defaults();
        tracing::debug!(dropped, "handler overrides reset");
    }

    /// Stop intercepting, release every handler and abort delayed requests.
    pub fn close(&self) {
        *self.shared.lifecycle.lock() = Lifecycle::Closed;
        self.shared.registry.lock().clear();
        let aborted = self.shared.abort_in_flight();
        tracing::info!(aborted, "mock server closed");
    }

    /// Copy of the store in the shape of the seed state.
    pub fn snapshot(&self) -> InitialState {
        self.shared.store.lock().snapshot()
    }

    /// Run `f` against the store.
    pub fn inspect<R>(&self, f: impl FnOnce(&CollectionStore) -> R) -> R {
        f(&self.shared.store.lock())
    }

    /// Delayed requests that have not resolved yet.
    pub fn pending_requests(&self) -> usize {
        self.shared
            .in_flight
            .lock()
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Dispatch a simulated request to the matching handler.
    ///
    /// Delayed handlers run on a spawned task: the store is mutated when the delay elapses,
    /// even if the caller stops awaiting this future. Only [`MockServer::close`] cancels them.
    pub async fn fetch(&self, request: MockRequest) -> Result<Interception, FetchError> {
        let options = match *self.shared.lifecycle.lock() {
            Lifecycle::Listening(options) => options,
            Lifecycle::Stopped | Lifecycle::Closed => {
                return Err(FetchError::NotListening {
                    method: request.method,
                    url: request.url,
                })
            }
        };

        let resolved = self.shared.registry.lock().resolve(&request);
        let Some((handler, matched)) = resolved else {
            return self.unhandled(request, options.on_unhandled_request);
        };

        tracing::debug!(
            method = %matched.method,
            url = %matched.url,
            pattern = handler.pattern(),
            "dispatching request"
        );

        let response = match handler.latency() {
            Latency::Immediate => self.shared.respond(&handler, &matched),
            latency => self.respond_later(handler, matched, latency).await?,
        };

        Ok(Interception::Mocked(response))
    }

    async fn respond_later(
        &self,
        handler: Handler,
        request: MockRequest,
        latency: Latency,
    ) -> Result<MockResponse, FetchError> {
        let method = request.method;
        let url = request.url.clone();
        let shared = Arc::clone(&self.shared);

        // Spawn and register under the lifecycle lock so `close` either sees the task or
        // has already flipped the state.
        let task = {
            let lifecycle = self.shared.lifecycle.lock();
            if !matches!(*lifecycle, Lifecycle::Listening(_)) {
                return Err(FetchError::Aborted { method, url });
            }

            let task = tokio::spawn(async move {
                match latency {
                    Latency::Fixed(delay) => tokio::time::sleep(delay).await,
                    Latency::Infinite => std::future::pending::<()>().await,
                    Latency::Immediate => {}
                }
                shared.respond_if_listening(&handler, &request)
            });
            self.shared.track(task.abort_handle());
            task
        };

        match task.await {
            Ok(Some(response)) => Ok(response),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Ok(None) | Err(_) => {
                tracing::debug!(%method, %url, "delayed request aborted");
                Err(FetchError::Aborted { method, url })
            }
        }
    }

    fn unhandled(
        &self,
        request: MockRequest,
        strategy: UnhandledRequestStrategy,
    ) -> Result<Interception, FetchError> {
        match strategy {
            UnhandledRequestStrategy::Bypass => {
                tracing::debug!(method = %request.method, url = %request.url, "bypassing unhandled request");
                Ok(Interception::Passthrough(request))
            }
            UnhandledRequestStrategy::Warn => {
                tracing::warn!(
                    method = %request.method,
                    url = %request.url,
                    "captured a request without a matching request handler"
                );
                Ok(Interception::Passthrough(request))
            }
            UnhandledRequestStrategy::Error => {
                tracing::error!(
                    method = %request.method,
                    url = %request.url,
                    "captured a request without a matching request handler"
                );
                Err(FetchError::UnhandledRequest {
                    method: request.method,
                    url: request.url,
                })
            }
        }
    }

    /// Handler answering `endpoint` right now, or its default when the route was released.
    fn active_handler(&self, endpoint: Endpoint) -> Handler {
        let probe = Handler::endpoint(endpoint);
        self.shared
            .registry
            .lock()
            .active_on_route(&probe)
            .cloned()
            .unwrap_or(probe)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shared.abort_in_flight();
    }
}
