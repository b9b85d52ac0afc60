//! Request handlers and the per-test behaviour wrapped around them.

use crate::matching::{PatternError, UrlPattern};
use crate::mocks::endpoints;
use crate::mocks::request::{MockRequest, MockResponse};
use crate::store::CollectionStore;
use crate::types::route::{Endpoint, HttpMethod};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Handler body supplied by a test.
pub type HandlerFn = Arc<dyn Fn(&mut CollectionStore, &MockRequest) -> MockResponse + Send + Sync>;

/// What a handler does once it runs.
#[derive(Clone)]
pub enum Responder {
    /// Built-in backend behaviour
    Endpoint(Endpoint),
    /// Short-circuit with a status and an empty body; the store is not touched
    Status(u16),
    /// Fixed JSON reply; the store is not touched
    Json { status: u16, body: Value },
    /// Custom function over the store
    Custom(HandlerFn),
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Responder::Endpoint(endpoint) => f.debug_tuple("Endpoint").field(endpoint).finish(),
            Responder::Status(status) => f.debug_tuple("Status").field(status).finish(),
            Responder::Json { status, body } => f
                .debug_struct("Json")
                .field("status", status)
                .field("body", body)
                .finish(),
            Responder::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// When a handler resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    /// Resolve right away
    #[default]
    Immediate,
    /// Resolve after the given duration
    Fixed(Duration),
    /// Never resolve; the request stays pending until the server is closed
    Infinite,
}

/// Handler bound to a method and URL pattern.
#[derive(Debug, Clone)]
pub struct Handler {
    method: HttpMethod,
    pattern: UrlPattern,
    responder: Responder,
    latency: Latency,
}

impl Handler {
    /// Handler for an arbitrary method and pattern.
    pub fn new(method: HttpMethod, pattern: &str, responder: Responder) -> Result<Self, PatternError> {
        Ok(Self {
            method,
            pattern: UrlPattern::new(pattern)?,
            responder,
            latency: Latency::Immediate,
        })
    }

    /// Handler for an arbitrary method and pattern running a custom function.
    pub fn custom<F>(method: HttpMethod, pattern: &str, f: F) -> Result<Self, PatternError>
    where
        F: Fn(&mut CollectionStore, &MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        Self::new(method, pattern, Responder::Custom(Arc::new(f)))
    }

    /// Default handler of a built-in endpoint.
    pub fn endpoint(endpoint: Endpoint) -> Self {
        Self::for_endpoint(endpoint, Responder::Endpoint(endpoint))
    }

    /// Handler on `endpoint`'s route that fails with `status` and an empty body.
    pub fn error(endpoint: Endpoint, status: u16) -> Self {
        Self::for_endpoint(endpoint, Responder::Status(status))
    }

    /// Handler on `endpoint`'s route that replies with a fixed JSON body.
    pub fn reply(endpoint: Endpoint, status: u16, body: Value) -> Self {
        Self::for_endpoint(endpoint, Responder::Json { status, body })
    }

    /// Resolve after `delay` instead of immediately.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.latency = Latency::Fixed(delay);
        self
    }

    /// Never resolve.
    pub fn never_resolve(mut self) -> Self {
        self.latency = Latency::Infinite;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Whether this handler and `other` are bound to the same route.
    pub fn same_route(&self, other: &Handler) -> bool {
        self.method == other.method && self.pattern == other.pattern
    }

    /// Match `request`, returning it with path parameters filled in.
    pub fn matches(&self, request: &MockRequest) -> Option<MockRequest> {
        if self.method != request.method {
            return None;
        }

        let result = self.pattern.matches(&request.url);
        if !result.matched {
            return None;
        }

        let mut matched = request.clone();
        matched.params = result.params;

        if let Responder::Endpoint(endpoint) = self.responder {
            if !endpoints::accepts(endpoint, &matched) {
                return None;
            }
        }

        Some(matched)
    }

    /// Produce the response for an already matched request.
    pub fn respond(&self, store: &mut CollectionStore, request: &MockRequest) -> MockResponse {
        match &self.responder {
            Responder::Endpoint(endpoint) => endpoints::respond(*endpoint, store, request),
            Responder::Status(status) => MockResponse::status(*status),
            Responder::Json { status, body } => MockResponse::json(*status, body.clone()),
            Responder::Custom(f) => f(store, request),
        }
    }

    fn for_endpoint(endpoint: Endpoint, responder: Responder) -> Self {
        Self {
            method: endpoint.method(),
            pattern: UrlPattern::from_static(endpoint.pattern()),
            responder,
            latency: Latency::Immediate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::state::InitialState;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(MockRequest::delete("/api/v1/tasks/3"), true)]
    #[case(MockRequest::delete("http://localhost/api/v1/tasks/3/"), true)]
    #[case(MockRequest::patch("/api/v1/tasks/3", json!({})), false)]
    #[case(MockRequest::delete("/api/v1/tasks/three"), false)]
    #[case(MockRequest::delete("/api/v1/lists/3"), false)]
    fn test_endpoint_handler_matches(#[case] request: MockRequest, #[case] expected: bool) {
        let handler = Handler::endpoint(Endpoint::DeleteTask);
        let matched = handler.matches(&request);
        assert_eq!(matched.is_some(), expected);
        if let Some(matched) = matched {
            assert_eq!(matched.param("id"), Some("3"));
        }
    }

    #[rstest]
    fn test_error_handler_accepts_any_id_and_skips_store() {
        let handler = Handler::error(Endpoint::DeleteTask, 500);
        let request = handler
            .matches(&MockRequest::delete("/api/v1/tasks/three"))
            .expect("Should match");

        let mut store = CollectionStore::new(InitialState::default());
        store.create_task(0, None).expect("Should allocate an id");
        let response = handler.respond(&mut store, &request);

        assert_eq!(response, MockResponse::status(500));
        assert_eq!(store.tasks().len(), 1);
    }

    #[rstest]
    fn test_custom_handler_sees_params() {
        let handler = Handler::custom(HttpMethod::Get, "/api/v1/echo/:name", |_, request| {
            MockResponse::json(200, json!({"name": request.param("name")}))
        })
        .expect("Should compile");

        let request = handler
            .matches(&MockRequest::get("/api/v1/echo/ann"))
            .expect("Should match");
        let response = handler.respond(&mut CollectionStore::default(), &request);

        assert_eq!(response.body, Some(json!({"name": "ann"})));
    }

    #[rstest]
    #[case(200, json!({"id": 7, "name": "canned", "removable": true}))]
    #[case(404, json!({"message": "not found"}))]
    fn test_reply_handler_returns_fixed_body(#[case] status: u16, #[case] body: Value) {
        let handler = Handler::reply(Endpoint::CreateList, status, body.clone());
        let request = handler
            .matches(&MockRequest::post("/api/v1/lists", json!({"name": "ignored"})))
            .expect("Should match");

        let mut store = CollectionStore::default();
        let response = handler.respond(&mut store, &request);

        assert_eq!(response, MockResponse::json(status, body));
        assert!(store.lists().is_empty());
    }

    #[rstest]
    fn test_latency_builders() {
        let handler = Handler::endpoint(Endpoint::CreateList);
        assert_eq!(handler.latency(), Latency::Immediate);

        let delayed = handler.clone().delayed(Duration::from_millis(250));
        assert_eq!(delayed.latency(), Latency::Fixed(Duration::from_millis(250)));

        let pending = handler.never_resolve();
        assert_eq!(pending.latency(), Latency::Infinite);
    }

    #[rstest]
    fn test_same_route() {
        let default = Handler::endpoint(Endpoint::UpdateTask);
        assert!(default.same_route(&Handler::error(Endpoint::UpdateTask, 500)));
        assert!(!default.same_route(&Handler::endpoint(Endpoint::DeleteTask)));
    }
}
