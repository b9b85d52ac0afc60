//! NAPI bindings for the mock server lifecycle.

use crate::types::{parse_endpoint, parse_status, FetchResponse, ListenOptions};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::Arc;
use std::time::Duration;
use todo_mock_core::{
    config::parser, HttpMethod, InitialState, MockRequest, MockServer as CoreMockServer,
    ServerOptions as CoreServerOptions, ServerState,
};

/// Mock backend for one test
#[napi]
pub struct MockServer {
    inner: Arc<CoreMockServer>,
}

#[napi]
impl MockServer {
    /// Create a server seeded with `{currentListId, lists, tasks}`
    ///
    /// @param initialState - Optional seed state; empty collections when omitted
    #[napi(constructor)]
    pub fn new(initial_state: Option<serde_json::Value>) -> Result<Self> {
        let seed: InitialState = match initial_state {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| Error::from_reason(format!("Invalid initial state: {e}")))?,
            None => InitialState::default(),
        };

        Ok(Self {
            inner: Arc::new(CoreMockServer::new(seed)),
        })
    }

    /// Start intercepting requests
    #[napi]
    pub fn listen(&self, options: Option<ListenOptions>) -> Result<()> {
        let options = CoreServerOptions::try_from(options.unwrap_or_default())?;
        self.inner
            .listen(options)
            .map_err(|e| Error::from_reason(e.to_string()))
    }

    /// Drop per-test handler overrides
    #[napi]
    pub fn reset_handlers(&self) {
        self.inner.reset_handlers();
    }

    /// Stop intercepting and abort pending requests
    #[napi]
    pub fn close(&self) {
        self.inner.close();
    }

    /// Delay responses of an endpoint
    ///
    /// @param endpoint - Endpoint name, e.g. `create-task`
    /// @param delayMs - Delay in milliseconds
    #[napi]
    pub fn use_delay(&self, endpoint: String, delay_ms: u32) -> Result<()> {
        let endpoint = parse_endpoint(&endpoint)?;
        self.inner
            .use_delay(endpoint, Duration::from_millis(u64::from(delay_ms)));
        Ok(())
    }

    /// Keep requests to an endpoint pending until `close`
    #[napi]
    pub fn use_never_resolve(&self, endpoint: String) -> Result<()> {
        let endpoint = parse_endpoint(&endpoint)?;
        self.inner.use_never_resolve(endpoint);
        Ok(())
    }

    /// Answer an endpoint with an error status and an empty body
    #[napi]
    pub fn use_error(&self, endpoint: String, status: u32) -> Result<()> {
        let endpoint = parse_endpoint(&endpoint)?;
        self.inner.use_error(endpoint, parse_status(status)?);
        Ok(())
    }

    /// Answer an endpoint with a fixed JSON body
    #[napi]
    pub fn use_reply(&self, endpoint: String, status: u32, body: serde_json::Value) -> Result<()> {
        let endpoint = parse_endpoint(&endpoint)?;
        self.inner.use_reply(endpoint, parse_status(status)?, body);
        Ok(())
    }

    /// Current store contents as `{currentListId, lists, tasks}`
    #[napi]
    pub fn snapshot(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.inner.snapshot()).map_err(|e| Error::from_reason(e.to_string()))
    }

    /// Lifecycle state: `stopped`, `listening` or `closed`
    #[napi(getter)]
    pub fn state(&self) -> String {
        match self.inner.state() {
            ServerState::Stopped => "stopped",
            ServerState::Listening => "listening",
            ServerState::Closed => "closed",
        }
        .to_string()
    }

    /// Send a simulated request
    #[napi]
    pub async fn fetch(
        &self,
        method: String,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<FetchResponse> {
        let method = method
            .parse::<HttpMethod>()
            .map_err(|e| Error::from_reason(e.to_string()))?;
        let server = Arc::clone(&self.inner);

        let interception = server
            .fetch(MockRequest::new(method, url, body))
            .await
            .map_err(|e| Error::from_reason(e.to_string()))?;

        Ok(FetchResponse::from(interception))
    }
}

/// Load a seed state fixture (`.json`, `.jsonc`, `.yaml`, `.yml`)
#[napi]
pub async fn load_initial_state(path: String) -> Result<serde_json::Value> {
    let state = parser::load_initial_state(&path)
        .await
        .map_err(|e| Error::from_reason(format!("Failed to load initial state: {e}")))?;
    serde_json::to_value(state).map_err(|e| Error::from_reason(e.to_string()))
}
