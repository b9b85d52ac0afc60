//! Registry of request handlers with per-test overrides.
//!
//! Default handlers are fixed when the registry is built. Overrides installed with
//! [`HandlerRegistry::use_handlers`] take precedence until
//! [`HandlerRegistry::reset_to_defaults`] drops them again.

use crate::mocks::handler::Handler;
use crate::mocks::request::MockRequest;
use crate::types::route::Endpoint;

#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    /// Handlers restored by `reset_to_defaults`
    defaults: Vec<Handler>,
    /// Per-test handlers, newest first
    overrides: Vec<Handler>,
}

impl HandlerRegistry {
    pub fn new(defaults: Vec<Handler>) -> Self {
        Self {
            defaults,
            overrides: Vec::new(),
        }
    }

    /// Registry serving every built-in endpoint.
    pub fn with_default_endpoints() -> Self {
        Self::new(Endpoint::ALL.into_iter().map(Handler::endpoint).collect())
    }

    /// Install per-test handlers in front of the current ones.
    ///
    /// A handler replaces an earlier override bound to the same method and pattern;
    /// defaults stay registered underneath.
    pub fn use_handlers(&mut self, handlers: Vec<Handler>) {
        let mut merged: Vec<Handler> = Vec::with_capacity(handlers.len() + self.overrides.len());

        for handler in handlers.into_iter().rev() {
            if !merged.iter().any(|h| h.same_route(&handler)) {
                merged.push(handler);
            }
        }

        let kept: Vec<Handler> = self
            .overrides
            .drain(..)
            .filter(|existing| !merged.iter().any(|h| h.same_route(existing)))
            .collect();
        merged.extend(kept);

        self.overrides = merged;
    }

    /// Drop all overrides, leaving only the defaults.
    pub fn reset_to_defaults(&mut self) {
        self.overrides.clear();
    }

    /// Release every handler, defaults included.
    pub fn clear(&mut self) {
        self.overrides.clear();
        self.defaults.clear();
    }

    pub fn overrides(&self) -> &[Handler] {
        &self.overrides
    }

    pub fn defaults(&self) -> &[Handler] {
        &self.defaults
    }

    /// Handlers in lookup order: overrides first, then defaults.
    pub fn active_handlers(&self) -> impl Iterator<Item = &Handler> {
        self.overrides.iter().chain(self.defaults.iter())
    }

    /// Handler currently answering the route `probe` is bound to.
    pub fn active_on_route(&self, probe: &Handler) -> Option<&Handler> {
        self.active_handlers().find(|h| h.same_route(probe))
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.defaults.is_empty()
    }

    /// Find the first handler matching `request`.
    ///
    /// Returns a copy of the handler together with the request with its path parameters filled in,
    /// so the caller can run it without holding on to the registry.
    pub fn resolve(&self, request: &MockRequest) -> Option<(Handler, MockRequest)> {
        self.active_handlers()
            .find_map(|handler| handler.matches(request).map(|matched| (handler.clone(), matched)))
    }
}
