//! Request/response registry pair.
//!
//! An HTTP client owns one registry for outgoing requests and one for incoming
//! responses and hands both to its dispatch pipeline.

use crate::config::InterceptorsConfig;
use crate::error::ConfigError;
use crate::manager::InterceptorManager;

/// The `request` and `response` registries of a single client.
///
/// `Req` and `Resp` are the values the two sides transform; `C` is the request
/// configuration their `run_when` predicates see.
#[derive(Debug)]
pub struct Interceptors<Req, Resp, C> {
    /// Handlers applied before a request is sent
    pub request: InterceptorManager<Req, C>,
    /// Handlers applied after a response is received
    pub response: InterceptorManager<Resp, C>,
}

impl<Req, Resp, C> Interceptors<Req, Resp, C> {
    /// Create both registries with default labels.
    pub fn new() -> Self {
        Self::with_config(InterceptorsConfig::default())
    }

    /// Create both registries from a configuration.
    pub fn with_config(config: InterceptorsConfig) -> Self {
        Self {
            request: InterceptorManager::with_config(config.request),
            response: InterceptorManager::with_config(config.response),
        }
    }

    /// Create both registries after validating the configuration.
    pub fn try_with_config(config: InterceptorsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Total live handlers across both sides.
    pub fn len(&self) -> usize {
        self.request.len() + self.response.len()
    }

    /// Whether neither side has live handlers.
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty()
    }
}

impl<Req, Resp, C> Default for Interceptors<Req, Resp, C> {
    fn default() -> Self {
        Self::new()
    }
}
