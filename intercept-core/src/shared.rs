//! Registry handle for concurrent callers.
//!
//! [`SharedInterceptorManager`] wraps an [`InterceptorManager`] in an
//! `Arc<RwLock<_>>`. Registration and removal take the write lock, so every
//! position is handed out exactly once; enumeration shares the read lock.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ManagerConfig;
use crate::error::{ConfigError, InterceptError, InterceptResult};
use crate::handler::{Fulfilled, Handler, Rejected};
use crate::manager::{InterceptorId, InterceptorManager, RegistryStats};
use crate::options::InterceptorOptions;

/// Cloneable, task-safe handle to an interceptor registry.
pub struct SharedInterceptorManager<T, C> {
    inner: Arc<RwLock<InterceptorManager<T, C>>>,
}

impl<T, C> SharedInterceptorManager<T, C> {
    /// Create an empty shared registry with the default configuration.
    pub fn new() -> Self {
        Self::from_manager(InterceptorManager::new())
    }

    /// Create an empty shared registry with the given configuration.
    pub fn with_config(config: ManagerConfig) -> Self {
        Self::from_manager(InterceptorManager::with_config(config))
    }

    /// Create an empty shared registry after validating the configuration.
    pub fn try_with_config(config: ManagerConfig) -> Result<Self, ConfigError> {
        InterceptorManager::try_with_config(config).map(Self::from_manager)
    }

    /// Share an existing registry.
    pub fn from_manager(manager: InterceptorManager<T, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    /// Register a handler and return its id.
    pub async fn register(
        &self,
        fulfilled: Option<Fulfilled<T>>,
        rejected: Option<Rejected<T>>,
        options: Option<InterceptorOptions<C>>,
    ) -> InterceptorId {
        self.inner.write().await.register(fulfilled, rejected, options)
    }

    /// Register a pair of closures.
    pub async fn register_fn<F, R>(
        &self,
        fulfilled: F,
        rejected: R,
        options: Option<InterceptorOptions<C>>,
    ) -> InterceptorId
    where
        F: Fn(T) -> InterceptResult<T> + Send + Sync + 'static,
        R: Fn(InterceptError) -> InterceptResult<T> + Send + Sync + 'static,
    {
        self.inner
            .write()
            .await
            .register_fn(fulfilled, rejected, options)
    }

    /// Register a success-path closure with no failure-path transform.
    pub async fn register_fulfilled<F>(
        &self,
        fulfilled: F,
        options: Option<InterceptorOptions<C>>,
    ) -> InterceptorId
    where
        F: Fn(T) -> InterceptResult<T> + Send + Sync + 'static,
    {
        self.inner
            .write()
            .await
            .register_fulfilled(fulfilled, options)
    }

    /// Remove the handler registered under `id`; unknown ids are ignored.
    pub async fn remove(&self, id: impl Into<InterceptorId>) {
        self.inner.write().await.remove(id)
    }

    /// Visit every live handler in registration order under the read lock.
    pub async fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&Handler<T, C>),
    {
        self.inner.read().await.for_each(visit)
    }

    /// Clone the live handlers in registration order.
    ///
    /// Useful when the handlers have to be called across `.await` points
    /// without holding the lock.
    pub async fn snapshot(&self) -> Vec<Handler<T, C>> {
        self.inner.read().await.iter().cloned().collect()
    }

    /// Whether `id` currently refers to a live handler.
    pub async fn contains(&self, id: impl Into<InterceptorId>) -> bool {
        self.inner.read().await.contains(id)
    }

    /// Number of live handlers.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether there are no live handlers.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Remove every live handler without reissuing ids.
    pub async fn clear(&self) {
        self.inner.write().await.clear()
    }

    /// Get registry statistics.
    pub async fn stats(&self) -> RegistryStats {
        self.inner.read().await.stats()
    }
}

impl<T, C> Clone for SharedInterceptorManager<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, C> Default for SharedInterceptorManager<T, C> {
    fn default() -> Self {
        Self::new()
    }
}
