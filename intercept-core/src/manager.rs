//! The interceptor registry.
//!
//! [`InterceptorManager`] is an append-only sequence of slots. Registration
//! appends a slot and returns its position as the handler's id; removal turns
//! the slot into a tombstone without shifting anything after it. Because slots
//! are never compacted, an id keeps pointing at the handler it was issued for,
//! or at nothing once that handler is removed. It is never reissued.
//!
//! # Examples
//!
//! ```rust
//! use intercept_core::{InterceptorManager, InterceptorOptions};
//!
//! let mut manager: InterceptorManager<String, ()> = InterceptorManager::new();
//!
//! let trim = manager.register_fulfilled(|url: String| Ok(url.trim().to_string()), None);
//! let upper = manager.register_fulfilled(
//!     |url: String| Ok(url.to_uppercase()),
//!     Some(InterceptorOptions::new().synchronous(true)),
//! );
//! assert_eq!((trim.index(), upper.index()), (0, 1));
//!
//! manager.remove(trim);
//!
//! let mut synchronous = Vec::new();
//! manager.for_each(|handler| synchronous.push(handler.synchronous()));
//! assert_eq!(synchronous, vec![true]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::{ManagerConfig, MAX_INITIAL_CAPACITY};
use crate::error::{ConfigError, InterceptError, InterceptResult};
use crate::handler::{Fulfilled, Handler, Rejected};
use crate::options::InterceptorOptions;
use crate::slot::{occupied, Slot};

/// Stable identifier of a registration: the zero-based slot position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterceptorId(usize);

impl InterceptorId {
    /// The slot position this id refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for InterceptorId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<InterceptorId> for usize {
    fn from(id: InterceptorId) -> Self {
        id.0
    }
}

impl fmt::Display for InterceptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Statistics for an interceptor registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Slots ever created, live or tombstoned
    pub total_registered: usize,
    /// Live slots turned into tombstones
    pub total_removed: usize,
    /// Handlers currently live
    pub live: usize,
    /// Last time a registration or removal changed the registry
    pub last_modified: Option<DateTime<Utc>>,
}

/// Ordered registry of interceptor handlers with stable ids.
///
/// `T` is the value the handlers transform and `C` the request configuration
/// their `run_when` predicates inspect.
pub struct InterceptorManager<T, C> {
    slots: Vec<Slot<T, C>>,
    config: ManagerConfig,
    removed: usize,
    last_modified: Option<DateTime<Utc>>,
}

impl<T, C> InterceptorManager<T, C> {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Create an empty registry with the given configuration.
    ///
    /// The configuration is not validated; preallocation is capped at
    /// [`MAX_INITIAL_CAPACITY`] slots. Use [`try_with_config`](Self::try_with_config)
    /// to reject invalid configurations instead.
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity.min(MAX_INITIAL_CAPACITY)),
            config,
            removed: 0,
            last_modified: None,
        }
    }

    /// Create an empty registry after validating the configuration.
    pub fn try_with_config(config: ManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The label attached to this registry's log events.
    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Register a handler and return its id.
    ///
    /// Either transform may be absent. Missing `options` means
    /// `synchronous = false` and no `run_when` predicate. Never fails; the
    /// returned id equals the number of registrations made before this one.
    pub fn register(
        &mut self,
        fulfilled: Option<Fulfilled<T>>,
        rejected: Option<Rejected<T>>,
        options: Option<InterceptorOptions<C>>,
    ) -> InterceptorId {
        let handler = Handler::new(fulfilled, rejected, options);
        let id = InterceptorId(self.slots.len());

        debug!(
            label = %self.config.label,
            id = %id,
            synchronous = handler.synchronous(),
            conditional = handler.run_when().is_some(),
            "registered interceptor"
        );

        self.slots.push(Slot::Occupied(handler));
        self.last_modified = Some(Utc::now());
        id
    }

    /// Register a pair of closures.
    pub fn register_fn<F, R>(
        &mut self,
        fulfilled: F,
        rejected: R,
        options: Option<InterceptorOptions<C>>,
    ) -> InterceptorId
    where
        F: Fn(T) -> InterceptResult<T> + Send + Sync + 'static,
        R: Fn(InterceptError) -> InterceptResult<T> + Send + Sync + 'static,
    {
        self.register(Some(Arc::new(fulfilled)), Some(Arc::new(rejected)), options)
    }

    /// Register a success-path closure with no failure-path transform.
    pub fn register_fulfilled<F>(
        &mut self,
        fulfilled: F,
        options: Option<InterceptorOptions<C>>,
    ) -> InterceptorId
    where
        F: Fn(T) -> InterceptResult<T> + Send + Sync + 'static,
    {
        self.register(Some(Arc::new(fulfilled)), None, options)
    }

    /// Remove the handler registered under `id`.
    ///
    /// The slot becomes a tombstone and the handler is dropped. Ids that were
    /// never issued or are already removed are ignored, so calling this twice
    /// is the same as calling it once.
    pub fn remove(&mut self, id: impl Into<InterceptorId>) {
        let id = id.into();
        let released = self.slots.get_mut(id.0).and_then(Slot::vacate);

        match released {
            Some(handler) => {
                self.removed += 1;
                self.last_modified = Some(Utc::now());
                debug!(label = %self.config.label, id = %id, "removed interceptor");
                drop(handler);
            }
            None => {
                debug!(label = %self.config.label, id = %id, "ignored removal of inactive interceptor id");
            }
        }
    }

    /// Visit every live handler in registration order.
    ///
    /// Tombstones are skipped and the visitor is given no ids or positions.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Handler<T, C>),
    {
        if self.config.trace_enumeration {
            trace!(
                label = %self.config.label,
                live = self.len(),
                slots = self.slots.len(),
                "enumerating interceptors"
            );
        }

        for handler in occupied(&self.slots) {
            visit(handler);
        }
    }

    /// Iterate live handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Handler<T, C>> + '_ {
        occupied(&self.slots)
    }

    /// Number of live handlers.
    pub fn len(&self) -> usize {
        self.slots.len() - self.removed
    }

    /// Whether there are no live handlers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ids ever issued; also the id the next registration gets.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether `id` currently refers to a live handler.
    pub fn contains(&self, id: impl Into<InterceptorId>) -> bool {
        self.slots
            .get(id.into().0)
            .is_some_and(Slot::is_occupied)
    }

    /// Remove every live handler.
    ///
    /// Slots stay in place as tombstones, so ids issued before the call are
    /// never handed out again.
    pub fn clear(&mut self) {
        let released = self
            .slots
            .iter_mut()
            .filter_map(Slot::vacate)
            .count();

        if released > 0 {
            self.removed += released;
            self.last_modified = Some(Utc::now());
        }

        debug!(label = %self.config.label, released, "cleared interceptors");
    }

    /// Snapshot of registry statistics.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_registered: self.slots.len(),
            total_removed: self.removed,
            live: self.len(),
            last_modified: self.last_modified,
        }
    }
}

impl<T, C> Default for InterceptorManager<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for InterceptorManager<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorManager")
            .field("label", &self.config.label)
            .field("live", &self.len())
            .field("slots", &self.slots.len())
            .finish()
    }
}
