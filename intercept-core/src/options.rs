//! Per-registration interceptor options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a handler applies to a given request config.
pub type RunWhen<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Options accepted by [`InterceptorManager::register`](crate::InterceptorManager::register).
///
/// Defaults are `synchronous = false` and no `run_when` predicate, meaning the
/// handler is always eligible. Only `synchronous` takes part in serialization;
/// predicates have to be attached in code.
///
/// # Examples
///
/// ```rust
/// use intercept_core::InterceptorOptions;
///
/// struct RequestConfig {
///     method: String,
/// }
///
/// let options = InterceptorOptions::<RequestConfig>::new()
///     .synchronous(true)
///     .run_when(|config: &RequestConfig| config.method == "GET");
///
/// assert!(options.is_synchronous());
/// assert!(options.has_run_when());
/// ```
#[derive(Serialize, Deserialize)]
#[serde(bound = "", default)]
pub struct InterceptorOptions<C> {
    /// Whether the pipeline may run the handler without an async boundary
    pub synchronous: bool,

    /// Optional eligibility predicate
    #[serde(skip)]
    pub run_when: Option<RunWhen<C>>,
}

impl<C> InterceptorOptions<C> {
    /// Create options with default values.
    pub fn new() -> Self {
        Self {
            synchronous: false,
            run_when: None,
        }
    }

    /// Set the `synchronous` flag.
    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    /// Attach a `run_when` predicate.
    pub fn run_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.run_when = Some(Arc::new(predicate));
        self
    }

    /// Whether the `synchronous` flag is set.
    pub fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// Whether a `run_when` predicate is attached.
    pub fn has_run_when(&self) -> bool {
        self.run_when.is_some()
    }
}

impl<C> Default for InterceptorOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InterceptorOptions<C> {
    fn clone(&self) -> Self {
        Self {
            synchronous: self.synchronous,
            run_when: self.run_when.clone(),
        }
    }
}

impl<C> fmt::Debug for InterceptorOptions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorOptions")
            .field("synchronous", &self.synchronous)
            .field("run_when", &self.run_when.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}
