//! Registered interceptor handlers.
//!
//! A [`Handler`] pairs a success-path transform with a failure-path transform
//! and carries the metadata a dispatch pipeline needs to schedule it. The
//! registry only stores handlers; deciding when to call them is up to the
//! pipeline.

use std::fmt;
use std::sync::Arc;

use crate::error::{InterceptError, InterceptResult};
use crate::options::{InterceptorOptions, RunWhen};

/// Transform applied on the success path.
pub type Fulfilled<T> = Arc<dyn Fn(T) -> InterceptResult<T> + Send + Sync>;

/// Transform applied on the failure path.
pub type Rejected<T> = Arc<dyn Fn(InterceptError) -> InterceptResult<T> + Send + Sync>;

/// A registered interceptor.
///
/// `T` is the value flowing through the chain (a request config or a response)
/// and `C` is the request configuration that `run_when` inspects.
pub struct Handler<T, C> {
    fulfilled: Option<Fulfilled<T>>,
    rejected: Option<Rejected<T>>,
    synchronous: bool,
    run_when: Option<RunWhen<C>>,
}

impl<T, C> Handler<T, C> {
    /// Build a handler, applying option defaults.
    pub fn new(
        fulfilled: Option<Fulfilled<T>>,
        rejected: Option<Rejected<T>>,
        options: Option<InterceptorOptions<C>>,
    ) -> Self {
        let options = options.unwrap_or_default();
        Self {
            fulfilled,
            rejected,
            synchronous: options.synchronous,
            run_when: options.run_when,
        }
    }

    /// Whether the pipeline may run this handler without an async boundary.
    pub fn synchronous(&self) -> bool {
        self.synchronous
    }

    /// The eligibility predicate, if any.
    pub fn run_when(&self) -> Option<&RunWhen<C>> {
        self.run_when.as_ref()
    }

    /// The success-path transform, if any.
    pub fn fulfilled(&self) -> Option<&Fulfilled<T>> {
        self.fulfilled.as_ref()
    }

    /// The failure-path transform, if any.
    pub fn rejected(&self) -> Option<&Rejected<T>> {
        self.rejected.as_ref()
    }

    /// Whether a success-path transform is present.
    pub fn has_fulfilled(&self) -> bool {
        self.fulfilled.is_some()
    }

    /// Whether a failure-path transform is present.
    pub fn has_rejected(&self) -> bool {
        self.rejected.is_some()
    }

    /// Apply the success-path transform; a missing transform passes `value` through.
    pub fn fulfill(&self, value: T) -> InterceptResult<T> {
        match &self.fulfilled {
            Some(fulfilled) => fulfilled(value),
            None => Ok(value),
        }
    }

    /// Apply the failure-path transform; a missing transform re-raises `error`.
    pub fn reject(&self, error: InterceptError) -> InterceptResult<T> {
        match &self.rejected {
            Some(rejected) => rejected(error),
            None => Err(error),
        }
    }

    /// Evaluate `run_when` against a request config. No predicate means eligible.
    pub fn is_eligible(&self, config: &C) -> bool {
        self.run_when
            .as_ref()
            .map_or(true, |predicate| predicate(config))
    }
}

impl<T, C> Clone for Handler<T, C> {
    fn clone(&self) -> Self {
        Self {
            fulfilled: self.fulfilled.clone(),
            rejected: self.rejected.clone(),
            synchronous: self.synchronous,
            run_when: self.run_when.clone(),
        }
    }
}

impl<T, C> fmt::Debug for Handler<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("fulfilled", &self.has_fulfilled())
            .field("rejected", &self.has_rejected())
            .field("synchronous", &self.synchronous)
            .field("run_when", &self.run_when.is_some())
            .finish()
    }
}
