//! Error types for interceptor registries and the handlers they hold.
//!
//! Registry operations themselves never fail: registration always succeeds and
//! removing an unknown id is ignored. Errors in this module cover the two
//! places where failure is real:
//!
//! - **Handler failures**: [`InterceptError`] is the value that travels along a
//!   handler's rejected path, produced and consumed by the dispatch pipeline.
//! - **Configuration**: [`ConfigError`] for loading and validating registry
//!   configuration files.
//!
//! [`CoreError`] ties them together for APIs that can hit either.

use thiserror::Error;

/// The top-level error type for fallible `intercept-core` operations.
///
/// # Examples
///
/// ```rust
/// use intercept_core::error::{ConfigError, CoreError};
///
/// let error = CoreError::Config(ConfigError::MissingParameter {
///     parameter: "label".to_string(),
/// });
///
/// assert_eq!(error.category(), "config");
/// ```
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration errors (invalid files, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A handler failure surfaced outside of a pipeline
    #[error("Interceptor error: {0}")]
    Intercept(#[from] InterceptError),

    /// IO errors (config file operations)
    #[error("IO error: {source}")]
    Io {
        #[from]
        /// The underlying IO error
        source: std::io::Error,
    },
}

/// Failure value carried on the rejected path of an interceptor chain.
///
/// A handler's `rejected` transform receives one of these and may either
/// recover (returning `Ok`) or propagate it (returning `Err`).
#[derive(Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum InterceptError {
    /// A handler explicitly rejected the value it was given
    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    /// A handler failed while transforming a value
    #[error("Handler failed: {reason}")]
    Handler { reason: String },

    /// Generic errors for cases not covered by specific variants
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file has invalid format
    #[error("Invalid configuration format in {path}: {reason}")]
    InvalidFormat { path: String, reason: String },

    /// Required configuration parameter is missing
    #[error("Missing required configuration parameter: {parameter}")]
    MissingParameter { parameter: String },

    /// Configuration parameter has invalid value
    #[error("Invalid value for parameter '{parameter}': {value} - {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Result type returned by interceptor transforms.
pub type InterceptResult<T> = Result<T, InterceptError>;

/// Convenience type alias for Results using CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

impl InterceptError {
    /// Create a rejection with the given reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Create a handler failure with the given reason.
    pub fn handler(reason: impl Into<String>) -> Self {
        Self::Handler {
            reason: reason.into(),
        }
    }

    /// Create a new internal error with a custom message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the error category for this error.
    pub fn category(&self) -> &'static str {
        match self {
            InterceptError::Rejected { .. } => "rejected",
            InterceptError::Handler { .. } => "handler",
            InterceptError::Internal { .. } => "internal",
        }
    }
}

impl CoreError {
    /// Get the error category for this error.
    ///
    /// This is useful for error reporting and metrics collection.
    pub fn category(&self) -> &'static str {
        match self {
            CoreError::Config(_) => "config",
            CoreError::Intercept(err) => err.category(),
            CoreError::Io { .. } => "io",
        }
    }
}
