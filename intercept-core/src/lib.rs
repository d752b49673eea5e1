//! # Intercept Core Library
//!
//! `intercept-core` provides the interceptor registry an HTTP client pipeline
//! consults before sending a request and after receiving a response.
//!
//! The registry only stores handlers. Building and running the
//! request/response chain, ordering it, and deciding how `synchronous` and
//! `run_when` affect scheduling are left to the dispatch pipeline that
//! enumerates it.
//!
//! ## Features
//!
//! - **Stable ids**: a registration id is its slot position and is never reissued
//! - **Tombstoned removal**: removing a handler leaves every other id untouched
//! - **Ordered enumeration**: live handlers are visited in registration order
//! - **Shared access**: a tokio `RwLock` wrapper for concurrent callers
//! - **File configuration**: JSON, YAML and TOML registry configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use intercept_core::{Interceptors, InterceptorOptions};
//!
//! #[derive(Clone)]
//! struct Request {
//!     url: String,
//!     headers: Vec<(String, String)>,
//! }
//!
//! let mut interceptors: Interceptors<Request, u16, Request> = Interceptors::new();
//!
//! let auth = interceptors.request.register_fulfilled(
//!     |mut request: Request| {
//!         request.headers.push(("authorization".into(), "Bearer token".into()));
//!         Ok(request)
//!     },
//!     Some(InterceptorOptions::new().run_when(|request: &Request| request.url.starts_with("https://"))),
//! );
//!
//! let request = Request { url: "https://example.com".into(), headers: Vec::new() };
//! let mut outgoing = request.clone();
//! interceptors.request.for_each(|handler| {
//!     if handler.is_eligible(&request) {
//!         outgoing = handler.fulfill(outgoing.clone()).unwrap();
//!     }
//! });
//! assert_eq!(outgoing.headers.len(), 1);
//!
//! interceptors.request.remove(auth);
//! assert!(interceptors.request.is_empty());
//! ```
//!
//! ## Architecture
//!
//! - [`manager`]: the slot registry and its ids
//! - [`handler`]: registered handlers and their transforms
//! - [`options`]: per-registration options
//! - [`shared`]: concurrent registry handle
//! - [`interceptors`]: the request/response pair a client owns
//! - [`config`]: registry configuration
//! - [`error`]: error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
pub mod handler;
pub mod interceptors;
pub mod manager;
pub mod options;
pub mod shared;
mod slot;

// Re-export commonly used types for convenience
pub use config::{InterceptorsConfig, ManagerConfig};
pub use error::{ConfigError, CoreError, CoreResult, InterceptError, InterceptResult};
pub use handler::{Fulfilled, Handler, Rejected};
pub use interceptors::Interceptors;
pub use manager::{InterceptorId, InterceptorManager, RegistryStats};
pub use options::{InterceptorOptions, RunWhen};
pub use shared::SharedInterceptorManager;

/// Current version of the intercept-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
