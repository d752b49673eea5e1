//! Registry configuration.
//!
//! Configurations can be created programmatically or loaded from JSON, YAML or
//! TOML files, chosen by file extension.
//!
//! # Examples
//!
//! ```rust
//! use intercept_core::config::{InterceptorsConfig, ManagerConfig};
//!
//! let config = InterceptorsConfig {
//!     request: ManagerConfig::labeled("outbound"),
//!     response: ManagerConfig::labeled("inbound").with_capacity(8),
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{ConfigError, CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for `initial_capacity`, to catch unit mistakes in config files.
pub const MAX_INITIAL_CAPACITY: usize = 4096;

/// Configuration for a single [`InterceptorManager`](crate::InterceptorManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Name attached to every log event emitted by the manager
    pub label: String,

    /// Emit a trace event for every enumeration pass
    pub trace_enumeration: bool,

    /// Number of slots to preallocate
    pub initial_capacity: usize,
}

impl ManagerConfig {
    /// Create a default configuration with the given label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the number of preallocated slots.
    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enable or disable per-enumeration trace events.
    pub fn with_trace_enumeration(mut self, enabled: bool) -> Self {
        self.trace_enumeration = enabled;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::MissingParameter {
                parameter: "label".to_string(),
            });
        }

        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidValue {
                parameter: "initial_capacity".to_string(),
                value: self.initial_capacity.to_string(),
                reason: format!("must not exceed {}", MAX_INITIAL_CAPACITY),
            });
        }

        Ok(())
    }

    /// Load a configuration from a `.json`, `.yaml`/`.yml` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let config: Self = read_config(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a file, format chosen by extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        write_config(self, path.as_ref())
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            label: "interceptors".to_string(),
            trace_enumeration: false,
            initial_capacity: 0,
        }
    }
}

/// Configuration for a request/response pair of managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorsConfig {
    /// Request-side manager
    pub request: ManagerConfig,

    /// Response-side manager
    pub response: ManagerConfig,
}

impl InterceptorsConfig {
    /// Validate both sides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.request.validate()?;
        self.response.validate()
    }

    /// Load a configuration from a `.json`, `.yaml`/`.yml` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let config: Self = read_config(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a file, format chosen by extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        write_config(self, path.as_ref())
    }
}

impl Default for InterceptorsConfig {
    fn default() -> Self {
        Self {
            request: ManagerConfig::labeled("request"),
            response: ManagerConfig::labeled("response"),
        }
    }
}

fn unsupported_format(path: &Path) -> ConfigError {
    ConfigError::InvalidFormat {
        path: path.display().to_string(),
        reason: "Unsupported file format. Use .json, .yaml, or .toml".to_string(),
    }
}

fn read_config<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::from(ConfigError::FileNotFound {
            path: path.display().to_string(),
        }),
        _ => CoreError::from(e),
    })?;

    let invalid = |reason: String| ConfigError::InvalidFormat {
        path: path.display().to_string(),
        reason,
    };

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?
        }
        Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        _ => return Err(unsupported_format(path).into()),
    };

    Ok(config)
}

fn write_config<T: Serialize>(config: &T, path: &Path) -> CoreResult<()> {
    let invalid = |reason: String| ConfigError::InvalidFormat {
        path: path.display().to_string(),
        reason,
    };

    let content = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            serde_json::to_string_pretty(config).map_err(|e| invalid(e.to_string()))?
        }
        Some("yaml") | Some("yml") => {
            serde_yaml::to_string(config).map_err(|e| invalid(e.to_string()))?
        }
        Some("toml") => toml::to_string(config).map_err(|e| invalid(e.to_string()))?,
        _ => return Err(unsupported_format(path).into()),
    };

    std::fs::write(path, content)?;

    Ok(())
}
