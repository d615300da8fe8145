//! Client configuration.
//!
//! Configuration can be loaded from:
//! - A TOML configuration file (`hal.toml` in the working directory by default)
//! - Environment variables (`HAL_ROOT_URL`, `HAL_PROXY_URL`) for the URL defaults

use crate::error::ConfigError;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Media type requested on every call unless overridden.
pub const HAL_JSON: &str = "application/hal+json";

/// How to reach the HAL API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalConfig {
    /// Root the server reports in its links.
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// Base URL requests are sent to instead of `root_url`. Empty disables rewriting.
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// Headers sent with every request.
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_root_url() -> String {
    std::env::var("HAL_ROOT_URL").unwrap_or_default()
}

fn default_proxy_url() -> String {
    std::env::var("HAL_PROXY_URL").unwrap_or_default()
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Accept".to_string(), HAL_JSON.to_string())])
}

fn default_request_timeout() -> u64 {
    30_000 // 30 seconds
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            proxy_url: default_proxy_url(),
            headers: default_headers(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl HalConfig {
    pub fn new(root_url: impl Into<String>, proxy_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            proxy_url: proxy_url.into(),
            ..Self::default()
        }
    }

    /// Load `hal.toml` from the working directory, or fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new("hal.toml");
        if path.exists() {
            return Self::from_file(path);
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The configured headers as a `HeaderMap`.
    ///
    /// # Errors
    ///
    /// Returns an error if a name or value is not a valid HTTP header.
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            map.append(key, value);
        }
        Ok(map)
    }
}
