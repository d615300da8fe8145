//! # Errors
//!
//! This module defines the error types surfaced by relation traversal, the
//! transport seam and configuration loading. Every relation operation reports
//! failure through the same `Result` its success value travels in.

use http::StatusCode;

/// Errors raised by relation operations on a [`Resource`](crate::Resource).
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    /// The relation name is absent from a hydrated resource's link map.
    #[error("Link not found: {relation}")]
    LinkNotFound { relation: String },

    /// A mutation was attempted on a resource that was never hydrated.
    #[error("no relation found")]
    NoRelationBound,

    /// The resource passed to a mutation has no `self` link to bind by.
    #[error("Resource has no self link")]
    SelfLinkMissing,

    /// The response body could not be turned into the requested type.
    #[error("Hydration error: {0}")]
    Hydration(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures reported by a [`Transport`](crate::Transport).
///
/// These are passed through untouched; status codes are not interpreted here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Server responded with {status}")]
    Status { status: StatusCode, body: String },

    #[error("Connection error: {0}")]
    Connection(Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors from loading a [`HalConfig`](crate::HalConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}
