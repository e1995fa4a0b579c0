//! Error types
//!
//! Fallible operations (configuration, store adapters, label construction)
//! return these. Subscription resolution itself never fails; its degraded
//! outcomes are reported as [`ResolutionNotice`] values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the agent and advisory store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Invalid agent identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Non-fatal condition encountered while resolving an agent's subscriptions.
///
/// Each variant maps to a recovery the resolver already applied; hosts may
/// surface them as informational output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionNotice {
    /// No record exists for the agent; only identity-derived labels were used.
    #[error("agent not found; using identity-derived subscriptions only")]
    AgentNotFound,

    /// The record was found but some fields could not be read and were treated as empty.
    #[error("malformed subscription fields treated as empty: {}", .0.join(", "))]
    MalformedFields(Vec<String>),

    /// The store could not be queried; only identity-derived labels were used.
    #[error("agent lookup failed ({0}); using identity-derived subscriptions only")]
    LookupFailed(String),
}
