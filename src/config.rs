//! Configuration
//!
//! Layered configuration: built-in defaults, the global config file, the
//! workspace `advice.toml`, then `ADVICE__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;
pub mod xdg;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::resolver::ResolverOptions;
use crate::types::{Label, GLOBAL_LABEL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    pub logging: LoggingConfig,
    pub subscriptions: SubscriptionConfig,
    pub stores: StoreConfig,
}

/// Resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Label every agent is auto-subscribed to
    pub broadcast_label: String,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            broadcast_label: GLOBAL_LABEL.to_string(),
        }
    }
}

impl SubscriptionConfig {
    pub fn resolver_options(&self) -> Result<ResolverOptions, ApiError> {
        let label = Label::new(self.broadcast_label.clone()).map_err(|_| {
            ApiError::ConfigError("subscriptions.broadcast_label cannot be empty".to_string())
        })?;
        Ok(ResolverOptions::with_broadcast_label(label))
    }
}

/// Locations of the agent and advisory documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub agents_file: Option<PathBuf>,
    pub advisories_file: Option<PathBuf>,
}

impl StoreConfig {
    /// Configured agents file, or `$XDG_DATA_HOME/advice/agents.toml`
    pub fn resolve_agents_file(&self) -> Result<PathBuf, ApiError> {
        match &self.agents_file {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => Ok(xdg::advice_data_dir()?.join("agents.toml")),
        }
    }

    /// Configured advisories file, or `$XDG_DATA_HOME/advice/advisories.json`
    pub fn resolve_advisories_file(&self) -> Result<PathBuf, ApiError> {
        match &self.advisories_file {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => Ok(xdg::advice_data_dir()?.join("advisories.json")),
        }
    }
}
