//! MergeService: orchestrates sources and deserializes to AdviceConfig.

use super::sources;
use super::AdviceConfig;
use crate::types::GLOBAL_LABEL;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> workspace file -> environment (highest).
    pub fn load(workspace_root: &Path) -> Result<AdviceConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_workspace_file(builder, workspace_root)?;
        let builder = sources::add_environment(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<AdviceConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = sources::add_required_file(builder, path)?;
        let builder = sources::add_environment(builder)?;
        builder.build()?.try_deserialize()
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("subscriptions.broadcast_label", GLOBAL_LABEL)
}
