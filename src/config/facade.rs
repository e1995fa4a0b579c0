//! ConfigLoader facade delegating to merge service.

use super::merge::MergeService;
use super::AdviceConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<AdviceConfig, ApiError> {
        Ok(MergeService::load(workspace_root)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<AdviceConfig, ApiError> {
        Ok(MergeService::load_from_file(path)?)
    }
}
