//! Configuration for the detector
//!
//! Settings are loaded from environment variables with sensible defaults;
//! the CLI layers its flags on top.
//!
//! # Environment Variables
//!
//! - `NODEPLAN_PROJECT_PATH`: subdirectory of the submitted root to
//!   classify instead of the root itself (must exist)
//! - `NODEPLAN_LOG_LEVEL`: logging level - default: "info"
//! - `NODEPLAN_LOG_JSON`: JSON log output (true|false) - default: "false"

use std::env;
use std::path::PathBuf;

pub const PROJECT_PATH_VAR: &str = "NODEPLAN_PROJECT_PATH";

/// Detector settings for one invocation.
#[derive(Debug, Clone, Default)]
pub struct DetectorConfig {
    /// Project subdirectory to classify, relative to the submitted root.
    /// Validated during detection; a missing directory is fatal.
    pub project_path: Option<PathBuf>,
}

impl DetectorConfig {
    /// Loads configuration from the environment.
    pub fn from_env() -> Self {
        let project_path = env::var(PROJECT_PATH_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self { project_path }
    }

    pub fn with_project_path(mut self, project_path: Option<PathBuf>) -> Self {
        if project_path.is_some() {
            self.project_path = project_path;
        }
        self
    }
}
