//! nodeplan - build-plan detection for Node.js application directories
//!
//! This library classifies a project directory from its manifest and
//! lockfile artifacts and produces a [`BuildPlan`]: which package manager
//! is in use, whether dependencies are vendored, which workspace members
//! exist, whether native modules need compiling, and the target runtime
//! version constraint. External installer and runner collaborators consume
//! the plan; nothing here executes installs or starts processes.
//!
//! # Example
//!
//! ```no_run
//! use nodeplan::BuildPlanDetector;
//!
//! fn classify() -> Result<(), nodeplan::ClassificationError> {
//!     let detector = BuildPlanDetector::new("/path/to/app");
//!     let plan = detector.detect()?;
//!
//!     println!("package manager: {}", plan.package_manager);
//!     if let Some(command) = &plan.install_command {
//!         println!("install with: {}", command);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`detection`]: the classification pass and the plan types
//! - [`manifest`]: typed package.json parsing
//! - [`lockfile`]: lockfile discovery and resolution parsing
//! - [`pm`]: package manager definitions and command surfaces

pub mod cli;
pub mod config;
pub mod detection;
pub mod lockfile;
pub mod manifest;
pub mod pm;
pub mod util;

pub use config::DetectorConfig;
pub use detection::{
    detect, Advisory, BuildPlan, BuildPlanDetector, ClassificationError, InstallStrategy,
    PackageManagerKind, VersionSource,
};
pub use manifest::ProjectManifest;
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_nodeplan() {
        assert_eq!(NAME, "nodeplan");
    }
}
