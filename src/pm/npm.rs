//! npm package manager

use super::PackageManager;
use crate::detection::plan::{InstallStrategy, PackageManagerKind};
use crate::lockfile::LockfileKind;

pub struct Npm;

impl PackageManager for Npm {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Npm
    }

    fn lockfiles(&self) -> &[LockfileKind] {
        &[LockfileKind::NpmShrinkwrap, LockfileKind::NpmPackageLock]
    }

    fn offline_cache_dir(&self) -> &'static str {
        "npm-cache"
    }

    fn install_command(&self, strategy: InstallStrategy) -> String {
        match strategy {
            InstallStrategy::CleanInstall => "npm ci".to_string(),
            InstallStrategy::Install => "npm install".to_string(),
            InstallStrategy::Rebuild => "npm rebuild".to_string(),
        }
    }

    fn start_command(&self) -> String {
        "npm start".to_string()
    }
}
