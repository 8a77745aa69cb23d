//! yarn package manager

use super::PackageManager;
use crate::detection::plan::{InstallStrategy, PackageManagerKind};
use crate::lockfile::LockfileKind;

pub struct Yarn;

impl PackageManager for Yarn {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Yarn
    }

    fn lockfiles(&self) -> &[LockfileKind] {
        &[LockfileKind::YarnLock]
    }

    fn offline_cache_dir(&self) -> &'static str {
        ".yarn/cache"
    }

    fn install_command(&self, strategy: InstallStrategy) -> String {
        match strategy {
            InstallStrategy::CleanInstall => "yarn install --frozen-lockfile".to_string(),
            InstallStrategy::Install => "yarn install".to_string(),
            InstallStrategy::Rebuild => "yarn install --check-files".to_string(),
        }
    }

    fn start_command(&self) -> String {
        "yarn start".to_string()
    }
}
