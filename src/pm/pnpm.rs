//! pnpm package manager

use super::PackageManager;
use crate::detection::plan::{InstallStrategy, PackageManagerKind};
use crate::lockfile::LockfileKind;

pub struct Pnpm;

impl PackageManager for Pnpm {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Pnpm
    }

    fn lockfiles(&self) -> &[LockfileKind] {
        &[LockfileKind::PnpmLock]
    }

    fn offline_cache_dir(&self) -> &'static str {
        ".pnpm-store"
    }

    fn install_command(&self, strategy: InstallStrategy) -> String {
        match strategy {
            InstallStrategy::CleanInstall => "pnpm install --frozen-lockfile".to_string(),
            InstallStrategy::Install => "pnpm install".to_string(),
            InstallStrategy::Rebuild => "pnpm rebuild".to_string(),
        }
    }

    fn start_command(&self) -> String {
        "pnpm start".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_commands() {
        assert_eq!(
            Pnpm.install_command(InstallStrategy::CleanInstall),
            "pnpm install --frozen-lockfile"
        );
        assert_eq!(Pnpm.install_command(InstallStrategy::Rebuild), "pnpm rebuild");
    }
}
