//! Package manager definitions
//!
//! Package managers are first-class entities mirroring how the detection
//! pass reasons about them: each declares the lockfiles it writes, the
//! directories it vendors or caches into, and the command surface the
//! external installer and runner collaborators consume.

use crate::detection::plan::{InstallStrategy, PackageManagerKind};
use crate::lockfile::LockfileKind;

pub mod npm;
pub mod pnpm;
pub mod yarn;

pub use npm::Npm;
pub use pnpm::Pnpm;
pub use yarn::Yarn;

/// Package manager trait
pub trait PackageManager: Send + Sync {
    fn kind(&self) -> PackageManagerKind;

    /// Lockfile artifacts this manager writes.
    fn lockfiles(&self) -> &[LockfileKind];

    /// Directory holding an offline copy of fetched artifacts, checked in
    /// next to the manifest (npm's `npm-cache` convention and friends).
    fn offline_cache_dir(&self) -> &'static str;

    /// Install command for the chosen strategy.
    fn install_command(&self, strategy: InstallStrategy) -> String;

    /// Start command running the manifest's `start` script.
    fn start_command(&self) -> String;
}

/// Registry of the supported package managers.
pub struct PackageManagerRegistry {
    managers: Vec<Box<dyn PackageManager>>,
}

impl Default for PackageManagerRegistry {
    fn default() -> Self {
        Self {
            managers: vec![Box::new(Npm), Box::new(Yarn), Box::new(Pnpm)],
        }
    }
}

impl PackageManagerRegistry {
    pub fn get(&self, kind: PackageManagerKind) -> Option<&dyn PackageManager> {
        self.managers
            .iter()
            .find(|manager| manager.kind() == kind)
            .map(|manager| manager.as_ref())
    }

    /// Resolves a corepack `packageManager` pin such as `pnpm@8.6.12`.
    /// The version suffix is ignored; only the tool name matters for
    /// classification.
    pub fn from_corepack_pin(&self, pin: &str) -> Option<PackageManagerKind> {
        let name = pin.split('@').next()?.trim();
        self.managers
            .iter()
            .map(|manager| manager.kind())
            .find(|kind| kind.name() == name)
    }
}
