//! Build plan detection
//!
//! A single synchronous pass over one project directory: find the
//! manifest, weigh the lockfile evidence, and classify. No state survives
//! the call and nothing is written to disk.

use super::context::DetectionContext;
use super::error::ClassificationError;
use super::native;
use super::plan::{Advisory, BuildPlan, InstallStrategy, PackageManagerKind};
use super::runtime;
use super::workspace;
use crate::config::DetectorConfig;
use crate::lockfile::LockfileEvidence;
use crate::manifest::{ManifestError, ProjectManifest};
use crate::pm::PackageManagerRegistry;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory npm-compatible tools install resolved dependencies into.
/// When populated it marks the project as vendored.
const MODULES_DIR: &str = "node_modules";

const SERVER_FALLBACK: &str = "server.js";

pub struct BuildPlanDetector {
    project_root: PathBuf,
    config: DetectorConfig,
    registry: PackageManagerRegistry,
}

impl BuildPlanDetector {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_config(project_root, DetectorConfig::default())
    }

    pub fn with_config(project_root: impl Into<PathBuf>, config: DetectorConfig) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            registry: PackageManagerRegistry::default(),
        }
    }

    /// Classifies the project directory into a build plan.
    ///
    /// Fatal conditions (missing root, malformed manifest or lockfile)
    /// surface as `ClassificationError`; everything recoverable lands in
    /// the plan's advisory list.
    pub fn detect(&self) -> Result<BuildPlan, ClassificationError> {
        let root = self.resolve_root()?;

        let manifest = match ProjectManifest::load(&root) {
            Ok(manifest) => manifest,
            Err(ManifestError::Missing(path)) => {
                info!(path = %path.display(), "No manifest found; not a Node project");
                return Ok(BuildPlan::none());
            }
            Err(err) => return Err(err.into()),
        };

        let lockfiles = LockfileEvidence::gather(&root)?;
        let mut ctx = DetectionContext::new(root.clone(), manifest, lockfiles);

        let package_manager = self.select_package_manager(&mut ctx);
        let vendored = ctx.dir_populated(MODULES_DIR);
        let workspaces = self.resolve_workspaces(&mut ctx, package_manager);
        let native_modules = native::requires_native_build(&ctx.manifest);
        let version = runtime::resolve(&root, &ctx.manifest, &mut ctx.advisories)?;

        let manager = self
            .registry
            .get(package_manager)
            .expect("selected kind is always registered");

        let offline_cached = ctx.dir_populated(manager.offline_cache_dir());
        let strategy =
            resolve_install_strategy(ctx.lockfiles.is_locked(), vendored, offline_cached);

        debug!(
            lockfile = ctx
                .lockfiles
                .selected
                .map(|kind| kind.filename())
                .unwrap_or("none"),
            node_modules = vendored,
            offline_cache = offline_cached,
            "Process inputs"
        );
        info!(
            package_manager = %package_manager,
            strategy = %strategy,
            "Selected install strategy"
        );

        let start_command = self.resolve_start_command(&ctx, package_manager);

        Ok(BuildPlan {
            package_manager,
            vendored,
            workspaces,
            native_modules,
            node_version: version.as_ref().map(|v| v.constraint.clone()),
            version_source: version.map(|v| v.source),
            install_strategy: Some(strategy),
            install_command: Some(manager.install_command(strategy)),
            start_command,
            advisories: std::mem::take(&mut ctx.advisories),
        })
    }

    fn resolve_root(&self) -> Result<PathBuf, ClassificationError> {
        if !self.project_root.exists() {
            return Err(ClassificationError::PathNotFound(self.project_root.clone()));
        }
        if !self.project_root.is_dir() {
            return Err(ClassificationError::NotADirectory(self.project_root.clone()));
        }

        match &self.config.project_path {
            Some(relative) => {
                let root = self.project_root.join(relative);
                if !root.is_dir() {
                    return Err(ClassificationError::ProjectPathNotFound(relative.clone()));
                }
                Ok(root)
            }
            None => Ok(self.project_root.clone()),
        }
    }

    /// Picks the package manager: a well-formed corepack pin wins,
    /// otherwise the lockfile precedence order applies, otherwise npm.
    fn select_package_manager(&self, ctx: &mut DetectionContext) -> PackageManagerKind {
        let from_lockfile = ctx.lockfiles.selected.map(|kind| kind.package_manager());

        if let Some(pin) = ctx.manifest.package_manager.clone() {
            if let Some(pinned) = self.registry.from_corepack_pin(&pin) {
                if let Some(lockfile_kind) = from_lockfile {
                    if lockfile_kind != pinned {
                        ctx.advise(Advisory::AmbiguousPackageManager {
                            chosen: pinned,
                            ignored: vec![lockfile_kind],
                        });
                    }
                }
                return pinned;
            }
            debug!(pin = %pin, "Unrecognized packageManager pin; falling back to lockfiles");
        }

        let chosen = from_lockfile.unwrap_or(PackageManagerKind::Npm);

        let mut ignored: Vec<PackageManagerKind> = ctx
            .lockfiles
            .runners_up()
            .iter()
            .map(|kind| kind.package_manager())
            .filter(|kind| *kind != chosen)
            .collect();
        // Shrinkwrap and package-lock both map to npm; report it once.
        ignored.dedup();
        if !ignored.is_empty() {
            ctx.advise(Advisory::AmbiguousPackageManager { chosen, ignored });
        }

        chosen
    }

    fn resolve_workspaces(
        &self,
        ctx: &mut DetectionContext,
        package_manager: PackageManagerKind,
    ) -> Vec<PathBuf> {
        let mut patterns: Vec<String> = ctx.manifest.workspace_patterns().to_vec();
        if package_manager == PackageManagerKind::Pnpm {
            patterns.extend(workspace::pnpm_workspace_patterns(ctx.root()));
        }

        if patterns.is_empty() {
            return Vec::new();
        }

        if !ctx.lockfiles.is_locked() {
            ctx.advise(Advisory::WorkspacesWithoutLockfile);
            return Vec::new();
        }

        let mut advisories = Vec::new();
        let members = workspace::resolve_members(ctx.root(), &patterns, &mut advisories);
        for advisory in advisories {
            ctx.advise(advisory);
        }
        members
    }

    fn resolve_start_command(
        &self,
        ctx: &DetectionContext,
        package_manager: PackageManagerKind,
    ) -> Option<String> {
        if ctx.manifest.script("start").is_some() {
            return self
                .registry
                .get(package_manager)
                .map(|manager| manager.start_command());
        }
        if let Some(main) = &ctx.manifest.main {
            return Some(format!("node {main}"));
        }
        if ctx.root().join(SERVER_FALLBACK).is_file() {
            return Some(format!("node {SERVER_FALLBACK}"));
        }
        None
    }
}

/// Install strategy from the lockfile/vendored/offline-cache matrix:
/// vendored modules without a usable lockfile (or without a cache to
/// restore from) are rebuilt in place, an unlocked project installs from
/// the manifest, and everything else gets a reproducible clean install.
fn resolve_install_strategy(locked: bool, vendored: bool, cached: bool) -> InstallStrategy {
    match (locked, vendored, cached) {
        (false, true, _) | (true, true, false) => InstallStrategy::Rebuild,
        (false, false, _) => InstallStrategy::Install,
        _ => InstallStrategy::CleanInstall,
    }
}

/// Convenience wrapper classifying `project_root` with defaults.
pub fn detect(project_root: impl AsRef<Path>) -> Result<BuildPlan, ClassificationError> {
    BuildPlanDetector::new(project_root.as_ref()).detect()
}
