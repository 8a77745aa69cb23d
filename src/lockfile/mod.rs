//! Lockfile discovery and resolution parsing
//!
//! Each supported lockfile format maps to the package manager that writes
//! it. When several lockfiles coexist the precedence order below decides
//! the winner: the more tool-specific artifact outranks the generic one,
//! and a published shrinkwrap outranks the per-checkout package-lock.

use crate::detection::plan::PackageManagerKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod npm;
pub mod pnpm;
pub mod yarn;

#[derive(Debug, Error)]
pub enum LockfileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Known lockfile artifacts, ordered by detection precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockfileKind {
    PnpmLock,
    YarnLock,
    NpmShrinkwrap,
    NpmPackageLock,
}

impl LockfileKind {
    /// All kinds in precedence order, highest first.
    pub const PRECEDENCE: [LockfileKind; 4] = [
        LockfileKind::PnpmLock,
        LockfileKind::YarnLock,
        LockfileKind::NpmShrinkwrap,
        LockfileKind::NpmPackageLock,
    ];

    pub fn filename(&self) -> &'static str {
        match self {
            LockfileKind::PnpmLock => "pnpm-lock.yaml",
            LockfileKind::YarnLock => "yarn.lock",
            LockfileKind::NpmShrinkwrap => "npm-shrinkwrap.json",
            LockfileKind::NpmPackageLock => "package-lock.json",
        }
    }

    pub fn package_manager(&self) -> PackageManagerKind {
        match self {
            LockfileKind::PnpmLock => PackageManagerKind::Pnpm,
            LockfileKind::YarnLock => PackageManagerKind::Yarn,
            LockfileKind::NpmShrinkwrap | LockfileKind::NpmPackageLock => PackageManagerKind::Npm,
        }
    }
}

/// One pinned entry from a lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub version: String,
    /// True when the resolution points at a directory checked into the
    /// tree (`link: true` in npm lockfiles) rather than a fetched tarball.
    pub linked: bool,
}

/// Everything the detection pass learns from lockfiles. Owned by the
/// per-call context and dropped once the plan is built.
#[derive(Debug, Default)]
pub struct LockfileEvidence {
    pub present: Vec<LockfileKind>,
    pub selected: Option<LockfileKind>,
    pub entries: BTreeMap<String, ResolvedDependency>,
}

impl LockfileEvidence {
    /// Scans `project_root` for known lockfiles and parses the precedence
    /// winner's resolution entries.
    pub fn gather(project_root: &Path) -> Result<Self, LockfileError> {
        let present: Vec<LockfileKind> = LockfileKind::PRECEDENCE
            .iter()
            .copied()
            .filter(|kind| project_root.join(kind.filename()).is_file())
            .collect();

        let selected = present.first().copied();
        let entries = match selected {
            Some(kind) => parse_entries(project_root, kind)?,
            None => BTreeMap::new(),
        };

        if let Some(kind) = selected {
            debug!(
                lockfile = kind.filename(),
                entries = entries.len(),
                "Parsed lockfile resolutions"
            );
        }

        Ok(Self {
            present,
            selected,
            entries,
        })
    }

    pub fn is_locked(&self) -> bool {
        self.selected.is_some()
    }

    /// Lockfile kinds losing the precedence tie-break, if any.
    pub fn runners_up(&self) -> Vec<LockfileKind> {
        self.present.iter().skip(1).copied().collect()
    }

    pub fn resolved_version(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|entry| entry.version.as_str())
    }
}

fn parse_entries(
    project_root: &Path,
    kind: LockfileKind,
) -> Result<BTreeMap<String, ResolvedDependency>, LockfileError> {
    let path = project_root.join(kind.filename());
    let content = std::fs::read_to_string(&path).map_err(|source| LockfileError::Read {
        path: path.clone(),
        source,
    })?;

    match kind {
        LockfileKind::NpmPackageLock | LockfileKind::NpmShrinkwrap => {
            npm::parse(&content, &path)
        }
        LockfileKind::YarnLock => Ok(yarn::parse(&content)),
        LockfileKind::PnpmLock => pnpm::parse(&content, &path),
    }
}
