//! Build plan types
//!
//! The plan is the classifier's only output: an immutable, serializable
//! value handed to the external installer and runner collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Package manager driving dependency installation. `None` marks a
/// directory that is not a Node project at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    None,
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManagerKind {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManagerKind::None => "none",
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the installer should materialize dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallStrategy {
    /// Reproducible install driven entirely by the lockfile.
    CleanInstall,
    /// Plain install resolving from the manifest.
    Install,
    /// Recompile vendored modules already present in the tree.
    Rebuild,
}

impl fmt::Display for InstallStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStrategy::CleanInstall => "clean-install",
            InstallStrategy::Install => "install",
            InstallStrategy::Rebuild => "rebuild",
        };
        f.write_str(name)
    }
}

/// Where the runtime version constraint was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSource {
    PackageJson,
    Nvmrc,
    NodeVersionFile,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionSource::PackageJson => "package.json",
            VersionSource::Nvmrc => ".nvmrc",
            VersionSource::NodeVersionFile => ".node-version",
        };
        f.write_str(name)
    }
}

/// A recoverable classification note. Advisories never stop detection;
/// they ride on the plan so collaborators can surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Advisory {
    AmbiguousPackageManager {
        chosen: PackageManagerKind,
        ignored: Vec<PackageManagerKind>,
    },
    UnresolvableWorkspace {
        pattern: String,
    },
    WorkspacesWithoutLockfile,
    InvalidVersionPin {
        file: String,
    },
    DangerousVersionRange {
        range: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::AmbiguousPackageManager { chosen, ignored } => {
                let ignored: Vec<&str> = ignored.iter().map(|kind| kind.name()).collect();
                write!(
                    f,
                    "multiple lockfiles present; {} selected over {}",
                    chosen,
                    ignored.join(", ")
                )
            }
            Advisory::UnresolvableWorkspace { pattern } => {
                write!(f, "workspace pattern {pattern:?} matched no package directory")
            }
            Advisory::WorkspacesWithoutLockfile => {
                write!(f, "workspaces declared without a lockfile; treating as a single package")
            }
            Advisory::InvalidVersionPin { file } => {
                write!(f, "ignoring unparseable version pin in {file}")
            }
            Advisory::DangerousVersionRange { range } => {
                write!(f, "engines.node declares an unbounded range ({range})")
            }
        }
    }
}

/// The classifier's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub package_manager: PackageManagerKind,
    pub vendored: bool,
    #[serde(default)]
    pub workspaces: Vec<PathBuf>,
    pub native_modules: bool,
    pub node_version: Option<String>,
    pub version_source: Option<VersionSource>,
    pub install_strategy: Option<InstallStrategy>,
    pub install_command: Option<String>,
    pub start_command: Option<String>,
    #[serde(default)]
    pub advisories: Vec<Advisory>,
}

impl BuildPlan {
    /// Plan for a directory with no manifest: not a Node project.
    pub fn none() -> Self {
        Self {
            package_manager: PackageManagerKind::None,
            vendored: false,
            workspaces: Vec::new(),
            native_modules: false,
            node_version: None,
            version_source: None,
            install_strategy: None,
            install_command: None,
            start_command: None,
            advisories: Vec::new(),
        }
    }

    pub fn is_node_project(&self) -> bool {
        self.package_manager != PackageManagerKind::None
    }

    pub fn is_workspace_root(&self) -> bool {
        !self.workspaces.is_empty()
    }
}
