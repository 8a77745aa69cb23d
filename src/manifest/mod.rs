//! package.json parsing
//!
//! The manifest is decoded into typed fields at parse time; union-typed
//! fields (the `workspaces` declaration) are modeled as untagged enums so
//! both accepted shapes validate during deserialization. A manifest is
//! immutable once loaded.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no \"package.json\" found at: {0}")]
    Missing(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Declared workspaces, in either of the two shapes package.json accepts:
/// a bare array of globs, or the object form carrying a `packages` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesField {
    Patterns(Vec<String>),
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    pub fn patterns(&self) -> &[String] {
        match self {
            WorkspacesField::Patterns(patterns) => patterns,
            WorkspacesField::Detailed { packages } => packages,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Engines {
    pub node: Option<String>,
    pub npm: Option<String>,
}

/// Parsed view of a project's package.json. Only the fields classification
/// needs are kept; everything else is dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub main: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    pub workspaces: Option<WorkspacesField>,
    pub engines: Option<Engines>,
    #[serde(rename = "packageManager")]
    pub package_manager: Option<String>,
    #[serde(default)]
    pub gypfile: bool,
}

impl ProjectManifest {
    /// Loads and parses the manifest inside `project_root`.
    ///
    /// A missing file is reported as `ManifestError::Missing` so the caller
    /// can distinguish "not a Node project" from a malformed manifest.
    pub fn load(project_root: &Path) -> Result<Self, ManifestError> {
        let path = project_root.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::Missing(path.clone())
            } else {
                ManifestError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        Self::from_str(&content, &path)
    }

    pub fn from_str(content: &str, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Node version range from the engines field, if declared and non-empty.
    pub fn engines_node(&self) -> Option<&str> {
        self.engines
            .as_ref()
            .and_then(|engines| engines.node.as_deref())
            .filter(|version| !version.trim().is_empty())
    }

    pub fn workspace_patterns(&self) -> &[String] {
        self.workspaces
            .as_ref()
            .map(|field| field.patterns())
            .unwrap_or(&[])
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    /// Declared dependency names followed by dev dependency names.
    pub fn all_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
    }
}
