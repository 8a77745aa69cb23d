//! package-lock.json / npm-shrinkwrap.json parsing
//!
//! Handles lockfileVersion 1 (nested `dependencies` map) and versions 2/3
//! (flat `packages` map keyed by node_modules path). Entries flagged
//! `link: true` resolve to directories inside the tree and are surfaced
//! through `ResolvedDependency::linked`.

use super::{LockfileError, ResolvedDependency};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct NpmLockfile {
    #[serde(default)]
    packages: BTreeMap<String, PackageEntry>,
    #[serde(default)]
    dependencies: BTreeMap<String, LegacyEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    version: Option<String>,
    resolved: Option<String>,
    #[serde(default)]
    link: bool,
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    version: Option<String>,
}

pub fn parse(
    content: &str,
    path: &Path,
) -> Result<BTreeMap<String, ResolvedDependency>, LockfileError> {
    let lockfile: NpmLockfile =
        serde_json::from_str(content).map_err(|err| LockfileError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let mut entries = BTreeMap::new();

    for (key, entry) in &lockfile.packages {
        // The root package is keyed by the empty string.
        if key.is_empty() {
            continue;
        }
        let Some(name) = package_name_from_key(key) else {
            continue;
        };
        let version = match (&entry.version, entry.link, &entry.resolved) {
            (Some(version), _, _) => version.clone(),
            // Linked entries carry no version, only a resolved directory.
            (None, true, Some(resolved)) => resolved.clone(),
            _ => continue,
        };
        entries.insert(
            name.to_string(),
            ResolvedDependency {
                version,
                linked: entry.link,
            },
        );
    }

    // lockfileVersion 1 has no packages map at all.
    if entries.is_empty() {
        for (name, entry) in &lockfile.dependencies {
            if let Some(version) = &entry.version {
                entries.insert(
                    name.clone(),
                    ResolvedDependency {
                        version: version.clone(),
                        linked: false,
                    },
                );
            }
        }
    }

    Ok(entries)
}

/// Extracts the package name from a v2/v3 key such as
/// `node_modules/@scope/name` or `node_modules/a/node_modules/b`.
fn package_name_from_key(key: &str) -> Option<&str> {
    match key.rfind("node_modules/") {
        Some(idx) => {
            let name = &key[idx + "node_modules/".len()..];
            (!name.is_empty()).then_some(name)
        }
        // Workspace entries are keyed by their tree path directly.
        None => Some(key),
    }
}
