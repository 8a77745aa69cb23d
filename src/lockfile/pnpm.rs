//! pnpm-lock.yaml parsing
//!
//! The packages map key encodes name and version; the encoding changed
//! across lockfile versions (`/name/1.0.0` in v5, `/name@1.0.0` in v6,
//! `name@1.0.0` in v9). All three spellings are decoded.

use super::{LockfileError, ResolvedDependency};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PnpmLockfile {
    #[serde(default)]
    packages: BTreeMap<String, serde_yaml::Value>,
}

pub fn parse(
    content: &str,
    path: &Path,
) -> Result<BTreeMap<String, ResolvedDependency>, LockfileError> {
    let lockfile: PnpmLockfile =
        serde_yaml::from_str(content).map_err(|err| LockfileError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let mut entries = BTreeMap::new();
    for key in lockfile.packages.keys() {
        if let Some((name, version)) = split_package_key(key) {
            entries.insert(
                name.to_string(),
                ResolvedDependency {
                    version: version.to_string(),
                    linked: false,
                },
            );
        }
    }

    Ok(entries)
}

fn split_package_key(key: &str) -> Option<(&str, &str)> {
    let key = key.strip_prefix('/').unwrap_or(key);

    // Peer-dependency suffixes are appended in parentheses; drop them.
    let key = key.split('(').next().unwrap_or(key);

    let search_from = if key.starts_with('@') { 1 } else { 0 };
    if let Some(idx) = key[search_from..].rfind('@') {
        let (name, version) = key.split_at(search_from + idx);
        return Some((name, &version[1..]));
    }
    // v5 keys separate name and version with a slash instead.
    key[search_from..]
        .rfind('/')
        .map(|idx| {
            let (name, version) = key.split_at(search_from + idx);
            (name, &version[1..])
        })
        .filter(|(name, version)| !name.is_empty() && !version.is_empty())
}
