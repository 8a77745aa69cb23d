//! Runtime version constraint resolution
//!
//! The engines field in package.json wins over version pin files; `.nvmrc`
//! wins over `.node-version`. Pin file contents are normalized into a
//! range: a leading `v` is stripped, `node` means any version, `lts/<name>`
//! maps to that release line, and partial versions are padded with
//! wildcards. An unparseable pin is dropped with an advisory rather than
//! aborting detection.

use super::error::ClassificationError;
use super::plan::{Advisory, VersionSource};
use crate::manifest::ProjectManifest;
use regex::Regex;
use std::io;
use std::path::Path;
use tracing::{info, warn};

const NVMRC_FILE: &str = ".nvmrc";
const NODE_VERSION_FILE: &str = ".node-version";

/// LTS codename to major release line.
const LTS_LINES: &[(&str, u32)] = &[
    ("argon", 4),
    ("boron", 6),
    ("carbon", 8),
    ("dubnium", 10),
    ("erbium", 12),
    ("fermium", 14),
    ("gallium", 16),
    ("hydrogen", 18),
    ("iron", 20),
    ("jod", 22),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion {
    pub constraint: String,
    pub source: VersionSource,
}

/// Resolves the runtime version constraint for the project, if any.
pub fn resolve(
    project_root: &Path,
    manifest: &ProjectManifest,
    advisories: &mut Vec<Advisory>,
) -> Result<Option<RuntimeVersion>, ClassificationError> {
    if let Some(range) = manifest.engines_node() {
        if range == "*" || range.starts_with('>') {
            advisories.push(Advisory::DangerousVersionRange {
                range: range.to_string(),
            });
        }
        if project_root.join(NVMRC_FILE).is_file() {
            info!("Node version in .nvmrc ignored in favor of the engines field in package.json");
        }
        return Ok(Some(RuntimeVersion {
            constraint: range.to_string(),
            source: VersionSource::PackageJson,
        }));
    }

    for (file, source) in [
        (NVMRC_FILE, VersionSource::Nvmrc),
        (NODE_VERSION_FILE, VersionSource::NodeVersionFile),
    ] {
        let path = project_root.join(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(ClassificationError::Io { path, source }),
        };

        match normalize_pin(&content) {
            Some(constraint) => {
                return Ok(Some(RuntimeVersion { constraint, source }));
            }
            None => {
                warn!(file, content = content.trim(), "Unparseable version pin");
                advisories.push(Advisory::InvalidVersionPin {
                    file: file.to_string(),
                });
            }
        }
    }

    Ok(None)
}

/// Normalizes pin file content into a version range, or `None` when the
/// content fits no accepted shape.
fn normalize_pin(content: &str) -> Option<String> {
    let content = content.trim().to_lowercase();

    if content == "node" {
        return Some("*".to_string());
    }

    if let Some(name) = content.strip_prefix("lts/") {
        if name == "*" {
            let max = LTS_LINES.iter().map(|(_, major)| *major).max()?;
            return Some(format!("{max}.*.*"));
        }
        return LTS_LINES
            .iter()
            .find(|(codename, _)| *codename == name)
            .map(|(_, major)| format!("{major}.*.*"));
    }

    let version = content.strip_prefix('v').unwrap_or(&content);
    let pattern = Regex::new(r"^(\d+)(\.\d+)?(\.\d+)?$").expect("static regex");
    let captures = pattern.captures(version)?;

    let parts = (1usize..=3).filter(|idx| captures.get(*idx).is_some()).count();
    Some(format!("{}{}", version, ".*".repeat(3 - parts)))
}
