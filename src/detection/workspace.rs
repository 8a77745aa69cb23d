//! Workspace member resolution
//!
//! Declared workspace globs are resolved against the filesystem. A member
//! is a directory matching a glob and carrying its own package.json.
//! Patterns that are syntactically invalid or match nothing are dropped
//! with an advisory; negated patterns (`!dist`) subtract from every
//! positive pattern, as the workspaces field defines them.

use super::plan::Advisory;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::manifest::MANIFEST_FILE;

const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

#[derive(Debug, Deserialize)]
struct PnpmWorkspaceFile {
    #[serde(default)]
    packages: Vec<String>,
}

/// Workspace globs from pnpm-workspace.yaml, which pnpm uses instead of
/// the manifest field. Missing or unparseable files contribute nothing;
/// the manifest's own declaration still applies.
pub fn pnpm_workspace_patterns(project_root: &Path) -> Vec<String> {
    let path = project_root.join(PNPM_WORKSPACE_FILE);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Vec::new();
    };

    match serde_yaml::from_str::<PnpmWorkspaceFile>(&content) {
        Ok(parsed) => parsed.packages,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unparseable workspace file");
            Vec::new()
        }
    }
}

/// Resolves workspace globs to sorted, deduplicated member paths relative
/// to the project root. Members are guaranteed to be existing, disjoint
/// subdirectories.
pub fn resolve_members(
    project_root: &Path,
    patterns: &[String],
    advisories: &mut Vec<Advisory>,
) -> Vec<PathBuf> {
    let negations: Vec<&String> = patterns
        .iter()
        .filter(|pattern| pattern.starts_with('!'))
        .collect();

    let mut members = Vec::new();

    for pattern in patterns.iter().filter(|pattern| !pattern.starts_with('!')) {
        let matched = resolve_single(project_root, pattern, &negations);
        if matched.is_empty() {
            warn!(pattern = %pattern, "Workspace pattern matched no package directory");
            advisories.push(Advisory::UnresolvableWorkspace {
                pattern: pattern.clone(),
            });
        } else {
            members.extend(matched);
        }
    }

    members.sort();
    members.dedup();

    // Members must be disjoint; a match nested under another match keeps
    // only the outermost directory.
    let mut disjoint: Vec<PathBuf> = Vec::new();
    for member in members {
        if !disjoint.iter().any(|kept| member.starts_with(kept)) {
            disjoint.push(member);
        }
    }
    disjoint
}

fn resolve_single(project_root: &Path, pattern: &str, negations: &[&String]) -> Vec<PathBuf> {
    let mut builder = OverrideBuilder::new(project_root);
    if builder.add(pattern).is_err() {
        return Vec::new();
    }
    for negation in negations {
        // An invalid negation is ignored; the positive pattern still
        // resolves.
        let _ = builder.add(negation);
    }
    let Ok(overrides) = builder.build() else {
        return Vec::new();
    };

    // A `**` component can match arbitrarily deep; cap the walk instead
    // of trusting the component count.
    let max_depth = if pattern.contains("**") {
        8
    } else {
        pattern.split('/').count()
    };

    let mut matched = Vec::new();
    for entry in WalkBuilder::new(project_root)
        .max_depth(Some(max_depth))
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build()
        .flatten()
    {
        let path = entry.path();
        if path == project_root || !path.is_dir() {
            continue;
        }
        if !overrides.matched(path, true).is_whitelist() {
            continue;
        }
        if !path.join(MANIFEST_FILE).is_file() {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(project_root) {
            matched.push(relative.to_path_buf());
        }
    }

    matched
}
