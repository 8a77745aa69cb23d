//! yarn.lock parsing
//!
//! The classic (v1) format is line-oriented: an unindented header lists
//! the requested ranges for an entry, and an indented `version` line pins
//! the resolution. Berry lockfiles use `version: x` instead of
//! `version "x"`; both spellings are accepted. Parsing is lenient — a
//! line that fits neither shape is skipped rather than fatal, matching
//! how loosely the format is specified.

use super::ResolvedDependency;
use std::collections::BTreeMap;

pub fn parse(content: &str) -> BTreeMap<String, ResolvedDependency> {
    let mut entries = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !line.starts_with(' ') {
            current = line
                .trim_end_matches(':')
                .split(',')
                .next()
                .and_then(|key| package_name(key.trim().trim_matches('"')))
                .map(str::to_string);
            continue;
        }

        let trimmed = line.trim();
        let version = trimmed
            .strip_prefix("version ")
            .or_else(|| trimmed.strip_prefix("version: "))
            .map(|rest| rest.trim_matches('"'));

        if let (Some(name), Some(version)) = (&current, version) {
            entries.insert(
                name.clone(),
                ResolvedDependency {
                    version: version.to_string(),
                    linked: false,
                },
            );
        }
    }

    entries
}

/// Splits `name@range` at the last `@`, keeping scoped names intact.
fn package_name(key: &str) -> Option<&str> {
    // Berry bookkeeping blocks (`__metadata:`) are not packages.
    if key.starts_with("__") {
        return None;
    }
    let search_from = if key.starts_with('@') { 1 } else { 0 };
    match key[search_from..].rfind('@') {
        Some(idx) => {
            let name = &key[..search_from + idx];
            (!name.is_empty()).then_some(name)
        }
        None => (!key.is_empty()).then_some(key),
    }
}
