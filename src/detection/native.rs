//! Native module heuristic
//!
//! Approximates "this project compiles native addons" from the manifest
//! alone: well-known native packages among the declared dependencies, a
//! `gypfile` marker, or an install-phase script invoking a native build
//! tool. This is classification, not compilation detection — false
//! negatives are possible for packages outside the known set.

use crate::manifest::ProjectManifest;

/// Packages that ship native addons or drive addon builds.
const NATIVE_PACKAGES: &[&str] = &[
    "node-gyp",
    "node-pre-gyp",
    "@mapbox/node-pre-gyp",
    "prebuild-install",
    "node-addon-api",
    "bcrypt",
    "sharp",
    "canvas",
    "sqlite3",
    "better-sqlite3",
    "node-sass",
    "grpc",
    "re2",
    "leveldown",
    "cpu-features",
];

/// Install-phase scripts that, when present, usually drive an addon build.
const INSTALL_SCRIPTS: &[&str] = &["install", "preinstall", "postinstall", "rebuild"];

const BUILD_TOOL_MARKERS: &[&str] = &["node-gyp", "prebuild-install", "cmake-js"];

pub fn requires_native_build(manifest: &ProjectManifest) -> bool {
    if manifest.gypfile {
        return true;
    }

    if manifest
        .all_dependency_names()
        .any(|name| NATIVE_PACKAGES.contains(&name))
    {
        return true;
    }

    INSTALL_SCRIPTS.iter().any(|script| {
        manifest
            .script(script)
            .is_some_and(|command| BUILD_TOOL_MARKERS.iter().any(|tool| command.contains(tool)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn manifest(content: &str) -> ProjectManifest {
        ProjectManifest::from_str(content, Path::new("package.json")).unwrap()
    }

    #[test]
    fn test_known_native_dependency() {
        let manifest = manifest(r#"{ "dependencies": { "express": "^4", "bcrypt": "^5" } }"#);
        assert!(requires_native_build(&manifest));
    }

    #[test]
    fn test_native_dev_dependency() {
        let manifest = manifest(r#"{ "devDependencies": { "node-gyp": "^10" } }"#);
        assert!(requires_native_build(&manifest));
    }

    #[test]
    fn test_gypfile_marker() {
        let manifest = manifest(r#"{ "gypfile": true }"#);
        assert!(requires_native_build(&manifest));
    }

    #[test]
    fn test_install_script_invoking_node_gyp() {
        let manifest = manifest(r#"{ "scripts": { "install": "node-gyp rebuild" } }"#);
        assert!(requires_native_build(&manifest));
    }

    #[test]
    fn test_pure_javascript_project() {
        let manifest = manifest(
            r#"{ "dependencies": { "express": "^4" }, "scripts": { "start": "node index.js" } }"#,
        );
        assert!(!requires_native_build(&manifest));
    }
}
