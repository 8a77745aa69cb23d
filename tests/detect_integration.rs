//! End-to-end detection tests over real project directories.

use nodeplan::{
    Advisory, BuildPlan, BuildPlanDetector, ClassificationError, DetectorConfig, InstallStrategy,
    PackageManagerKind, VersionSource,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_manifest(root: &Path, content: &str) {
    fs::write(root.join("package.json"), content).unwrap();
}

fn write_package_lock(root: &Path) {
    fs::write(
        root.join("package-lock.json"),
        r#"{"lockfileVersion": 3, "packages": {"node_modules/express": {"version": "4.18.2"}}}"#,
    )
    .unwrap();
}

fn write_yarn_lock(root: &Path) {
    fs::write(
        root.join("yarn.lock"),
        "# yarn lockfile v1\n\nexpress@^4.18.0:\n  version \"4.18.2\"\n",
    )
    .unwrap();
}

fn write_pnpm_lock(root: &Path) {
    fs::write(
        root.join("pnpm-lock.yaml"),
        "lockfileVersion: '6.0'\npackages:\n  /express@4.18.2:\n    resolution: {integrity: sha512-abc}\n",
    )
    .unwrap();
}

fn vendor_modules(root: &Path) {
    fs::create_dir_all(root.join("node_modules/express")).unwrap();
    fs::write(
        root.join("node_modules/express/package.json"),
        r#"{ "name": "express" }"#,
    )
    .unwrap();
}

fn add_workspace_member(root: &Path, relative: &str) {
    let dir = root.join(relative);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), r#"{ "name": "member" }"#).unwrap();
}

fn detect(root: &Path) -> BuildPlan {
    BuildPlanDetector::new(root).detect().unwrap()
}

#[test]
fn missing_manifest_yields_none_plan() {
    let dir = TempDir::new().unwrap();
    let plan = detect(dir.path());

    assert_eq!(plan.package_manager, PackageManagerKind::None);
    assert!(!plan.is_node_project());
    assert!(plan.workspaces.is_empty());
    assert!(plan.install_command.is_none());
}

#[test]
fn malformed_manifest_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "{ this is not json");

    let err = BuildPlanDetector::new(dir.path()).detect().unwrap_err();
    assert!(matches!(err, ClassificationError::InvalidManifest(_)));
}

#[test]
fn package_manager_matches_present_lockfile() {
    for (writer, expected) in [
        (
            write_package_lock as fn(&Path),
            PackageManagerKind::Npm,
        ),
        (write_yarn_lock as fn(&Path), PackageManagerKind::Yarn),
        (write_pnpm_lock as fn(&Path), PackageManagerKind::Pnpm),
    ] {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            r#"{ "name": "app", "dependencies": { "express": "^4.18.0" } }"#,
        );
        writer(dir.path());

        let plan = detect(dir.path());
        assert_eq!(plan.package_manager, expected);
        assert!(plan.advisories.is_empty());
    }
}

#[test]
fn no_lockfile_defaults_to_npm() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);

    let plan = detect(dir.path());
    assert_eq!(plan.package_manager, PackageManagerKind::Npm);
    assert_eq!(plan.install_strategy, Some(InstallStrategy::Install));
    assert_eq!(plan.install_command.as_deref(), Some("npm install"));
}

#[test]
fn yarn_lockfile_wins_over_npm_with_advisory() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);
    write_package_lock(dir.path());
    write_yarn_lock(dir.path());

    let plan = detect(dir.path());
    assert_eq!(plan.package_manager, PackageManagerKind::Yarn);
    assert_eq!(
        plan.advisories,
        vec![Advisory::AmbiguousPackageManager {
            chosen: PackageManagerKind::Yarn,
            ignored: vec![PackageManagerKind::Npm],
        }]
    );
}

#[test]
fn corepack_pin_overrides_lockfile_precedence() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "app", "packageManager": "pnpm@8.6.12" }"#,
    );
    write_yarn_lock(dir.path());

    let plan = detect(dir.path());
    assert_eq!(plan.package_manager, PackageManagerKind::Pnpm);
    assert_eq!(
        plan.advisories,
        vec![Advisory::AmbiguousPackageManager {
            chosen: PackageManagerKind::Pnpm,
            ignored: vec![PackageManagerKind::Yarn],
        }]
    );
}

#[test]
fn vendored_modules_with_lockfile_classify_vendored() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);
    write_package_lock(dir.path());
    vendor_modules(dir.path());

    let plan = detect(dir.path());
    assert!(plan.vendored);
    // Vendored without an offline cache means a rebuild in place.
    assert_eq!(plan.install_strategy, Some(InstallStrategy::Rebuild));
    assert_eq!(plan.install_command.as_deref(), Some("npm rebuild"));
}

#[test]
fn vendored_with_offline_cache_gets_clean_install() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);
    write_package_lock(dir.path());
    vendor_modules(dir.path());
    fs::create_dir_all(dir.path().join("npm-cache/content-v2")).unwrap();

    let plan = detect(dir.path());
    assert!(plan.vendored);
    assert_eq!(plan.install_strategy, Some(InstallStrategy::CleanInstall));
    assert_eq!(plan.install_command.as_deref(), Some("npm ci"));
}

#[test]
fn lockfile_without_vendoring_gets_clean_install() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);
    write_package_lock(dir.path());

    let plan = detect(dir.path());
    assert!(!plan.vendored);
    assert_eq!(plan.install_strategy, Some(InstallStrategy::CleanInstall));
}

#[test]
fn workspace_members_resolved_and_missing_entry_dropped() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "monorepo", "workspaces": ["packages/*", "tools/missing"] }"#,
    );
    write_package_lock(dir.path());
    add_workspace_member(dir.path(), "packages/api");
    add_workspace_member(dir.path(), "packages/web");

    let plan = detect(dir.path());
    assert_eq!(
        plan.workspaces,
        vec![PathBuf::from("packages/api"), PathBuf::from("packages/web")]
    );
    assert_eq!(
        plan.advisories,
        vec![Advisory::UnresolvableWorkspace {
            pattern: "tools/missing".to_string()
        }]
    );
}

#[test]
fn workspaces_without_lockfile_degrade_to_single_package() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "monorepo", "workspaces": ["packages/*"] }"#,
    );
    add_workspace_member(dir.path(), "packages/api");

    let plan = detect(dir.path());
    assert!(plan.workspaces.is_empty());
    assert_eq!(plan.advisories, vec![Advisory::WorkspacesWithoutLockfile]);
}

#[test]
fn pnpm_workspace_file_contributes_members() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "monorepo" }"#);
    write_pnpm_lock(dir.path());
    fs::write(
        dir.path().join("pnpm-workspace.yaml"),
        "packages:\n  - 'packages/*'\n",
    )
    .unwrap();
    add_workspace_member(dir.path(), "packages/api");

    let plan = detect(dir.path());
    assert_eq!(plan.package_manager, PackageManagerKind::Pnpm);
    assert_eq!(plan.workspaces, vec![PathBuf::from("packages/api")]);
}

#[test]
fn workspace_members_are_disjoint_existing_subdirectories() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "monorepo", "workspaces": ["packages/*", "packages/api"] }"#,
    );
    write_package_lock(dir.path());
    add_workspace_member(dir.path(), "packages/api");

    let plan = detect(dir.path());
    assert_eq!(plan.workspaces, vec![PathBuf::from("packages/api")]);
    for member in &plan.workspaces {
        assert!(dir.path().join(member).is_dir());
    }
}

#[test]
fn native_modules_flagged_from_dependencies() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "app", "dependencies": { "bcrypt": "^5.1.0" } }"#,
    );
    write_package_lock(dir.path());

    let plan = detect(dir.path());
    assert!(plan.native_modules);
}

#[test]
fn engines_field_sets_version_constraint() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "app", "engines": { "node": ">=18 <21" } }"#,
    );

    let plan = detect(dir.path());
    assert_eq!(plan.node_version.as_deref(), Some(">=18 <21"));
    assert_eq!(plan.version_source, Some(VersionSource::PackageJson));
    assert_eq!(
        plan.advisories,
        vec![Advisory::DangerousVersionRange {
            range: ">=18 <21".to_string()
        }]
    );
}

#[test]
fn nvmrc_sets_version_when_engines_absent() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);
    fs::write(dir.path().join(".nvmrc"), "lts/hydrogen\n").unwrap();

    let plan = detect(dir.path());
    assert_eq!(plan.node_version.as_deref(), Some("18.*.*"));
    assert_eq!(plan.version_source, Some(VersionSource::Nvmrc));
}

#[test]
fn start_script_selects_package_manager_start() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "name": "app", "scripts": { "start": "node server.js" } }"#,
    );
    write_yarn_lock(dir.path());

    let plan = detect(dir.path());
    assert_eq!(plan.start_command.as_deref(), Some("yarn start"));
}

#[test]
fn main_field_used_when_no_start_script() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app", "main": "app.js" }"#);

    let plan = detect(dir.path());
    assert_eq!(plan.start_command.as_deref(), Some("node app.js"));
}

#[test]
fn server_js_fallback_when_manifest_says_nothing() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);
    fs::write(dir.path().join("server.js"), "// listener\n").unwrap();

    let plan = detect(dir.path());
    assert_eq!(plan.start_command.as_deref(), Some("node server.js"));
}

#[test]
fn project_path_override_changes_detection_root() {
    let dir = TempDir::new().unwrap();
    let app = dir.path().join("apps/api");
    fs::create_dir_all(&app).unwrap();
    write_manifest(&app, r#"{ "name": "api" }"#);
    write_yarn_lock(&app);

    let config = DetectorConfig::default().with_project_path(Some(PathBuf::from("apps/api")));
    let plan = BuildPlanDetector::with_config(dir.path(), config)
        .detect()
        .unwrap();

    assert_eq!(plan.package_manager, PackageManagerKind::Yarn);
}

#[test]
fn missing_project_path_override_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), r#"{ "name": "app" }"#);

    let config = DetectorConfig::default().with_project_path(Some(PathBuf::from("apps/api")));
    let err = BuildPlanDetector::with_config(dir.path(), config)
        .detect()
        .unwrap_err();

    assert!(matches!(err, ClassificationError::ProjectPathNotFound(_)));
}

#[test]
fn plan_survives_serialization_round_trip() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"
        {
            "name": "monorepo",
            "workspaces": ["packages/*"],
            "dependencies": { "sharp": "^0.33.0" },
            "scripts": { "start": "node index.js" },
            "engines": { "node": "20.11.0" }
        }
        "#,
    );
    write_package_lock(dir.path());
    add_workspace_member(dir.path(), "packages/api");
    vendor_modules(dir.path());

    let plan = detect(dir.path());

    let json = serde_json::to_string(&plan).unwrap();
    let from_json: BuildPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(plan, from_json);

    let yaml = serde_yaml::to_string(&plan).unwrap();
    let from_yaml: BuildPlan = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(plan, from_yaml);
}
