//! Per-invocation detection state
//!
//! All intermediate parsed state for one classification lives here and is
//! dropped when the plan is built, so nothing persists between builds.

use super::plan::Advisory;
use crate::lockfile::LockfileEvidence;
use crate::manifest::ProjectManifest;
use std::path::{Path, PathBuf};
use tracing::warn;

pub(crate) struct DetectionContext {
    root: PathBuf,
    pub manifest: ProjectManifest,
    pub lockfiles: LockfileEvidence,
    pub advisories: Vec<Advisory>,
}

impl DetectionContext {
    pub fn new(root: PathBuf, manifest: ProjectManifest, lockfiles: LockfileEvidence) -> Self {
        Self {
            root,
            manifest,
            lockfiles,
            advisories: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Records a recoverable condition and logs it.
    pub fn advise(&mut self, advisory: Advisory) {
        warn!(advisory = %advisory, "Recoverable classification condition");
        self.advisories.push(advisory);
    }

    /// True when `relative` names a directory under the root containing at
    /// least one entry.
    pub fn dir_populated(&self, relative: &str) -> bool {
        let path = self.root.join(relative);
        match std::fs::read_dir(&path) {
            Ok(mut entries) => entries.next().is_some(),
            Err(_) => false,
        }
    }
}
