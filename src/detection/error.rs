//! Classification errors
//!
//! Fatal conditions only. Recoverable conditions become advisories on the
//! plan instead (see `detection::plan::Advisory`).

use crate::lockfile::LockfileError;
use crate::manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("project path does not exist: {0}")]
    PathNotFound(PathBuf),
    #[error("project path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("expected project path {0:?} to be an existing directory")]
    ProjectPathNotFound(PathBuf),
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] ManifestError),
    #[error("invalid lockfile: {0}")]
    InvalidLockfile(#[from] LockfileError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
