use crate::config::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Read-back verification failed for {path} (expected xxh3 {expected:016x}, found {found:016x})")]
    VerificationFailed {
        path: PathBuf,
        expected: u64,
        found: u64,
    },

    #[error("Invalid patch spec: {0}")]
    InvalidSpec(#[from] ValidationError),
}

impl PatchError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
