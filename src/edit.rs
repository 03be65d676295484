use crate::error::PatchError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

/// Verification strategy for the read-back check after a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditVerification {
    /// Exact text match required
    ExactMatch(String),
    /// xxh3 hash of expected text (faster for large files)
    Hash(u64),
}

impl EditVerification {
    /// Check if the provided text matches the verification criteria.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            EditVerification::ExactMatch(expected) => text == expected,
            EditVerification::Hash(expected_hash) => xxh3_64(text.as_bytes()) == *expected_hash,
        }
    }

    /// Create verification from text, using hash for text over 1KB.
    pub fn from_text(text: &str) -> Self {
        if text.len() > 1024 {
            EditVerification::Hash(xxh3_64(text.as_bytes()))
        } else {
            EditVerification::ExactMatch(text.to_string())
        }
    }

    /// Get hash value regardless of variant.
    pub fn hash(&self) -> u64 {
        match self {
            EditVerification::Hash(h) => *h,
            EditVerification::ExactMatch(text) => xxh3_64(text.as_bytes()),
        }
    }
}

/// Read the whole file and decode it as strict UTF-8.
pub fn read_text(path: &Path) -> Result<String, PatchError> {
    let bytes = fs::read(path).map_err(|e| PatchError::file_access(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read source file");

    String::from_utf8(bytes).map_err(|e| PatchError::Encoding {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full content lands at `path` or the previous file is left as it
/// was. Symlinks are resolved first so the rename replaces the file they point
/// to, not the link. The original file's permissions are carried over.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), PatchError> {
    let resolved = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(PatchError::file_access(path, e)),
    };

    // Tempfile must live in the same directory so the rename stays on one filesystem
    let parent = match resolved.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| PatchError::file_access(path, e))?;

    if let Ok(metadata) = fs::metadata(&resolved) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| PatchError::file_access(path, e))?;
    }

    temp.write_all(content)
        .map_err(|e| PatchError::file_access(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| PatchError::file_access(path, e))?;

    temp.persist(&resolved)
        .map_err(|e| PatchError::file_access(path, e.error))?;
    debug!(
        path = %path.display(),
        resolved = %resolved.display(),
        bytes = content.len(),
        "persisted patched file"
    );

    Ok(())
}

/// Read `path` back and confirm it holds `expected`.
pub fn verify_written(path: &Path, expected: &str) -> Result<(), PatchError> {
    let verification = EditVerification::from_text(expected);
    let actual = read_text(path)?;

    if !verification.matches(&actual) {
        return Err(PatchError::VerificationFailed {
            path: path.to_path_buf(),
            expected: verification.hash(),
            found: xxh3_64(actual.as_bytes()),
        });
    }

    debug!(path = %path.display(), hash = verification.hash(), "verified written content");
    Ok(())
}
