//! Patch applicator: read, transform, write, verify.
//!
//! A single straight-line pass over one file. Any failure while reading
//! aborts before the file is touched; the write goes through a tempfile and
//! rename so a failed write leaves the original in place.

use crate::config::PatchSpec;
use crate::edit::{atomic_write, read_text, verify_written};
use crate::error::PatchError;
use crate::patcher::patch_text;
use crate::report::PatchReport;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Knobs for [`run`]. The default matches a plain invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Transform and report, but never write
    pub dry_run: bool,
    /// Leave the file alone (mtime included) when nothing matched
    pub skip_unchanged_write: bool,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use = "RunOutcome carries the patch report"]
pub struct RunOutcome {
    pub path: PathBuf,
    pub report: PatchReport,
    /// The file was rewritten
    pub written: bool,
    /// The rewritten file was read back and matched
    pub verified: bool,
    #[serde(skip)]
    pub before: String,
    #[serde(skip)]
    pub after: String,
}

impl RunOutcome {
    pub fn changed(&self) -> bool {
        !self.report.is_empty()
    }
}

/// Patch `spec.source_path` in place.
pub fn run(spec: &PatchSpec, options: &RunOptions) -> Result<RunOutcome, PatchError> {
    spec.validate()?;

    let path = &spec.source_path;
    info!(
        path = %path.display(),
        fragment = %spec.target,
        replacement = %spec.replacement,
        dry_run = options.dry_run,
        "patching"
    );

    let before = read_text(path)?;
    let patched = patch_text(&before, &spec.target, &spec.replacement);
    debug!(
        lines = patched.report.lines_changed(),
        occurrences = patched.report.occurrences(),
        "transform complete"
    );

    let skip_write =
        options.dry_run || (options.skip_unchanged_write && patched.is_unchanged());

    let (written, verified) = if skip_write {
        debug!(path = %path.display(), "skipping write");
        (false, false)
    } else {
        atomic_write(path, patched.text.as_bytes())?;
        verify_written(path, &patched.text)?;
        (true, true)
    };

    Ok(RunOutcome {
        path: path.clone(),
        report: patched.report,
        written,
        verified,
        before,
        after: patched.text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn spec_in(dir: &tempfile::TempDir, content: &str) -> PatchSpec {
        let file = dir.path().join("DocumentsBuilder.jsx");
        fs::write(&file, content).unwrap();
        PatchSpec::for_file(file)
    }

    #[test]
    fn rewrites_file_and_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let spec = spec_in(&dir, "x\nconst total = totalTTC.toFixed(2);\n");

        let outcome = run(&spec, &RunOptions::default()).unwrap();

        assert!(outcome.written);
        assert!(outcome.verified);
        assert_eq!(outcome.report.lines_changed(), 1);
        assert_eq!(outcome.report.changes[0].line_number, 2);
        assert_eq!(
            fs::read_to_string(&spec.source_path).unwrap(),
            "x\nconst total = (Number(totalTTC) || 0).toFixed(2);\n"
        );
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let content = "totalTTC.toFixed(2)";
        let spec = spec_in(&dir, content);

        let outcome = run(
            &spec,
            &RunOptions {
                dry_run: true,
                ..RunOptions::default()
            },
        )
        .unwrap();

        assert!(!outcome.written);
        assert!(outcome.changed());
        assert_eq!(fs::read_to_string(&spec.source_path).unwrap(), content);
    }

    #[test]
    fn no_match_still_rewrites_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let content = "nothing to see\n";
        let spec = spec_in(&dir, content);

        let outcome = run(&spec, &RunOptions::default()).unwrap();
        assert!(outcome.written);
        assert!(!outcome.changed());
        assert_eq!(fs::read_to_string(&spec.source_path).unwrap(), content);
    }

    #[test]
    fn no_match_skip_unchanged_write() {
        let dir = tempfile::tempdir().unwrap();
        let spec = spec_in(&dir, "nothing to see\n");

        let outcome = run(
            &spec,
            &RunOptions {
                skip_unchanged_write: true,
                ..RunOptions::default()
            },
        )
        .unwrap();
        assert!(!outcome.written);
        assert!(!outcome.verified);
    }

    #[test]
    #[cfg(unix)]
    fn symlinked_source_patches_link_target() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.jsx");
        let link = dir.path().join("link.jsx");
        fs::write(&real, "totalTTC.toFixed(2)\n").unwrap();
        symlink(&real, &link).unwrap();

        let outcome = run(&PatchSpec::for_file(&link), &RunOptions::default()).unwrap();

        assert!(outcome.written);
        assert!(outcome.verified);
        assert_eq!(outcome.report.lines_changed(), 1);
        assert_eq!(
            fs::read_to_string(&real).unwrap(),
            "(Number(totalTTC) || 0).toFixed(2)\n"
        );
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn invalid_spec_rejected_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let spec = PatchSpec::new(dir.path().join("missing.jsx"), "", "x");

        let err = run(&spec, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, PatchError::InvalidSpec(_)));
    }

    #[test]
    fn missing_file_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let spec = PatchSpec::for_file(dir.path().join("missing.jsx"));

        let err = run(&spec, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, PatchError::FileAccess { .. }));
        assert!(!spec.source_path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
