//! In-memory line transform.
//!
//! Splits on `'\n'`, rewrites every line containing the target, and joins
//! back with `'\n'`. Lines that do not match are carried through untouched,
//! so the line count and every other byte of the input are preserved.

use crate::report::{LineChange, PatchReport};
use tracing::debug;

/// Output of [`patch_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Patched holds the new text; nothing is written until it is persisted"]
pub struct Patched {
    pub text: String,
    pub report: PatchReport,
}

impl Patched {
    pub fn is_unchanged(&self) -> bool {
        self.report.is_empty()
    }
}

/// Replace every occurrence of `target` with `replacement`, line by line.
///
/// Matching is plain, case-sensitive substring containment. Within a line,
/// occurrences are replaced left to right without overlap.
pub fn patch_text(content: &str, target: &str, replacement: &str) -> Patched {
    let mut report = PatchReport::default();

    if target.is_empty() {
        return Patched {
            text: content.to_string(),
            report,
        };
    }

    let lines: Vec<String> = content
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            if !line.contains(target) {
                return line.to_string();
            }

            let occurrences = line.matches(target).count();
            let patched = line.replace(target, replacement);
            debug!(line = idx + 1, occurrences, "patched line");

            report.push(LineChange {
                line_number: idx + 1,
                before: line.to_string(),
                after: patched.clone(),
                occurrences,
            });
            patched
        })
        .collect();

    Patched {
        text: lines.join("\n"),
        report,
    }
}
