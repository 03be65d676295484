//! Diagnostic record of the lines a run changed.
//!
//! Reports are printed and then dropped; nothing here is written to disk.

use serde::Serialize;
use std::fmt;

/// One patched line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    /// 1-based line number in the original file
    pub line_number: usize,
    pub before: String,
    pub after: String,
    /// Non-overlapping occurrences of the target replaced on this line
    pub occurrences: usize,
}

/// Ordered list of changed lines, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub changes: Vec<LineChange>,
}

impl PatchReport {
    pub fn push(&mut self, change: LineChange) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of lines changed.
    pub fn lines_changed(&self) -> usize {
        self.changes.len()
    }

    /// Total replacements across all lines.
    pub fn occurrences(&self) -> usize {
        self.changes.iter().map(|c| c.occurrences).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineChange> {
        self.changes.iter()
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} line(s) changed, {} occurrence(s) replaced",
            self.lines_changed(),
            self.occurrences()
        )
    }
}
