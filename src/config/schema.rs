use std::fmt;
use std::path::PathBuf;

/// File patched when no `--file` is given, relative to the working directory.
pub const DEFAULT_SOURCE_PATH: &str = "src/components/DocumentsBuilder.jsx";

/// Expression that throws when `totalTTC` is `undefined` or a string.
pub const DEFAULT_TARGET: &str = "totalTTC.toFixed(2)";

/// Null-safe form of [`DEFAULT_TARGET`].
pub const DEFAULT_REPLACEMENT: &str = "(Number(totalTTC) || 0).toFixed(2)";

/// What to patch: one file, one literal fragment, one literal replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSpec {
    pub source_path: PathBuf,
    pub target: String,
    pub replacement: String,
}

impl Default for PatchSpec {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            target: DEFAULT_TARGET.to_string(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
        }
    }
}

impl PatchSpec {
    pub fn new(
        source_path: impl Into<PathBuf>,
        target: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            target: target.into(),
            replacement: replacement.into(),
        }
    }

    /// Default fragments applied to another file.
    pub fn for_file(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.source_path.as_os_str().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "source_path",
            });
        }

        if self.target.is_empty() {
            issues.push(ValidationIssue::MissingField { field: "target" });
        } else if can_recreate_target(&self.target, &self.replacement) {
            issues.push(ValidationIssue::NotIdempotent {
                target: self.target.clone(),
                replacement: self.replacement.clone(),
            });
        }

        if self.target.contains('\n') || self.replacement.contains('\n') {
            issues.push(ValidationIssue::MultiLineFragment);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

/// True when some line could still contain `target` after every occurrence
/// has been replaced.
///
/// A leftmost non-overlapping pass finds every occurrence lying wholly in
/// untouched text, so a new match must overlap a replacement. That needs the
/// replacement to contain the target, the target to contain the replacement
/// (the empty string included), or a proper prefix/suffix of the replacement
/// to be a suffix/prefix of the target.
fn can_recreate_target(target: &str, replacement: &str) -> bool {
    if replacement.contains(target) || target.contains(replacement) {
        return true;
    }

    (1..replacement.len())
        .filter(|&i| replacement.is_char_boundary(i))
        .any(|i| target.starts_with(&replacement[i..]) || target.ends_with(&replacement[..i]))
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingField { field: &'static str },
    NotIdempotent { target: String, replacement: String },
    MultiLineFragment,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "patch spec missing required field '{field}'")
            }
            ValidationIssue::NotIdempotent {
                target,
                replacement,
            } => write!(
                f,
                "replacement '{replacement}' can recreate target '{target}'; patch would not be idempotent"
            ),
            ValidationIssue::MultiLineFragment => {
                write!(f, "target and replacement must not contain newlines")
            }
        }
    }
}
