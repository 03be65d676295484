//! Fixed Patch: rewrite one literal fragment across the lines of one file
//!
//! Built for a single maintenance fix: turning the fragile
//! `totalTTC.toFixed(2)` into the null-safe
//! `(Number(totalTTC) || 0).toFixed(2)` wherever it appears.
//!
//! # Architecture
//!
//! [`patch_text`] is a pure line transform that produces the new text plus a
//! [`PatchReport`]. [`run`] wraps it with file access: strict UTF-8 read,
//! atomic write, and a read-back check.
//!
//! # Safety
//!
//! - Nothing is written unless the whole file was read and decoded
//! - Atomic file writes (tempfile + fsync + rename)
//! - Line count and untouched lines preserved byte-for-byte
//! - Idempotent: a second run finds nothing to change
//!
//! # Example
//!
//! ```no_run
//! use fixed_patch::{run, PatchSpec, RunOptions};
//!
//! let spec = PatchSpec::for_file("src/components/DocumentsBuilder.jsx");
//! match run(&spec, &RunOptions::default()) {
//!     Ok(outcome) => println!("{}", outcome.report),
//!     Err(e) => eprintln!("Patch failed: {}", e),
//! }
//! ```

pub mod applicator;
pub mod config;
pub mod edit;
pub mod error;
pub mod logging;
pub mod patcher;
pub mod report;

// Re-exports
pub use applicator::{run, RunOptions, RunOutcome};
pub use config::{PatchSpec, ValidationError, ValidationIssue};
pub use edit::{atomic_write, read_text, verify_written, EditVerification};
pub use error::PatchError;
pub use patcher::{patch_text, Patched};
pub use report::{LineChange, PatchReport};
