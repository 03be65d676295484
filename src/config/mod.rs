pub mod schema;

pub use schema::{
    PatchSpec, ValidationError, ValidationIssue, DEFAULT_REPLACEMENT, DEFAULT_SOURCE_PATH,
    DEFAULT_TARGET,
};
