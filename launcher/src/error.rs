//! Error type shared by the workflow loader and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while resolving, validating, or reading a workflow.
///
/// [`WorkflowError::InvalidWorkflow`] is the only variant the loader reports
/// itself; every other variant is produced by a collaborator and passed
/// through untouched.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The workflow file does not conform to the workflow schema.
    #[error("workflow file {} is not valid: {}", .path.display(), .details.join("; "))]
    InvalidWorkflow { path: PathBuf, details: Vec<String> },

    /// A `$(find-pkg-share <package>)` reference named an unknown package.
    #[error("package '{package}' not found while resolving '{reference}'")]
    PackageNotFound { package: String, reference: String },

    /// Resolution finished without producing an absolute path.
    #[error("reference '{reference}' resolved to non-absolute path {}", .resolved.display())]
    UnresolvedReference { reference: String, resolved: PathBuf },

    /// A `$(...)` expression survived substitution, e.g. a misspelled
    /// `find-pkg-share` or a package name with spaces.
    #[error("malformed package reference '{reference}'")]
    MalformedReference { reference: String },

    /// Existence check failed.
    #[error("path {} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The schema itself could not be loaded or compiled.
    #[error("invalid schema: {0}")]
    Schema(String),

    #[error("invalid launcher config: {0}")]
    Config(String),
}

impl WorkflowError {
    /// True when the workflow failed schema validation.
    pub fn is_invalid_workflow(&self) -> bool {
        matches!(self, WorkflowError::InvalidWorkflow { .. })
    }
}
