#![doc = r#"
semgraph-error — Shared error types, severity, and policy-driven emission.

Overview
- A single [`Error`] enum shared across the semgraph crates, grouping
  validation failures, vector/dimension failures, storage failures, worker
  failures, and run cancellation.
- [`Severity`] for coarse, programmatic handling.
- [`ErrorPolicy`] so libraries stay side-effect free: they return `Result<T>`
  and let the caller decide whether/how to log or surface an error, rather
  than logging inline.

Library code should return [`Result`] and construct a specific variant
(`Error::Validation`, `Error::Vector`, ...). Application code (CLI binaries)
picks an [`ErrorPolicy`] and emits at the boundary.
"#]

pub mod policy;
pub mod severity;

pub use policy::{CombinedPolicy, ErrorPolicy, NoopPolicy};
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use severity::Severity;

use thiserror::Error as ThisError;

/// Workspace-wide result alias. Use this throughout library code.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Structural/semantic violation in a parser or embeddings payload.
///
/// Validators never throw: offending entries are collected as
/// `(path, message)` pairs and returned alongside whatever could still be
/// validated.
#[derive(Debug, Clone, ThisError)]
pub enum ValidationError {
    #[error("{path}: {message}")]
    InvalidPayload { path: String, message: String },

    #[error("unknown top-level key '{0}' (strict mode)")]
    UnknownKey(String),
}

/// A vector-shape failure: mismatched lengths, wrong dimension, etc.
#[derive(Debug, Clone, Copy, ThisError)]
pub enum VectorError {
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// The underlying store failed to initialize or perform an operation.
#[derive(Debug, Clone, ThisError)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("schema version {found} is newer than the highest version this build understands ({max})")]
    UnknownSchemaVersion { found: u32, max: u32 },

    #[error("query failed: {0}")]
    Query(String),
}

/// An embedding or analysis worker crashed or returned an error envelope.
#[derive(Debug, Clone, ThisError)]
pub enum WorkerError {
    #[error("embedding worker failure: {0}")]
    Embedding(String),

    #[error("analysis worker failure: {0}")]
    Analysis(String),
}

/// Top-level error type used across the semgraph workspace.
///
/// Prefer returning `Result<T>` from functions and propagating with `?`;
/// let the caller's [`ErrorPolicy`] decide how to emit.
#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Vector(#[from] VectorError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Worker(#[from] WorkerError),
    /// The caller disposed the core; all pending work rejects with this.
    #[error("run cancelled")]
    Cancelled,
}

impl Error {
    /// Coarse severity classification for programmatic handling.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Validation(_) => Severity::Warning,
            Error::Vector(_) => Severity::Warning,
            Error::Storage(_) => Severity::Fatal,
            Error::Worker(WorkerError::Embedding(_)) => Severity::Fatal,
            Error::Worker(WorkerError::Analysis(_)) => Severity::Warning,
            Error::Cancelled => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classifies_storage_as_fatal() {
        let e: Error = StorageError::Unavailable("disk full".into()).into();
        assert_eq!(e.severity(), Severity::Fatal);
    }

    #[test]
    fn severity_classifies_analysis_worker_failure_as_warning() {
        let e: Error = WorkerError::Analysis("timeout".into()).into();
        assert_eq!(e.severity(), Severity::Warning);
    }

    #[test]
    fn display_preserves_inner_message() {
        let e: Error = ValidationError::InvalidPayload {
            path: "functions[0].id".into(),
            message: "missing field".into(),
        }
        .into();
        assert_eq!(e.to_string(), "functions[0].id: missing field");
    }
}
