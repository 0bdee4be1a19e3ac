//! Emission policies.
//!
//! Library code never logs or prints directly; it returns `Result<T, Error>`.
//! Applications pick an [`ErrorPolicy`] and call [`ErrorPolicy::emit`] at a
//! boundary (end of a CLI command, end of a request) to decide what, if
//! anything, happens with an error that was not otherwise recovered.

use crate::Error;

/// Something that can observe an [`Error`] without taking ownership of
/// control flow. Implementors must not panic.
pub trait ErrorPolicy {
    fn emit(&self, err: &Error);
}

/// Does nothing. Useful in library tests where emission is irrelevant.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn emit(&self, _err: &Error) {}
}

/// Emits via the `tracing` crate at a level derived from [`crate::Severity`].
#[cfg(feature = "tracing")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn emit(&self, err: &Error) {
        match err.severity() {
            crate::Severity::Warning => tracing::warn!(error = %err, "non-fatal error"),
            crate::Severity::Error => tracing::error!(error = %err, "error"),
            crate::Severity::Fatal => tracing::error!(error = %err, "fatal error"),
        }
    }
}

/// Runs a sequence of policies in order. Useful to combine e.g. tracing with
/// a diagnostic renderer.
#[derive(Default)]
pub struct CombinedPolicy {
    policies: Vec<Box<dyn ErrorPolicy>>,
}

impl CombinedPolicy {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    pub fn push(mut self, policy: impl ErrorPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }
}

impl ErrorPolicy for CombinedPolicy {
    fn emit(&self, err: &Error) {
        for policy in &self.policies {
            policy.emit(err);
        }
    }
}
