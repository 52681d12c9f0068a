//! The ParseError type returned by [`crate::parse`].

use thiserror::Error;

use crate::error::Diagnostic;

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error type for script interpretation.
///
/// Interpretation stops at the first violation, so a parse error always
/// wraps exactly one [`Diagnostic`].
#[derive(Debug, Clone, Error)]
#[error("{diagnostic}")]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// Create a new parse error from a diagnostic.
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    /// Get the diagnostic describing the failure.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}
