//! Error types for Lifeline operations.
//!
//! This module provides the main error type [`LifelineError`] which wraps
//! the error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use lifeline_parser::ParseError;

/// The main error type for Lifeline operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the script source next to the structured
/// [`ParseError`] so reporters can show the offending line.
#[derive(Debug, Error)]
pub enum LifelineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for LifelineError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl LifelineError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// The 1-based source line the error points at, for parse errors
    /// with a located primary label.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Parse { err, src } => err
                .diagnostic()
                .primary_span()
                .map(|span| span.line_number(src)),
            _ => None,
        }
    }
}
