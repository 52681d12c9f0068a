//! The core diagnostic type for the Lifeline error system.
//!
//! A [`Diagnostic`] represents a single error with an optional error code,
//! labeled source spans and help text.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E103]: actor `A` cannot send message `m2` while waiting for response to `m1`
///   --> script.seq:3:8
///    |
///  2 | call A m1 req
///    |        -- call sent here
///  3 | send A m2 oops
///    |        ^^ sender is blocked
///    |
///    = help: receive the return of `m1` first
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use lifeline_parser::error::{Diagnostic, ErrorCode};
    /// # use lifeline_parser::Span;
    ///
    /// let diag = Diagnostic::error("cannot receive message `m9`: has not been sent yet")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(Span::new(10..12), "unknown message");
    /// assert_eq!(diag.code(), Some(ErrorCode::E200));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");

        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert!(diag.primary_span().is_none());
    }

    #[test]
    fn test_diagnostic_with_labels() {
        let diag = Diagnostic::error("duplicate message")
            .with_secondary_label(Span::new(5..7), "first sent here")
            .with_label(Span::new(20..22), "duplicate here");

        assert_eq!(diag.labels().len(), 2);
        assert!(!diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_primary());
        assert_eq!(diag.primary_span(), Some(Span::new(20..22)));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("unknown command: `jump`").with_code(ErrorCode::E001);

        assert_eq!(diag.to_string(), "error[E001]: unknown command: `jump`");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("something broke");

        assert_eq!(diag.to_string(), "error: something broke");
    }

    #[test]
    fn test_diagnostic_with_help() {
        let diag = Diagnostic::error("not active").with_help("add `start A` first");

        assert_eq!(diag.help(), Some("add `start A` first"));
    }
}
