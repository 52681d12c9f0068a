//! Error and diagnostic system for the Lifeline interpreter.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing at the offending tokens
//! - [`ParseError`], the error returned by [`crate::parse`]
//!
//! # Example
//!
//! ```
//! # use lifeline_parser::error::{Diagnostic, ErrorCode};
//! # use lifeline_parser::Span;
//!
//! let diag = Diagnostic::error("cannot send message `m1` multiple times")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(40..42), "duplicate message name")
//!     .with_secondary_label(Span::new(10..12), "first sent here")
//!     .with_help("give every message a unique name");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCategory, ErrorCode};
pub use label::Label;
pub use parse_error::ParseError;
