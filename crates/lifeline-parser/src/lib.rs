//! # Lifeline Parser
//!
//! Interpreter and validator for the Lifeline sequence script language.
//! This crate turns script text into a validated
//! [`lifeline_core::semantic::Model`].
//!
//! A script is a list of lines. Each non-blank line is one command; each
//! blank line advances the logical clock by one tick:
//!
//! ```text
//! start client
//! call client req fetch the page
//!
//! receive server req
//!
//! return server req here it is
//!
//! receive client req
//! stop client
//! ```
//!
//! ## Usage
//!
//! ```
//! # use lifeline_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "start A\n\nsend A m1 hi\n\nstart B\nreceive B m1\n\nstop A\nstop B\n";
//!     let model = parse(source)?;
//!     assert_eq!(model.actor_count(), 2);
//!     Ok(())
//! }
//! ```

mod command;
pub mod error;
mod interpreter;
mod lexer;
mod span;

pub use error::ParseError;
pub use span::{Span, Spanned};

use log::debug;

use lifeline_core::semantic::Model;

use interpreter::Interpreter;

/// Interpret a script and return its validated model.
///
/// The pipeline has two steps:
///
/// 1. **Tokenize** - Split the source into lines of spanned fields
/// 2. **Interpret** - Execute every line, then run the end-of-input checks
///
/// Interpretation stops at the first violation. The returned
/// [`ParseError`] carries a single diagnostic whose primary label points at
/// the offending token.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed lines, commands that are illegal
/// in the current state, and anything left unfinished at end of input.
pub fn parse(source: &str) -> Result<Model, ParseError> {
    let lines = lexer::tokenize(source);
    debug!(lines = lines.len(); "Source tokenized");

    let mut interpreter = Interpreter::new();
    for line in &lines {
        interpreter.execute_line(line)?;
    }

    Ok(interpreter.finish()?)
}
