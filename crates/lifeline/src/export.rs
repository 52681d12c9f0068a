//! Export functionality for Lifeline diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a laid-out diagram into an output format. It is the final stage in
//! the Lifeline pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Script Text
//!     ↓ parse
//! Semantic Model
//!     ↓ layout
//! Positioned Elements (Layout)
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgExporter`]

/// SVG export backend.
pub mod svg;

use std::{fmt, io};

use crate::layout::Layout;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a laid-out diagram to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &Layout) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// Converted into [`LifelineError::Export`] at the crate boundary.
///
/// [`LifelineError::Export`]: crate::LifelineError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
