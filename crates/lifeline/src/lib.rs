//! Lifeline - sequence diagrams from a line-oriented script.
//!
//! Interpretation, layout and SVG rendering for the Lifeline script
//! language. A script opens and closes activities on actors and sends,
//! calls, returns and receives messages between them; blank lines advance a
//! logical clock.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use lifeline_core::{geometry, identifier, semantic};
pub use lifeline_parser::{ParseError, Span};

pub use error::LifelineError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, svg::SvgExporter};
use layout::Layout;

/// Builder for interpreting and rendering Lifeline scripts.
///
/// # Examples
///
/// ```rust
/// use lifeline::{DiagramBuilder, config::AppConfig};
///
/// let source = "start A\n\nsend A m1 hi\n\nstart B\nreceive B m1\n\nstop A\nstop B\n";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Interpret the script into a validated model
/// let model = builder.parse(source).expect("Failed to parse");
///
/// // Render the model to SVG
/// let svg = builder.render_svg(&model).expect("Failed to render");
/// assert!(svg.contains("</svg>"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Interpret a script into a validated semantic model.
    ///
    /// # Errors
    ///
    /// Returns [`LifelineError::Parse`] carrying the first diagnostic and
    /// the source it points into.
    pub fn parse(&self, source: &str) -> Result<semantic::Model, LifelineError> {
        info!("Interpreting script");

        let model = lifeline_parser::parse(source)
            .map_err(|err| LifelineError::new_parse_error(err, source))?;

        debug!(
            actors = model.actor_count(),
            messages = model.messages().count();
            "Script interpreted successfully"
        );
        trace!(model:?; "Interpreted model");

        Ok(model)
    }

    /// Compute the positions of every diagram element.
    pub fn layout(&self, model: &semantic::Model) -> Layout {
        layout::layout(model, self.config.layout())
    }

    /// Render a validated model to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`LifelineError::Config`] for unusable layout dimensions and
    /// [`LifelineError::Export`] if the document cannot be produced.
    pub fn render_svg(&self, model: &semantic::Model) -> Result<String, LifelineError> {
        self.config
            .layout()
            .validate()
            .map_err(LifelineError::Config)?;

        info!("Computing layout");
        let layout = self.layout(model);

        let mut exporter = SvgExporter::new(Vec::new());
        exporter.export_layout(&layout)?;
        let svg = String::from_utf8(exporter.into_inner())
            .map_err(|err| export::Error::Render(err.to_string()))?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
