//! CLI logic for the Lifeline sequence diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, ReportStyle, STDIO};

use std::{
    fs,
    io::{self, Write as _},
};

use log::info;

use lifeline::{DiagramBuilder, LifelineError};

/// Run the Lifeline CLI application
///
/// Reads the script from the input path (or standard input), renders it
/// and writes the SVG to the output path (or standard output). Nothing is
/// written when the script is rejected.
///
/// # Errors
///
/// Returns `LifelineError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Interpretation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LifelineError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing script"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = if args.input == STDIO {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(&args.input)?
    };

    let builder = DiagramBuilder::new(app_config);
    let model = builder.parse(&source)?;
    let svg = builder.render_svg(&model)?;

    if args.output == STDIO {
        let mut stdout = io::stdout().lock();
        stdout.write_all(svg.as_bytes())?;
        stdout.flush()?;
    } else {
        fs::write(&args.output, svg)?;
    }

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
