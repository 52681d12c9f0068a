//! Command-line argument definitions for the Lifeline CLI.

use clap::{Parser, ValueEnum};

/// Path value meaning standard input or standard output.
pub const STDIO: &str = "-";

/// How failures are reported on standard error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportStyle {
    /// One line: `error[CODE]: message (line N)`.
    #[default]
    Plain,
    /// Graphical report with a source snippet and labels.
    Fancy,
}

/// Render a Lifeline sequence script to SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input script, `-` for standard input
    #[arg(default_value = STDIO)]
    pub input: String,

    /// Path to the output SVG file, `-` for standard output
    #[arg(short, long, default_value = STDIO)]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Diagnostic format
    #[arg(long, value_enum, default_value_t = ReportStyle::Plain)]
    pub report: ReportStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_stdio() {
        let args = Args::try_parse_from(["lifeline"]).unwrap();
        assert_eq!(args.input, STDIO);
        assert_eq!(args.output, STDIO);
        assert_eq!(args.log_level, "warn");
        assert_eq!(args.report, ReportStyle::Plain);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "lifeline",
            "login.seq",
            "-o",
            "login.svg",
            "--config",
            "custom.toml",
            "--report",
            "fancy",
        ])
        .unwrap();
        assert_eq!(args.input, "login.seq");
        assert_eq!(args.output, "login.svg");
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert_eq!(args.report, ReportStyle::Fancy);
    }

    #[test]
    fn test_unknown_report_style_rejected() {
        assert!(Args::try_parse_from(["lifeline", "--report", "json"]).is_err());
    }
}
