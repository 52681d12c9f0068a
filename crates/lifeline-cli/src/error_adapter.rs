//! Error adapter for reporting [`LifelineError`]s.
//!
//! Bridges the library's error types to miette's graphical reports and
//! provides the plain single-line format used by default.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use lifeline::LifelineError;
use lifeline_parser::{Span, error::Diagnostic};

use crate::args::ReportStyle;

/// Adapter for a single interpreter diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`LifelineError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a LifelineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LifelineError::Io(_) => "lifeline::io",
            LifelineError::Parse { .. } => return None,
            LifelineError::Config(_) => "lifeline::config",
            LifelineError::Export(_) => "lifeline::export",
        };
        Some(Box::new(code))
    }
}

/// An error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Wrap a [`LifelineError`] for miette.
pub fn to_reportable(err: &LifelineError) -> Reportable<'_> {
    match err {
        LifelineError::Parse {
            err: parse_err,
            src,
        } => Reportable::Diagnostic(DiagnosticAdapter::new(parse_err.diagnostic(), src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Format an error as a single line.
///
/// Parse errors read `error[E102]: cannot send message `m1` multiple times
/// (line 3)`, everything else `error: <message>`.
pub fn format_plain(err: &LifelineError) -> String {
    match (err, err.line_number()) {
        (LifelineError::Parse { err, .. }, Some(line)) => format!("{err} (line {line})"),
        (LifelineError::Parse { err, .. }, None) => err.to_string(),
        _ => format!("error: {err}"),
    }
}

/// Render `err` in the requested style.
pub fn report(err: &LifelineError, style: ReportStyle) -> String {
    match style {
        ReportStyle::Plain => format_plain(err),
        ReportStyle::Fancy => {
            let mut writer = String::new();
            let handler = GraphicalReportHandler::new();
            match handler.render_report(&mut writer, &to_reportable(err)) {
                Ok(()) => writer,
                Err(_) => format_plain(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lifeline_parser::error::{ErrorCode, ParseError};

    use super::*;

    fn parse_error(source: &str) -> LifelineError {
        lifeline::DiagramBuilder::default()
            .parse(source)
            .expect_err("script should be rejected")
    }

    #[test]
    fn test_plain_report_names_code_and_line() {
        let err = parse_error("start A\nsend A m1 hi\nsend A m1 bye\n");
        assert_eq!(
            format_plain(&err),
            "error[E102]: cannot send message `m1` multiple times (line 3)"
        );
    }

    #[test]
    fn test_plain_report_for_other_errors() {
        let err = LifelineError::Config("bad value".to_string());
        assert_eq!(
            format_plain(&err),
            "error: Configuration error: bad value"
        );
    }

    #[test]
    fn test_fancy_report_contains_snippet() {
        let err = parse_error("start A\ncall A m1 req\nsend A m2 oops\n");
        let rendered = report(&err, ReportStyle::Fancy);
        assert!(rendered.contains("E103"), "{rendered}");
        assert!(rendered.contains("sender is blocked"), "{rendered}");
        assert!(rendered.contains("call sent here"), "{rendered}");
    }

    #[test]
    fn test_parse_error_becomes_diagnostic() {
        let diag = Diagnostic::error("test error")
            .with_code(ErrorCode::E300)
            .with_label(Span::new(0..5), "here")
            .with_help("try this");
        let err = LifelineError::new_parse_error(ParseError::from(diag), "hello");

        match to_reportable(&err) {
            Reportable::Diagnostic(d) => assert_eq!(d.to_string(), "test error"),
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_non_parse_error() {
        let err = LifelineError::Config("bad value".to_string());
        match to_reportable(&err) {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
                assert_eq!(e.code().unwrap().to_string(), "lifeline::config");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }
}
