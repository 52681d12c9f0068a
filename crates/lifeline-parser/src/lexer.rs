//! Line lexer for Lifeline scripts.
//!
//! The lexer splits the source into [`SourceLine`]s and each line into
//! whitespace separated fields, keeping the byte span of every field so that
//! diagnostics can point at the exact token.
//!
//! The public entry point is [`tokenize`].

use winnow::{
    Parser as _,
    combinator::alt,
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location},
    token::take_while,
};

use crate::span::{Span, Spanned};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Field(&'a str),
    Whitespace,
    Newline,
}

/// One physical line of the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceLine<'a> {
    number: usize,
    span: Span,
    fields: Vec<Spanned<&'a str>>,
}

impl<'a> SourceLine<'a> {
    fn new(number: usize, start: usize) -> Self {
        Self {
            number,
            span: Span::new(start..start),
            fields: Vec::new(),
        }
    }

    /// 1-based line number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The span of the line, excluding its terminating newline.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn fields(&self) -> &[Spanned<&'a str>] {
        &self.fields
    }

    /// A line without fields. Blank lines advance the logical clock.
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse a run of non-whitespace characters
fn field<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| !c.is_whitespace())
        .map(Token::Field)
        .parse_next(input)
}

/// Parse whitespace (spaces, tabs, carriage returns, but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<Spanned<Token<'a>>> {
    let start_pos = input.current_token_start();

    let token = alt((
        newline,    // Must come before whitespace
        whitespace, // Everything blank except newlines
        field,      // Any other run of characters
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(Spanned::new(token, Span::new(start_pos..end_pos)))
}

/// Split `source` into lines of spanned fields.
///
/// Every character is a newline, other whitespace or part of a field, so
/// tokenizing cannot fail; [`positioned_token`] only errors on empty input.
/// A trailing newline does not produce an extra empty line, a final line
/// without a newline is kept.
pub(crate) fn tokenize(source: &str) -> Vec<SourceLine<'_>> {
    let mut input = LocatingSlice::new(source);
    let mut lines = Vec::new();
    let mut current = SourceLine::new(1, 0);

    while let Ok(token) = positioned_token(&mut input) {
        match *token.inner() {
            Token::Field(text) => current.fields.push(Spanned::new(text, token.span())),
            Token::Whitespace => {}
            Token::Newline => {
                let end = token.span().start();
                current.span = Span::new(current.span.start()..end);
                let next = SourceLine::new(current.number + 1, token.span().end());
                lines.push(std::mem::replace(&mut current, next));
            }
        }
    }

    if current.span.start() < source.len() {
        current.span = Span::new(current.span.start()..source.len());
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_texts<'a>(line: &SourceLine<'a>) -> Vec<&'a str> {
        line.fields().iter().map(|field| *field.inner()).collect()
    }

    #[test]
    fn test_single_token() {
        let mut input = LocatingSlice::new("start");
        let token = positioned_token(&mut input).unwrap();
        assert_eq!(*token.inner(), Token::Field("start"));
        assert_eq!(token.span(), Span::new(0..5));
    }

    #[test]
    fn test_fields_split_on_any_whitespace() {
        let lines = tokenize("send\tA  m1   hello \t world");
        assert_eq!(lines.len(), 1);
        assert_eq!(
            field_texts(&lines[0]),
            ["send", "A", "m1", "hello", "world"]
        );
    }

    #[test]
    fn test_span_tracking() {
        let lines = tokenize("start A\nstop  A\n");
        assert_eq!(lines.len(), 2);

        let first = lines[0].fields();
        assert_eq!(first[0].span(), Span::new(0..5));
        assert_eq!(first[1].span(), Span::new(6..7));

        let second = lines[1].fields();
        assert_eq!(second[0].span(), Span::new(8..12));
        assert_eq!(second[1].span(), Span::new(14..15));
        assert_eq!(lines[1].span(), Span::new(8..15));
    }

    #[test]
    fn test_blank_lines() {
        let lines = tokenize("start A\n\n   \nstop A");
        assert_eq!(lines.len(), 4);
        assert!(!lines[0].is_blank());
        assert!(lines[1].is_blank());
        assert!(lines[2].is_blank());
        assert!(!lines[3].is_blank());
        assert_eq!(lines[3].number(), 4);
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        assert_eq!(tokenize("start A\n").len(), 1);
        assert_eq!(tokenize("start A").len(), 1);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let lines = tokenize("start A\r\n\r\nstop A\r\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(field_texts(&lines[0]), ["start", "A"]);
        assert!(lines[1].is_blank());
        assert_eq!(field_texts(&lines[2]), ["stop", "A"]);
    }

    #[test]
    fn test_control_characters_become_fields() {
        let lines = tokenize("\u{0} \u{1b}[1m\u{7f}");
        assert_eq!(field_texts(&lines[0]), ["\u{0}", "\u{1b}[1m\u{7f}"]);
    }

    #[test]
    fn test_unicode_fields() {
        let lines = tokenize("label A Größe ✓");
        assert_eq!(field_texts(&lines[0]), ["label", "A", "Größe", "✓"]);
        let check = lines[0].fields()[3];
        assert_eq!(check.span().len(), '✓'.len_utf8());
    }
}
