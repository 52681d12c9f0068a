//! Typed commands built from lexed lines.
//!
//! The first field of a line selects the command; the remaining fields are
//! positional arguments. Commands that carry free text join every field after
//! their positional arguments with single spaces.

use lifeline_core::semantic::MessageKind;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    lexer::SourceLine,
    span::{Span, Spanned},
};

/// How many arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    fn describe(self) -> String {
        match self {
            Arity::Exactly(n) => format!("{n}"),
            Arity::AtLeast(n) => format!("at least {n}"),
        }
    }
}

/// A single script command with the spans of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    Start {
        actor: Spanned<&'a str>,
    },
    Stop {
        actor: Spanned<&'a str>,
    },
    Label {
        actor: Spanned<&'a str>,
        text: Spanned<String>,
    },
    /// `send`, `call` and `return` share their shape.
    Send {
        kind: MessageKind,
        sender: Spanned<&'a str>,
        message: Spanned<&'a str>,
        text: Spanned<String>,
    },
    Receive {
        receiver: Spanned<&'a str>,
        message: Spanned<&'a str>,
    },
}

impl<'a> Command<'a> {
    /// Build a command from a non-blank line.
    pub fn from_line(line: &SourceLine<'a>) -> Result<Self> {
        let Some((keyword, args)) = line.fields().split_first() else {
            return Err(Diagnostic::error("empty line has no command")
                .with_code(ErrorCode::E001)
                .with_label(line.span(), "no command"));
        };

        let arity = match **keyword {
            "start" | "stop" => Arity::Exactly(1),
            "receive" => Arity::Exactly(2),
            "label" => Arity::AtLeast(2),
            "send" | "call" | "return" => Arity::AtLeast(3),
            other => {
                return Err(Diagnostic::error(format!("unknown command: `{other}`"))
                    .with_code(ErrorCode::E001)
                    .with_label(keyword.span(), ErrorCode::E001.description())
                    .with_help(
                        "valid commands are `start`, `stop`, `label`, `send`, `call`, `return` and `receive`",
                    ));
            }
        };

        if !arity.accepts(args.len()) {
            return Err(Diagnostic::error(format!(
                "wrong number of arguments for `{}`: expected {}, got {}",
                **keyword,
                arity.describe(),
                args.len()
            ))
            .with_code(ErrorCode::E002)
            .with_label(line.span(), ErrorCode::E002.description())
            .with_help(usage(keyword)));
        }

        let command = match **keyword {
            "start" => Command::Start { actor: args[0] },
            "stop" => Command::Stop { actor: args[0] },
            "label" => Command::Label {
                actor: args[0],
                text: join_text(&args[1..]),
            },
            "receive" => Command::Receive {
                receiver: args[0],
                message: args[1],
            },
            "send" | "call" | "return" => Command::Send {
                kind: match **keyword {
                    "send" => MessageKind::Send,
                    "call" => MessageKind::Call,
                    _ => MessageKind::Return,
                },
                sender: args[0],
                message: args[1],
                text: join_text(&args[2..]),
            },
            _ => unreachable!("keyword validated above"),
        };

        Ok(command)
    }

    /// The script keyword of this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Start { .. } => "start",
            Command::Stop { .. } => "stop",
            Command::Label { .. } => "label",
            Command::Send { kind, .. } => kind.keyword(),
            Command::Receive { .. } => "receive",
        }
    }
}

/// Join free-text fields with single spaces, spanning all of them.
fn join_text(fields: &[Spanned<&str>]) -> Spanned<String> {
    let text = fields
        .iter()
        .map(|field| *field.inner())
        .collect::<Vec<_>>()
        .join(" ");
    let span = fields
        .iter()
        .map(Spanned::span)
        .reduce(|acc, span| acc.union(span))
        .unwrap_or_else(Span::default);
    Spanned::new(text, span)
}

fn usage(keyword: &str) -> String {
    let form = match keyword {
        "start" | "stop" => "<actor>",
        "receive" => "<actor> <message>",
        "label" => "<actor> <text...>",
        _ => "<actor> <message> <text...>",
    };
    format!("usage: `{keyword} {form}`")
}
