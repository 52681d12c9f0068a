//! Error codes for the Lifeline diagnostic system.
//!
//! Error codes are organized by category:
//! - `E0xx` - Syntax errors
//! - `E1xx` - State errors
//! - `E2xx` - Causality errors
//! - `E3xx` - Completion errors (detected at end of input)

use std::fmt;

/// Broad classification of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The line itself is malformed.
    Syntax,
    /// The command is illegal in the actor's current state.
    State,
    /// The command contradicts the order in which messages flow.
    Causality,
    /// Something was left unfinished when the input ended.
    Completion,
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Unknown command.
    ///
    /// The first field of a line is not one of `start`, `stop`, `label`,
    /// `send`, `call`, `return` or `receive`.
    E001,

    /// Wrong number of arguments.
    E002,

    // =========================================================================
    // State Errors (E1xx)
    // =========================================================================
    /// Actor not active.
    ///
    /// An actor tried to send or receive without an open activity.
    E100,

    /// Nothing to stop.
    ///
    /// `stop` was issued for an actor without an open activity.
    E101,

    /// Duplicate message name.
    ///
    /// Message names are one-shot: once used they cannot be sent again.
    E102,

    /// Sender blocked by call.
    ///
    /// An actor waiting for the answer to a call tried to send, call or return.
    E103,

    // =========================================================================
    // Causality Errors (E2xx)
    // =========================================================================
    /// Unknown message.
    ///
    /// A message was received before anybody sent it.
    E200,

    /// Return without outstanding call.
    E201,

    /// Receive while blocked by call.
    ///
    /// An actor waiting for a return tried to receive something else.
    E202,

    /// Return from wrong actor.
    ///
    /// A return must come from the actor that received the call.
    E203,

    /// Message already received.
    E204,

    // =========================================================================
    // Completion Errors (E3xx)
    // =========================================================================
    /// Unfinished activity at end of input.
    E300,

    /// Message never received.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            // State errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Causality errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            // Completion errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unknown command",
            ErrorCode::E002 => "wrong number of arguments",
            ErrorCode::E100 => "actor not active",
            ErrorCode::E101 => "nothing to stop",
            ErrorCode::E102 => "duplicate message name",
            ErrorCode::E103 => "sender blocked by call",
            ErrorCode::E200 => "unknown message",
            ErrorCode::E201 => "return without outstanding call",
            ErrorCode::E202 => "receive while blocked by call",
            ErrorCode::E203 => "return from wrong actor",
            ErrorCode::E204 => "message already received",
            ErrorCode::E300 => "unfinished activity",
            ErrorCode::E301 => "message never received",
        }
    }

    /// Returns the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::E001 | ErrorCode::E002 => ErrorCategory::Syntax,
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103 => {
                ErrorCategory::State
            }
            ErrorCode::E200
            | ErrorCode::E201
            | ErrorCode::E202
            | ErrorCode::E203
            | ErrorCode::E204 => ErrorCategory::Causality,
            ErrorCode::E300 | ErrorCode::E301 => ErrorCategory::Completion,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
        assert_eq!(ErrorCode::E301.to_string(), "E301");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unknown command");
        assert_eq!(ErrorCode::E103.description(), "sender blocked by call");
        assert_eq!(ErrorCode::E300.description(), "unfinished activity");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E002.category(), ErrorCategory::Syntax);
        assert_eq!(ErrorCode::E101.category(), ErrorCategory::State);
        assert_eq!(ErrorCode::E204.category(), ErrorCategory::Causality);
        assert_eq!(ErrorCode::E301.category(), ErrorCategory::Completion);
    }
}
