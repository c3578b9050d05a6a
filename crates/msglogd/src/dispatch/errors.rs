//! Result codes and parse failures for the request grammar.
//!
//! Every parse attempt yields either a command or a [`ParseError`] carrying
//! exactly one non-`Ok` [`ResultCode`]. Codes have a stable short name for
//! diagnostics and tests, and a long explanation suitable for clients.

use std::fmt;

use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

/// Outcome classification for a parsed request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum ResultCode {
    /// The line parsed into a command.
    Ok,
    /// The line holds no request type at all.
    TooFewArgs,
    /// `new_log` is missing its author, priority or body.
    NewLogTooFewArgs,
    /// `new_log` named a priority that does not exist.
    NewLogWrongPriority,
    /// `dump_all` is missing its threshold.
    DumpAllTooFewArgs,
    /// `dump_all` named a priority that does not exist.
    DumpAllWrongPriority,
    /// The request type is not one of `new_log`, `dump_all`, `delete_all`.
    UnknownReqType,
    /// No code was assigned. Observing this indicates a parser defect.
    UnknownError,
}

impl ResultCode {
    /// Stable identifier, identical to the variant name.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        self.into()
    }

    /// Human-readable explanation for clients.
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::Ok => "Big success!",
            Self::TooFewArgs => {
                "Too few arguments. Please start the request with argument: <request_type>, \
                 which can be one of the following: new_log, dump_all, delete_all"
            }
            Self::NewLogTooFewArgs => {
                "Too few arguments for request type \"new_log\". Usage: new_log \
                 <username (no whitespace)> <priority (debug/info/warning/critical/error)> \
                 <message body, anything but no leading or trailing whitespace>"
            }
            Self::NewLogWrongPriority => {
                "Invalid priority string for request type \"new_log\". Choose one of the \
                 following: debug/info/warning/critical/error"
            }
            Self::DumpAllTooFewArgs => {
                "Too few arguments for request type \"dump_all\". Usage: dump_all \
                 <priority (debug/info/warning/critical/error)>"
            }
            Self::DumpAllWrongPriority => {
                "Invalid priority string for request type \"dump_all\". Choose one of the \
                 following: debug/info/warning/critical/error"
            }
            Self::UnknownReqType => {
                "Unknown request type. Available request types are: new_log, dump_all, \
                 delete_all"
            }
            Self::UnknownError => "Unknown error. Sorry, poor user.",
        }
    }

    /// Code describing a parse result.
    #[must_use]
    pub fn of<T>(result: &Result<T, ParseError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(error) => error.code(),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.short_name())
    }
}

/// A request line that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .code.explanation())]
pub struct ParseError {
    code: ResultCode,
}

impl ParseError {
    /// Wraps a failure code.
    #[must_use]
    pub const fn new(code: ResultCode) -> Self {
        Self { code }
    }

    /// The failure classification.
    #[must_use]
    pub const fn code(&self) -> ResultCode {
        self.code
    }
}
