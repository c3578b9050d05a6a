//! Request grammar: turns one sanitised line into a typed [`Command`].
//!
//! Parsing runs in two passes. The first pass splits off the leading verb
//! token and keeps the remainder as the verb's arguments. The second pass
//! hands the remainder to the verb's own sub-grammar:
//!
//! ```text
//! new_log    <author> <priority> <body...>
//! dump_all   <priority>
//! delete_all
//! ```
//!
//! Fields are separated by any run of ASCII whitespace and leading whitespace
//! is always tolerated. Other Unicode spaces, such as U+00A0, are ordinary
//! token characters. Argument counts are checked before priority tokens are
//! resolved, so `new_log Joe critical` is `NewLogTooFewArgs` even though
//! `critical` is valid.

use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

use crate::model::{Message, Priority};

use super::errors::{ParseError, ResultCode};

/// Request types recognised as the first token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Verb {
    /// Append a message.
    NewLog,
    /// Dump messages at or above a threshold.
    DumpAll,
    /// Remove every message.
    DeleteAll,
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append `message` to the store.
    NewLog {
        /// Record to append.
        message: Message,
    },
    /// Render every message whose priority is at least `threshold`.
    DumpAll {
        /// Inclusive lower bound.
        threshold: Priority,
    },
    /// Clear the store.
    DeleteAll,
}

impl Command {
    /// Parses a request line.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] whose code identifies the first rule the line
    /// broke.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let (verb_token, arguments) =
            split_token(line).ok_or(ParseError::new(ResultCode::TooFewArgs))?;
        let verb = Verb::from_str(verb_token)
            .map_err(|_| ParseError::new(ResultCode::UnknownReqType))?;

        match verb {
            Verb::NewLog => parse_new_log(arguments),
            Verb::DumpAll => parse_dump_all(arguments),
            Verb::DeleteAll => Ok(Self::DeleteAll),
        }
    }

    /// Request type of this command.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        match self {
            Self::NewLog { .. } => Verb::NewLog,
            Self::DumpAll { .. } => Verb::DumpAll,
            Self::DeleteAll => Verb::DeleteAll,
        }
    }
}

/// Debug rendering, e.g. `[NewLog] [u[joe] p[info] m[hi]]`.
impl fmt::Display for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewLog { message } => write!(formatter, "[NewLog] [{message}]"),
            Self::DumpAll { threshold } => write!(formatter, "[DumpAll] [{threshold}]"),
            Self::DeleteAll => formatter.write_str("[DeleteAll]"),
        }
    }
}

fn parse_new_log(arguments: &str) -> Result<Command, ParseError> {
    let too_few = ParseError::new(ResultCode::NewLogTooFewArgs);
    let (author, rest) = split_token(arguments).ok_or(too_few)?;
    let (priority_token, rest) = split_token(rest).ok_or(too_few)?;
    let body = separated_remainder(rest).ok_or(too_few)?;

    let priority = Priority::lookup(priority_token)
        .ok_or(ParseError::new(ResultCode::NewLogWrongPriority))?;

    Ok(Command::NewLog {
        message: Message::new(body, author, priority),
    })
}

fn parse_dump_all(arguments: &str) -> Result<Command, ParseError> {
    // Tokens after the threshold are ignored.
    let (priority_token, _) =
        split_token(arguments).ok_or(ParseError::new(ResultCode::DumpAllTooFewArgs))?;
    let threshold = Priority::lookup(priority_token)
        .ok_or(ParseError::new(ResultCode::DumpAllWrongPriority))?;
    Ok(Command::DumpAll { threshold })
}

/// Splits the first whitespace-delimited token off `input`.
///
/// Leading whitespace is skipped. The remainder starts at the whitespace
/// that ended the token (or is empty). Returns `None` if no token exists.
fn split_token(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim_start_matches(is_separator);
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.find(is_separator).unwrap_or(trimmed.len());
    Some(trimmed.split_at(end))
}

/// Returns the text after a mandatory whitespace separator.
///
/// The body keeps its internal whitespace; it must contain at least one
/// non-whitespace character.
fn separated_remainder(rest: &str) -> Option<&str> {
    if !rest.starts_with(is_separator) {
        return None;
    }
    let body = rest.trim_start_matches(is_separator);
    (!body.is_empty()).then_some(body)
}

fn is_separator(character: char) -> bool {
    character.is_ascii_whitespace()
}
