//! The immutable log record.

use std::fmt;

use super::Priority;

/// A single log record as submitted by a client.
///
/// `author` is a non-empty token without whitespace and `body` is non-empty
/// printable text; the request parser only builds messages that satisfy both.
/// The priority is always a real level, never an "unknown" marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    body: String,
    author: String,
    priority: Priority,
}

impl Message {
    /// Builds a message from its parts.
    #[must_use]
    pub fn new(body: impl Into<String>, author: impl Into<String>, priority: Priority) -> Self {
        Self {
            body: body.into(),
            author: author.into(),
            priority,
        }
    }

    /// Message text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Submitting user.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Severity level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

/// Canonical rendering: `u[<author>] p[<priority>] m[<body>]`.
impl fmt::Display for Message {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "u[{}] p[{}] m[{}]",
            self.author, self.priority, self.body
        )
    }
}
