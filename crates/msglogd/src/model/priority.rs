//! Severity levels attached to stored messages.

use std::str::FromStr;

use strum::{Display, EnumIter, IntoStaticStr};
use thiserror::Error;

/// Severity of a log message, ordered from least to most severe.
///
/// The wire form of each level is its lowercase name. Lookup is an exact,
/// case-sensitive match: `Info` or `INFO` are not priorities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    /// Diagnostic chatter.
    Debug,
    /// Routine events.
    Info,
    /// Something unexpected that did not stop the caller.
    Warning,
    /// A serious fault that needs attention.
    Critical,
    /// The most severe level.
    Error,
}

impl Priority {
    /// Every level in ascending order of severity.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Critical,
        Self::Error,
    ];

    /// Resolves a wire token to a level. `None` marks an invalid token.
    #[must_use]
    pub fn lookup(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == token)
    }

    /// Canonical lowercase wire form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Position in the severity order; `Debug` is `0`.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns `true` when a message at this level passes `threshold`.
    #[must_use]
    pub const fn meets(self, threshold: Self) -> bool {
        self.ordinal() >= threshold.ordinal()
    }
}

/// A token that does not name any [`Priority`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority '{token}'")]
pub struct UnknownPriority {
    token: String,
}

impl UnknownPriority {
    /// The rejected token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::lookup(token).ok_or_else(|| UnknownPriority {
            token: token.to_owned(),
        })
    }
}
