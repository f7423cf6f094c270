//! Error types for rule construction and span bookkeeping.

use thiserror::Error;

/// Errors surfaced by the colorizing engine.
///
/// Every variant is raised synchronously by the operation that caused it.
/// Matching itself never fails: anything that could go wrong is rejected when
/// a rule or a span is constructed.
#[derive(Debug, Error)]
pub enum Error {
    /// A span whose start is not strictly before its end.
    #[error("invalid interval {start}..{end}: end must be strictly greater than start")]
    InvalidInterval { start: usize, end: usize },

    /// A span that runs past the text or splits a character.
    #[error("span {start}..{end} does not fit a {len}-byte text on character boundaries")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    /// Color name outside the supported vocabulary.
    #[error("color '{0}' not recognized")]
    UnknownColor(String),

    /// Color info string that does not describe a foreground/background pair.
    #[error("invalid color info '{0}': expected at most a foreground and a background")]
    InvalidColorInfo(String),

    /// Attempt to remove a pattern that was never added.
    #[error("no rule registered for pattern '{0}'")]
    RuleNotFound(String),

    /// The pattern failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
