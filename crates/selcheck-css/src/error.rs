//! Errors raised while walking or validating a selector string.

use thiserror::Error;

/// A hard failure from the cursor or the grammar.
///
/// Speculative mismatches never produce one of these; they are reported as
/// `Ok(false)` by the accept primitives and only the top-level driver turns
/// a failed match into [`SelectorError::Parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The input does not conform to the selector grammar.
    #[error("parse error at {offset}: expected {expected}, found {found} (while matching {context})")]
    Parse {
        /// The top-level term whose match failed, e.g. `selector` or `COMMA`.
        context: String,
        /// The terms that were expected at `offset`, joined with ` | `.
        expected: String,
        /// The token found at `offset`.
        found: String,
        /// Byte offset of the farthest point the grammar reached.
        offset: usize,
    },

    /// The tokenizer returned a zero-length token that is not the end sentinel.
    #[error("malformed token {token} at {offset}: current token has no length")]
    MalformedToken {
        /// The offending token.
        token: String,
        /// Byte offset the token was returned for.
        offset: usize,
    },
}

impl SelectorError {
    /// Byte offset the error refers to.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Parse { offset, .. } | Self::MalformedToken { offset, .. } => *offset,
        }
    }

    /// Returns true for grammar mismatches, false for tokenizer contract violations.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = SelectorError> = core::result::Result<T, E>;
