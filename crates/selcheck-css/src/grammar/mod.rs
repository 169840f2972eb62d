//! Selector grammar per [Selectors Level 3 § 10.1 Grammar](https://www.w3.org/TR/selectors-3/#grammar).
//!
//! "The grammar below defines the syntax of Selectors. It is globally LL(1)
//! and can be locally LL(2) (but note that most UAs should not use it
//! directly, since it doesn't express the parsing conventions)."
//!
//! The grammar only recognizes; it does not build a selector tree. Use
//! [`SelectorValidator::parse`] (or [`validate`]) to check a selector group,
//! and [`SelectorValidator::set_string`] to walk its tokens without running
//! the grammar.

/// The term dispatcher and its error gating.
pub mod parser;
/// The productions.
mod rules;
/// Grammar terms and ordered-choice lists.
pub mod term;

pub use parser::{Parser, TraceEntry};
pub use term::{InvalidTerm, Rule, Term, alternatives};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::tokenizer::{Css3Tokenizer, Tokenizer};

/// Validates selector groups and exposes the token cursor they were read from.
#[derive(Debug, Clone)]
pub struct SelectorValidator<T = Css3Tokenizer> {
    cursor: Cursor<T>,
}

impl SelectorValidator<Css3Tokenizer> {
    /// Create a validator backed by the Selectors Level 3 tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tokenizer(Css3Tokenizer)
    }
}

impl Default for SelectorValidator<Css3Tokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> SelectorValidator<T> {
    /// Create a validator backed by a custom tokenizer.
    #[must_use]
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            cursor: Cursor::with_tokenizer(tokenizer),
        }
    }

    /// Load `text` for token iteration without validating it.
    pub fn set_string(&mut self, text: impl Into<String>) -> &mut Cursor<T> {
        self.cursor.set_string(text);
        &mut self.cursor
    }

    /// Load `text` and validate it as a `selectors_group`.
    ///
    /// On success the cursor is at the end of the input.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Parse`](crate::error::SelectorError::Parse)
    /// if the text is not a selector group this grammar recognizes, or
    /// [`SelectorError::MalformedToken`](crate::error::SelectorError::MalformedToken)
    /// if the tokenizer returns a zero-length token.
    pub fn parse(&mut self, text: impl Into<String>) -> Result<()> {
        self.cursor.set_string(text);
        Parser::new(&mut self.cursor).parse_selectors_group()
    }

    /// [`parse`](Self::parse), also returning every production attempt.
    pub fn parse_traced(&mut self, text: impl Into<String>) -> (Result<()>, Vec<TraceEntry>) {
        self.cursor.set_string(text);
        let mut parser = Parser::new(&mut self.cursor);
        parser.set_tracing(true);
        let result = parser.parse_selectors_group();
        (result, parser.take_trace())
    }

    /// The cursor holding the most recently loaded text.
    #[must_use]
    pub const fn cursor(&self) -> &Cursor<T> {
        &self.cursor
    }

    /// Mutable access to the cursor, e.g. to toggle comment visibility.
    pub const fn cursor_mut(&mut self) -> &mut Cursor<T> {
        &mut self.cursor
    }
}

/// Validate `text` with the Selectors Level 3 tokenizer.
///
/// # Errors
///
/// See [`SelectorValidator::parse`].
pub fn validate(text: &str) -> Result<()> {
    SelectorValidator::new().parse(text)
}

/// Returns true if `text` is a selector group this grammar recognizes.
#[must_use]
pub fn is_valid(text: &str) -> bool {
    validate(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{Symbol, Token};

    #[test]
    fn test_set_string_does_not_validate() {
        let mut validator = SelectorValidator::new();
        let cursor = validator.set_string("div p ,,");
        assert_eq!(cursor.current(), &Token::symbol(Symbol::Ident, "div"));
    }

    #[test]
    fn test_parse_leaves_cursor_at_end() {
        let mut validator = SelectorValidator::new();
        validator.parse("a.b, #c").unwrap();
        assert!(!validator.cursor_mut().valid());
        assert_eq!(validator.cursor().key(), 7);
    }

    #[test]
    fn test_parse_restores_comment_mode() {
        let mut validator = SelectorValidator::new();
        validator.cursor_mut().set_ignore_comments(false);
        validator.parse("a/* x */").unwrap();
        assert!(!validator.cursor().ignores_comments());
    }

    #[test]
    fn test_traced_parse_records_top_level_rule_first() {
        let (result, trace) = SelectorValidator::new().parse_traced("div");
        result.unwrap();
        let first = &trace[0];
        assert_eq!((first.rule, first.depth, first.matched), (Rule::SelectorsGroup, 0, true));
        assert!(trace.iter().skip(1).all(|entry| entry.depth > 0));
    }
}
