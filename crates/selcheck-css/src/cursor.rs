//! Token cursor over a loaded selector string.
//!
//! The cursor owns the text, the current byte offset and a cache of the raw
//! tokens fetched so far, keyed by offset. Comment tokens are skipped by an
//! explicit normalization step that runs before every read, so the grammar
//! and any external consumer only ever see significant tokens.
//!
//! ```
//! use selcheck_css::cursor::Cursor;
//!
//! let mut cursor = Cursor::new();
//! cursor.set_string("a/* note */.b");
//! let mut seen = Vec::new();
//! while cursor.valid() {
//!     seen.push(cursor.current().to_string());
//!     cursor.next().unwrap();
//! }
//! assert_eq!(seen, ["IDENT \"a\"", "'.'", "IDENT \"b\""]);
//! ```

use std::collections::HashMap;

use crate::error::{Result, SelectorError};
use crate::tokenizer::{Css3Tokenizer, Token, Tokenizer};

/// Forward iteration over the tokens of a loaded string.
#[derive(Debug, Clone)]
pub struct Cursor<T = Css3Tokenizer> {
    /// Produces the token at a given offset.
    tokenizer: T,
    /// The currently loaded text.
    source: String,
    /// Byte position into `source`. Never exceeds `source.len()`.
    offset: usize,
    /// Raw tokens (comments included) by the offset they start at.
    /// Valid only for the currently loaded `source`.
    cache: HashMap<usize, Token>,
    /// Skip comment tokens when reading.
    ignore_comments: bool,
}

impl Cursor<Css3Tokenizer> {
    /// Create a cursor backed by the Selectors Level 3 tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tokenizer(Css3Tokenizer)
    }
}

impl Default for Cursor<Css3Tokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> Cursor<T> {
    /// Create a cursor backed by a custom tokenizer.
    #[must_use]
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            tokenizer,
            source: String::new(),
            offset: 0,
            cache: HashMap::new(),
            ignore_comments: true,
        }
    }

    /// Load a new string and rewind to its start.
    pub fn set_string(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.rewind();
    }

    /// The currently loaded text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The tokenizer backing this cursor.
    #[must_use]
    pub const fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Whether comment tokens are skipped when reading.
    #[must_use]
    pub const fn ignores_comments(&self) -> bool {
        self.ignore_comments
    }

    /// Turn comment skipping on or off.
    ///
    /// The cache holds raw tokens, so switching modes never invalidates it.
    pub fn set_ignore_comments(&mut self, ignore: bool) {
        self.ignore_comments = ignore;
    }

    /// The token at the current offset.
    ///
    /// With comment skipping on, the offset first moves past any run of
    /// comment tokens, so after this call [`key`](Self::key) points at the
    /// returned token.
    pub fn current(&mut self) -> &Token {
        if self.ignore_comments {
            self.skip_comments();
        }
        self.fetch(self.offset)
    }

    /// Consume the current token.
    ///
    /// Does nothing at the end of input.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::MalformedToken`] if the tokenizer produced a
    /// zero-length token that is not [`Token::End`].
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let token = self.current();
        if token.is_end() {
            return Ok(());
        }
        let len = token.len();
        if len == 0 {
            let token = token.to_string();
            return Err(SelectorError::MalformedToken {
                token,
                offset: self.offset,
            });
        }
        self.offset = (self.offset + len).min(self.source.len());
        Ok(())
    }

    /// Move to `position`, clamped to the length of the loaded text.
    pub fn seek(&mut self, position: usize) {
        self.offset = position.min(self.source.len());
    }

    /// Move back to the start of the text and drop every cached token.
    pub fn rewind(&mut self) {
        self.cache.clear();
        self.offset = 0;
    }

    /// Returns true unless the current token is [`Token::End`].
    pub fn valid(&mut self) -> bool {
        !self.current().is_end()
    }

    /// The current byte offset.
    #[must_use]
    pub const fn key(&self) -> usize {
        self.offset
    }

    /// Number of raw tokens cached for the loaded text.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Iterate over the remaining tokens, starting at the current offset.
    ///
    /// Each item is the token together with the offset it starts at. The
    /// iterator stops before [`Token::End`], or after yielding the first error.
    pub fn tokens(&mut self) -> Tokens<'_, T> {
        Tokens {
            cursor: self,
            failed: false,
        }
    }

    fn fetch(&mut self, offset: usize) -> &Token {
        let Self {
            tokenizer,
            source,
            cache,
            ..
        } = self;
        let text = source.as_str();
        cache
            .entry(offset)
            .or_insert_with(|| tokenizer.token_at(text, offset))
    }

    fn skip_comments(&mut self) {
        loop {
            let offset = self.offset;
            let token = self.fetch(offset);
            if !token.is_comment() {
                return;
            }
            let len = token.len();
            let next = (offset + len).min(self.source.len());
            if next == offset {
                return;
            }
            self.offset = next;
        }
    }
}

/// Iterator returned by [`Cursor::tokens`].
#[derive(Debug)]
pub struct Tokens<'c, T> {
    cursor: &'c mut Cursor<T>,
    failed: bool,
}

impl<T: Tokenizer> Iterator for Tokens<'_, T> {
    type Item = Result<(usize, Token)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.cursor.current().clone();
        if token.is_end() {
            return None;
        }
        let offset = self.cursor.key();
        if let Err(err) = self.cursor.next() {
            self.failed = true;
            return Some(Err(err));
        }
        Some(Ok((offset, token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Symbol;
    use std::cell::Cell;

    #[test]
    fn test_cached_tokens_are_not_refetched() {
        let calls = Cell::new(0);
        let counting = |text: &str, offset: usize| {
            calls.set(calls.get() + 1);
            Css3Tokenizer.token_at(text, offset)
        };
        let mut cursor = Cursor::with_tokenizer(counting);
        cursor.set_string("div");

        let _ = cursor.current();
        let _ = cursor.current();
        assert!(cursor.valid());
        assert_eq!(calls.get(), 1);

        cursor.next().unwrap();
        assert!(!cursor.valid());
        assert_eq!(calls.get(), 2);

        cursor.seek(0);
        let _ = cursor.current();
        assert_eq!(calls.get(), 2);
        assert_eq!(cursor.cache_len(), 2);
    }

    #[test]
    fn test_rewind_clears_cache() {
        let mut cursor = Cursor::new();
        cursor.set_string("a.b");
        cursor.next().unwrap();
        let _ = cursor.current();
        assert_eq!(cursor.cache_len(), 2);

        cursor.rewind();
        assert_eq!(cursor.key(), 0);
        assert_eq!(cursor.cache_len(), 0);
    }

    #[test]
    fn test_skip_comments_moves_offset() {
        let mut cursor = Cursor::new();
        cursor.set_string("/* a *//* b */x");
        assert_eq!(cursor.key(), 0);
        assert_eq!(cursor.current(), &Token::symbol(Symbol::Ident, "x"));
        assert_eq!(cursor.key(), 14);
    }

    #[test]
    fn test_seek_clamps_to_length() {
        let mut cursor = Cursor::new();
        cursor.set_string("abc");
        cursor.seek(99);
        assert_eq!(cursor.key(), 3);
        assert!(!cursor.valid());
    }
}
