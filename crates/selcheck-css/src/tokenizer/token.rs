//! Selector token types per [Selectors Level 3 § 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex).
//!
//! "The following is the tokenizer, written in Flex (see \[FLEX\]) notation.
//! The tokenizer is case-insensitive."
//!
//! Every scanner rule that returns a named token maps to a [`Symbol`]. The
//! final catch-all rule (`.  return *yytext;`) maps to [`Token::Literal`].

use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// A named lexical class from the selector scanner.
///
/// Names display and parse as the upper-case token names used by the
/// grammar, e.g. `IDENT`, `PREFIXMATCH`, `COMMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    /// `[ \t\r\n\f]+`
    S,
    /// `"~="`
    Includes,
    /// `"|="`
    DashMatch,
    /// `"^="`
    PrefixMatch,
    /// `"$="`
    SuffixMatch,
    /// `"*="`
    SubstringMatch,
    /// `{ident}`
    Ident,
    /// `{string}` - a terminated single- or double-quoted string
    String,
    /// `{ident}"("`
    Function,
    /// `{num}`
    Number,
    /// `"#"{name}`
    Hash,
    /// `{w}"+"`
    Plus,
    /// `{w}">"`
    Greater,
    /// `{w}","`
    Comma,
    /// `{w}"~"`
    Tilde,
    /// `":"{N}{O}{T}"("`
    Not,
    /// `@{ident}`
    AtKeyword,
    /// `{invalid}` - a string missing its closing quote
    Invalid,
    /// `{num}%`
    Percentage,
    /// `{num}{ident}`
    Dimension,
    /// `"<!--"`
    Cdo,
    /// `"-->"`
    Cdc,
    /// `\/\*[^*]*\*+([^/*][^*]*)*\/` - "ignore comments"
    Comment,
}

impl Symbol {
    /// Whether tokens of this class carry no grammar meaning.
    #[must_use]
    pub const fn is_ignorable(self) -> bool {
        matches!(self, Self::Comment)
    }

    /// Whether this class can separate two simple selector sequences.
    #[must_use]
    pub const fn is_combinator(self) -> bool {
        matches!(self, Self::S | Self::Plus | Self::Greater | Self::Tilde)
    }
}

/// A single token produced by a [`Tokenizer`](super::Tokenizer) at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Token {
    /// A named lexical class together with the exact source text it covers.
    Symbol {
        /// The lexical class.
        name: Symbol,
        /// The matched source text.
        lexeme: String,
    },

    /// A single character consumed as itself, e.g. `.`, `[`, `:`, `*`, `|`, `)`.
    Literal(char),

    /// No further input.
    End,
}

impl Token {
    /// Create a new symbol token.
    #[must_use]
    pub fn symbol(name: Symbol, lexeme: impl Into<String>) -> Self {
        Self::Symbol {
            name,
            lexeme: lexeme.into(),
        }
    }

    /// Byte length of the source text this token covers. `End` has length 0.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Symbol { lexeme, .. } => lexeme.len(),
            Self::Literal(c) => c.len_utf8(),
            Self::End => 0,
        }
    }

    /// Returns true if the token covers no source text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this is the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Returns true if this is an ignorable comment token.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Symbol { name, .. } if name.is_ignorable())
    }

    /// The lexical class, if this is a symbol token.
    #[must_use]
    pub const fn name(&self) -> Option<Symbol> {
        match self {
            Self::Symbol { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// The matched source text, if this is a symbol token.
    #[must_use]
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Self::Symbol { lexeme, .. } => Some(lexeme),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol { name, lexeme } => write!(f, "{name} {lexeme:?}"),
            Self::Literal(c) => write!(f, "'{c}'"),
            Self::End => write!(f, "<end>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_symbol_names_are_uppercase() {
        assert_eq!(Symbol::PrefixMatch.to_string(), "PREFIXMATCH");
        assert_eq!(Symbol::AtKeyword.to_string(), "ATKEYWORD");
        assert_eq!(Symbol::S.to_string(), "S");
        assert_eq!(Symbol::from_str("SUBSTRINGMATCH"), Ok(Symbol::SubstringMatch));
        assert!(Symbol::from_str("ident").is_err());
    }

    #[test]
    fn test_token_len() {
        assert_eq!(Token::symbol(Symbol::Ident, "div").len(), 3);
        assert_eq!(Token::Literal('.').len(), 1);
        assert!(Token::End.is_empty());
    }

    #[test]
    fn test_comment_detection() {
        assert!(Token::symbol(Symbol::Comment, "/* x */").is_comment());
        assert!(!Token::symbol(Symbol::S, " ").is_comment());
        assert!(!Token::Literal('/').is_comment());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::symbol(Symbol::Ident, "div").to_string(), "IDENT \"div\"");
        assert_eq!(Token::Literal('[').to_string(), "'['");
        assert_eq!(Token::End.to_string(), "<end>");
    }
}
