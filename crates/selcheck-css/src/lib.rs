//! CSS3 selector tokenizer, token cursor, and backtracking selector grammar.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Tokenizer** ([§ 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex))
//!   - Longest-match scanning with rule-order tie breaking
//!   - Escapes, strings, numbers, dimensions, comments
//!   - Single-character fallback tokens
//!
//! - **Token Cursor**
//!   - Offset-keyed token cache
//!   - Transparent comment skipping
//!   - Seek/rewind for backtracking
//!
//! - **Selector Grammar** ([§ 10.1 Grammar](https://www.w3.org/TR/selectors-3/#grammar))
//!   - Recursive descent with full backtracking on failed productions
//!   - Ordered choice between alternatives
//!   - Errors surfaced only by the top-level production
//!   - Farthest-failure diagnostics and production traces
//!
//! # Not Yet Implemented
//!
//! - Combinators (descendant, child, adjacent and general sibling)
//! - Building a selector tree
//! - Matching selectors against elements

/// Token cursor over a loaded selector string.
pub mod cursor;
/// Errors raised by the cursor and the grammar.
pub mod error;
/// Selector grammar per [§ 10.1 Grammar](https://www.w3.org/TR/selectors-3/#grammar).
pub mod grammar;
/// Selector tokenizer per [§ 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex).
pub mod tokenizer;

// Re-exports for convenience
pub use cursor::{Cursor, Tokens};
pub use error::{Result, SelectorError};
pub use grammar::{Parser, Rule, SelectorValidator, Term, TraceEntry, is_valid, validate};
pub use tokenizer::{Css3Tokenizer, Symbol, Token, Tokenizer};
