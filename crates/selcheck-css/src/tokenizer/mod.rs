//! Selector tokenizer module.

/// Selector token types per [§ 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex).
pub mod token;
/// The tokenizer contract and the Selectors Level 3 scanner.
pub mod tokenizer;

pub use token::{Symbol, Token};
pub use tokenizer::{Css3Tokenizer, Tokenizer};
