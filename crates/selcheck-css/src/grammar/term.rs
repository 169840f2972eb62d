//! Grammar terms and the precompiled ordered-choice lists.
//!
//! A term is one of three kinds, written the way the
//! [§ 10.1 Grammar](https://www.w3.org/TR/selectors-3/#grammar) writes them:
//! a quoted literal character (`'='`), an upper-case symbol name (`IDENT`),
//! or a lower-case production name (`attrib`).

use core::fmt;
use core::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::tokenizer::Symbol;

/// The closed set of grammar productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Rule {
    /// `selector [ COMMA S* selector ]*`
    SelectorsGroup,
    /// `simple_selector_sequence [ combinator simple_selector_sequence ]*`
    Selector,
    /// Always fails; descendant, child and sibling combinators are not recognized.
    Combinator,
    /// `[ type_selector | universal ] tail* | tail+`
    SimpleSelectorSequence,
    /// `HASH | class | attrib | pseudo | negation`
    SimpleSelectorSequenceTail,
    /// `[ namespace_prefix ]? element_name`
    TypeSelector,
    /// `[ IDENT | '*' ]? '|'`
    NamespacePrefix,
    /// `IDENT`
    ElementName,
    /// `[ namespace_prefix ]? '*'`
    Universal,
    /// `'.' IDENT`
    Class,
    /// `'[' S* [ namespace_prefix ]? IDENT S* [ attrib_match ]? ']'`
    Attrib,
    /// `[ PREFIXMATCH | SUFFIXMATCH | SUBSTRINGMATCH | '=' | INCLUDES | DASHMATCH ] S* [ IDENT | STRING ] S*`
    AttribMatch,
    /// `':' ':'? [ IDENT | functional_pseudo ]`
    Pseudo,
    /// `FUNCTION S* expression ')'`
    FunctionalPseudo,
    /// `[ [ PLUS | '-' | DIMENSION | NUMBER | STRING | IDENT ] S* ]+`
    Expression,
    /// `NOT S* negation_arg S* ')'`
    Negation,
    /// `type_selector | universal | HASH | class | attrib | pseudo`
    NegationArg,
}

/// A single grammar term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Matches a [`Token::Literal`](crate::tokenizer::Token::Literal) with this character.
    Char(char),
    /// Matches a [`Token::Symbol`](crate::tokenizer::Token::Symbol) of this class.
    Symbol(Symbol),
    /// Matches by running a production, backtracking fully on failure.
    Rule(Rule),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Symbol(symbol) => write!(f, "{symbol}"),
            Self::Rule(rule) => write!(f, "{rule}"),
        }
    }
}

/// A term string that is not a quoted character, symbol name or rule name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid grammar term {0:?}")]
pub struct InvalidTerm(pub String);

impl FromStr for Term {
    type Err = InvalidTerm;

    /// Classify a term by its lexical shape.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTerm(s.to_string());
        let term = s.trim();
        let first = term.chars().next().ok_or_else(invalid)?;

        if first == '\'' {
            let mut inner = term.chars().skip(1);
            return match (inner.next(), inner.next(), inner.next()) {
                (Some(c), Some('\''), None) => Ok(Self::Char(c)),
                _ => Err(invalid()),
            };
        }
        if first.is_ascii_uppercase() {
            return Symbol::from_str(term).map(Self::Symbol).map_err(|_| invalid());
        }
        Rule::from_str(term).map(Self::Rule).map_err(|_| invalid())
    }
}

/// Parse an alternative list such as `"IDENT | '*'"` into its terms, in order.
///
/// Alternatives are separated by a whitespace-delimited `|`, so `'|'` is
/// still a valid character term.
///
/// # Errors
///
/// Returns [`InvalidTerm`] for the first alternative that is empty, contains
/// whitespace, or is not a term.
pub fn alternatives(grammar: &str) -> Result<Vec<Term>, InvalidTerm> {
    let mut terms = Vec::new();
    let mut pending: Option<&str> = None;
    for word in grammar.split_whitespace().chain(core::iter::once("|")) {
        if word == "|" {
            let term = pending.take().ok_or_else(|| InvalidTerm(String::new()))?;
            terms.push(term.parse()?);
        } else if let Some(previous) = pending.replace(word) {
            return Err(InvalidTerm(format!("{previous} {word}")));
        }
    }
    Ok(terms)
}

/// `type_selector | universal`
pub const SEQUENCE_HEAD: &[Term] = &[Term::Rule(Rule::TypeSelector), Term::Rule(Rule::Universal)];

/// `HASH | class | attrib | pseudo | negation`
pub const SEQUENCE_TAIL: &[Term] = &[
    Term::Symbol(Symbol::Hash),
    Term::Rule(Rule::Class),
    Term::Rule(Rule::Attrib),
    Term::Rule(Rule::Pseudo),
    Term::Rule(Rule::Negation),
];

/// `IDENT | '*'`
pub const NAMESPACE_NAME: &[Term] = &[Term::Symbol(Symbol::Ident), Term::Char('*')];

/// `PREFIXMATCH | SUFFIXMATCH | SUBSTRINGMATCH | '=' | INCLUDES | DASHMATCH`
pub const ATTRIB_OPERATOR: &[Term] = &[
    Term::Symbol(Symbol::PrefixMatch),
    Term::Symbol(Symbol::SuffixMatch),
    Term::Symbol(Symbol::SubstringMatch),
    Term::Char('='),
    Term::Symbol(Symbol::Includes),
    Term::Symbol(Symbol::DashMatch),
];

/// `IDENT | STRING`
pub const ATTRIB_VALUE: &[Term] = &[Term::Symbol(Symbol::Ident), Term::Symbol(Symbol::String)];

/// `IDENT | functional_pseudo`
pub const PSEUDO_NAME: &[Term] = &[Term::Symbol(Symbol::Ident), Term::Rule(Rule::FunctionalPseudo)];

/// `PLUS | '-' | DIMENSION | NUMBER | STRING | IDENT`
pub const EXPRESSION_TERM: &[Term] = &[
    Term::Symbol(Symbol::Plus),
    Term::Char('-'),
    Term::Symbol(Symbol::Dimension),
    Term::Symbol(Symbol::Number),
    Term::Symbol(Symbol::String),
    Term::Symbol(Symbol::Ident),
];

/// `type_selector | universal | HASH | class | attrib | pseudo`
pub const NEGATION_ARG: &[Term] = &[
    Term::Rule(Rule::TypeSelector),
    Term::Rule(Rule::Universal),
    Term::Symbol(Symbol::Hash),
    Term::Rule(Rule::Class),
    Term::Rule(Rule::Attrib),
    Term::Rule(Rule::Pseudo),
];
