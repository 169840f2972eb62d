//! The selector productions per [Selectors Level 3 § 10.1 Grammar](https://www.w3.org/TR/selectors-3/#grammar).
//!
//! Each production is a method on [`Parser`] returning `Ok(true)` on a match.
//! Productions never restore the cursor themselves; a failed production is
//! rewound by [`Parser::accept_rule`], which is the only way they are entered
//! apart from the top-level `selectors_group`.

use crate::error::Result;
use crate::tokenizer::{Symbol, Tokenizer};

use super::parser::Parser;
use super::term::{
    ATTRIB_OPERATOR, ATTRIB_VALUE, EXPRESSION_TERM, NAMESPACE_NAME, NEGATION_ARG, PSEUDO_NAME,
    Rule, SEQUENCE_HEAD, SEQUENCE_TAIL, Term,
};

impl<T: Tokenizer> Parser<'_, T> {
    /// Run the body of a production.
    pub(super) fn apply(&mut self, rule: Rule) -> Result<bool> {
        match rule {
            Rule::SelectorsGroup => self.selectors_group(),
            Rule::Selector => self.selector(),
            // combinator
            //   : PLUS S* | GREATER S* | TILDE S* | S+
            //   ;
            // Not recognized: a selector is always a single sequence.
            Rule::Combinator => Ok(false),
            Rule::SimpleSelectorSequence => self.simple_selector_sequence(),
            Rule::SimpleSelectorSequenceTail => self.expect_choice(SEQUENCE_TAIL),
            Rule::TypeSelector => self.type_selector(),
            Rule::NamespacePrefix => self.namespace_prefix(),
            Rule::ElementName => self.expect_symbol(Symbol::Ident),
            Rule::Universal => self.universal(),
            Rule::Class => self.class(),
            Rule::Attrib => self.attrib(),
            Rule::AttribMatch => self.attrib_match(),
            Rule::Pseudo => self.pseudo(),
            Rule::FunctionalPseudo => self.functional_pseudo(),
            Rule::Expression => self.expression(),
            Rule::Negation => self.negation(),
            Rule::NegationArg => self.expect_choice(NEGATION_ARG),
        }
    }

    /// ```text
    /// selectors_group
    ///   : selector [ COMMA S* selector ]*
    ///   ;
    /// ```
    ///
    /// Every remaining token must belong to another comma-separated selector,
    /// so a match always leaves the cursor at the end of input.
    fn selectors_group(&mut self) -> Result<bool> {
        if !self.expect_rule(Rule::Selector)? {
            return Ok(false);
        }
        while self.cursor.valid() {
            if !self.expect_symbol(Symbol::Comma)? {
                return Ok(false);
            }
            self.skip_whitespace()?;
            if !self.expect_rule(Rule::Selector)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// ```text
    /// selector
    ///   : simple_selector_sequence [ combinator simple_selector_sequence ]*
    ///   ;
    /// ```
    fn selector(&mut self) -> Result<bool> {
        if !self.expect_rule(Rule::SimpleSelectorSequence)? {
            return Ok(false);
        }
        while self.accept_rule(Rule::Combinator)? {
            if !self.expect_rule(Rule::SimpleSelectorSequence)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// ```text
    /// simple_selector_sequence
    ///   : [ type_selector | universal ]
    ///     [ HASH | class | attrib | pseudo | negation ]*
    ///   | [ HASH | class | attrib | pseudo | negation ]+
    ///   ;
    /// ```
    fn simple_selector_sequence(&mut self) -> Result<bool> {
        if !self.accept_choice(SEQUENCE_HEAD)?
            && !self.expect_rule(Rule::SimpleSelectorSequenceTail)?
        {
            return Ok(false);
        }
        while self.accept_rule(Rule::SimpleSelectorSequenceTail)? {}
        Ok(true)
    }

    /// ```text
    /// type_selector
    ///   : [ namespace_prefix ]? element_name
    ///   ;
    /// ```
    fn type_selector(&mut self) -> Result<bool> {
        self.optional(Term::Rule(Rule::NamespacePrefix))?;
        self.expect_rule(Rule::ElementName)
    }

    /// ```text
    /// namespace_prefix
    ///   : [ IDENT | '*' ]? '|'
    ///   ;
    /// ```
    fn namespace_prefix(&mut self) -> Result<bool> {
        let _ = self.accept_choice(NAMESPACE_NAME)?;
        self.expect_char('|')
    }

    /// ```text
    /// universal
    ///   : [ namespace_prefix ]? '*'
    ///   ;
    /// ```
    fn universal(&mut self) -> Result<bool> {
        self.optional(Term::Rule(Rule::NamespacePrefix))?;
        self.expect_char('*')
    }

    /// ```text
    /// class
    ///   : '.' IDENT
    ///   ;
    /// ```
    fn class(&mut self) -> Result<bool> {
        Ok(self.expect_char('.')? && self.expect_symbol(Symbol::Ident)?)
    }

    /// ```text
    /// attrib
    ///   : '[' S* [ namespace_prefix ]? IDENT S*
    ///         [ [ PREFIXMATCH |
    ///             SUFFIXMATCH |
    ///             SUBSTRINGMATCH |
    ///             '=' |
    ///             INCLUDES |
    ///             DASHMATCH ] S* [ IDENT | STRING ] S*
    ///         ]? ']'
    ///   ;
    /// ```
    fn attrib(&mut self) -> Result<bool> {
        if !self.expect_char('[')? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        self.optional(Term::Rule(Rule::NamespacePrefix))?;
        if !self.expect_symbol(Symbol::Ident)? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        self.optional(Term::Rule(Rule::AttribMatch))?;
        self.expect_char(']')
    }

    /// The bracketed operator and value group of `attrib`.
    fn attrib_match(&mut self) -> Result<bool> {
        if !self.expect_choice(ATTRIB_OPERATOR)? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        if !self.expect_choice(ATTRIB_VALUE)? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        Ok(true)
    }

    /// ```text
    /// pseudo
    ///   /* '::' starts a pseudo-element, ':' a pseudo-class */
    ///   /* Exceptions: :first-line, :first-letter, :before and :after. */
    ///   /* Note that pseudo-elements are restricted to one per selector and */
    ///   /* occur only in the last simple_selector_sequence. */
    ///   : ':' ':'? [ IDENT | functional_pseudo ]
    ///   ;
    /// ```
    fn pseudo(&mut self) -> Result<bool> {
        if !self.expect_char(':')? {
            return Ok(false);
        }
        let _ = self.accept_char(':')?;
        self.expect_choice(PSEUDO_NAME)
    }

    /// ```text
    /// functional_pseudo
    ///   : FUNCTION S* expression ')'
    ///   ;
    /// ```
    fn functional_pseudo(&mut self) -> Result<bool> {
        if !self.expect_symbol(Symbol::Function)? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        if !self.expect_rule(Rule::Expression)? {
            return Ok(false);
        }
        self.expect_char(')')
    }

    /// ```text
    /// expression
    ///   /* In CSS3, the expressions are identifiers, strings, */
    ///   /* or of the form "an+b" */
    ///   : [ [ PLUS | '-' | DIMENSION | NUMBER | STRING | IDENT ] S* ]+
    ///   ;
    /// ```
    fn expression(&mut self) -> Result<bool> {
        let mut matched = false;
        while self.accept_choice(EXPRESSION_TERM)? {
            matched = true;
            self.skip_whitespace()?;
        }
        Ok(matched)
    }

    /// ```text
    /// negation
    ///   : NOT S* negation_arg S* ')'
    ///   ;
    /// ```
    ///
    /// The closing parenthesis check is inverted: a negation that is closed
    /// by `)` does not match, one that is left open does.
    fn negation(&mut self) -> Result<bool> {
        if !self.expect_symbol(Symbol::Not)? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        if !self.expect_rule(Rule::NegationArg)? {
            return Ok(false);
        }
        self.skip_whitespace()?;
        Ok(!self.accept_char(')')?)
    }
}
