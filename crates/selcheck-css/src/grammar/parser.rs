//! The term dispatcher: accept/expect primitives over a borrowed [`Cursor`].
//!
//! `accept_*` never fails on a mismatch; it reports `Ok(false)` and leaves the
//! cursor where it was. `expect_*` behaves the same while a production is
//! being attempted speculatively (peek depth above zero). At depth zero a
//! mismatch becomes a [`SelectorError::Parse`], which only ever happens in
//! the top-level driver.

use crate::cursor::Cursor;
use crate::error::{Result, SelectorError};
use crate::tokenizer::{Symbol, Token, Tokenizer};

use super::term::{Rule, Term};

/// One production attempt, recorded when tracing is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// The production that was attempted.
    pub rule: Rule,
    /// Byte offset where the attempt started.
    pub offset: usize,
    /// Peek depth during the attempt. The top-level driver runs at depth 0.
    pub depth: usize,
    /// Whether the production matched.
    pub matched: bool,
}

/// The farthest offset any term was attempted at, and what was expected there.
#[derive(Debug, Clone)]
struct Failure {
    offset: usize,
    expected: Vec<Term>,
    found: String,
}

/// Backtracking recursive-descent parser over a borrowed cursor.
#[derive(Debug)]
pub struct Parser<'c, T> {
    pub(super) cursor: &'c mut Cursor<T>,
    /// Nesting count of speculative production attempts.
    depth: usize,
    farthest: Option<Failure>,
    trace: Option<Vec<TraceEntry>>,
}

impl<'c, T: Tokenizer> Parser<'c, T> {
    /// Create a parser reading from the cursor's current position.
    pub const fn new(cursor: &'c mut Cursor<T>) -> Self {
        Self {
            cursor,
            depth: 0,
            farthest: None,
            trace: None,
        }
    }

    /// Record every production attempt from now on.
    pub fn set_tracing(&mut self, enabled: bool) {
        if enabled {
            let _ = self.trace.get_or_insert_with(Vec::new);
        } else {
            self.trace = None;
        }
    }

    /// Production attempts recorded so far, in the order they started.
    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        self.trace.as_deref().unwrap_or_default()
    }

    /// Take the recorded trace, leaving tracing on with an empty record.
    pub fn take_trace(&mut self) -> Vec<TraceEntry> {
        self.trace.as_mut().map(core::mem::take).unwrap_or_default()
    }

    /// Current peek depth. Zero outside of any production attempt.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The cursor this parser reads from.
    pub fn cursor(&mut self) -> &mut Cursor<T> {
        self.cursor
    }

    /// [§ 10.1 Grammar](https://www.w3.org/TR/selectors-3/#grammar)
    ///
    /// "The grammar below defines the syntax of Selectors."
    ///
    /// Validate the rest of the input as a `selectors_group`. Comment skipping
    /// is forced on for the duration of the call.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Parse`] if the input does not match, or
    /// [`SelectorError::MalformedToken`] if the tokenizer breaks its contract.
    pub fn parse_selectors_group(&mut self) -> Result<()> {
        let ignore = self.cursor.ignores_comments();
        self.cursor.set_ignore_comments(true);
        let result = self.invoke(Rule::SelectorsGroup);
        self.cursor.set_ignore_comments(ignore);

        if result? {
            Ok(())
        } else {
            Err(self.parse_error(Rule::SelectorsGroup.to_string()))
        }
    }

    /// Match a literal character and advance past it.
    ///
    /// # Errors
    ///
    /// Only [`SelectorError::MalformedToken`].
    pub fn accept_char(&mut self, c: char) -> Result<bool> {
        let keep = self.cursor.key();
        if *self.cursor.current() == Token::Literal(c) {
            self.cursor.next()?;
            return Ok(true);
        }
        self.miss(Term::Char(c), keep);
        Ok(false)
    }

    /// Match a named symbol and advance past it.
    ///
    /// # Errors
    ///
    /// Only [`SelectorError::MalformedToken`].
    pub fn accept_symbol(&mut self, symbol: Symbol) -> Result<bool> {
        let keep = self.cursor.key();
        if self.cursor.current().name() == Some(symbol) {
            self.cursor.next()?;
            return Ok(true);
        }
        self.miss(Term::Symbol(symbol), keep);
        Ok(false)
    }

    /// Run a production one level deeper. On failure the cursor is restored
    /// to where it was before the attempt, however far the production got.
    ///
    /// # Errors
    ///
    /// Only [`SelectorError::MalformedToken`].
    pub fn accept_rule(&mut self, rule: Rule) -> Result<bool> {
        let keep = self.cursor.key();
        self.depth += 1;
        let result = self.invoke(rule);
        self.depth -= 1;
        if matches!(result, Ok(false)) {
            self.cursor.seek(keep);
        }
        result
    }

    /// Match any single term.
    ///
    /// # Errors
    ///
    /// Only [`SelectorError::MalformedToken`].
    pub fn accept_term(&mut self, term: Term) -> Result<bool> {
        match term {
            Term::Char(c) => self.accept_char(c),
            Term::Symbol(symbol) => self.accept_symbol(symbol),
            Term::Rule(rule) => self.accept_rule(rule),
        }
    }

    /// Ordered choice: try each term left to right and commit to the first
    /// that matches.
    ///
    /// # Errors
    ///
    /// Only [`SelectorError::MalformedToken`].
    pub fn accept_choice(&mut self, terms: &[Term]) -> Result<bool> {
        for &term in terms {
            if self.accept_term(term)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// [`accept_char`](Self::accept_char), failing hard at depth zero.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Parse`] on a mismatch at depth zero.
    pub fn expect_char(&mut self, c: char) -> Result<bool> {
        let matched = self.accept_char(c)?;
        self.gate(matched, || Term::Char(c).to_string())
    }

    /// [`accept_symbol`](Self::accept_symbol), failing hard at depth zero.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Parse`] on a mismatch at depth zero.
    pub fn expect_symbol(&mut self, symbol: Symbol) -> Result<bool> {
        let matched = self.accept_symbol(symbol)?;
        self.gate(matched, || symbol.to_string())
    }

    /// [`accept_rule`](Self::accept_rule), failing hard at depth zero.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Parse`] on a mismatch at depth zero.
    pub fn expect_rule(&mut self, rule: Rule) -> Result<bool> {
        let matched = self.accept_rule(rule)?;
        self.gate(matched, || rule.to_string())
    }

    /// [`accept_choice`](Self::accept_choice), failing hard at depth zero.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Parse`] on a mismatch at depth zero.
    pub fn expect_choice(&mut self, terms: &[Term]) -> Result<bool> {
        let matched = self.accept_choice(terms)?;
        self.gate(matched, || join(terms))
    }

    /// `[ x ]?`
    pub(super) fn optional(&mut self, term: Term) -> Result<()> {
        let _ = self.accept_term(term)?;
        Ok(())
    }

    /// `S*`
    ///
    /// Optional whitespace is never reported as an expectation.
    pub(super) fn skip_whitespace(&mut self) -> Result<()> {
        while self.cursor.current().name() == Some(Symbol::S) {
            self.cursor.next()?;
        }
        Ok(())
    }

    fn invoke(&mut self, rule: Rule) -> Result<bool> {
        let index = self.trace.as_mut().map(|trace| {
            trace.push(TraceEntry {
                rule,
                offset: self.cursor.key(),
                depth: self.depth,
                matched: false,
            });
            trace.len() - 1
        });

        let result = self.apply(rule);

        if let (Some(index), Some(trace), Ok(matched)) = (index, self.trace.as_mut(), &result) {
            trace[index].matched = *matched;
        }
        result
    }

    fn gate(&mut self, matched: bool, context: impl FnOnce() -> String) -> Result<bool> {
        if matched || self.depth > 0 {
            return Ok(matched);
        }
        Err(self.parse_error(context()))
    }

    /// Record a failed character or symbol match and restore the cursor.
    fn miss(&mut self, term: Term, keep: usize) {
        let offset = self.cursor.key();
        match &mut self.farthest {
            Some(failure) if failure.offset > offset => {}
            Some(failure) if failure.offset == offset => {
                if !failure.expected.contains(&term) {
                    failure.expected.push(term);
                }
            }
            _ => {
                let found = self.cursor.current().to_string();
                self.farthest = Some(Failure {
                    offset,
                    expected: vec![term],
                    found,
                });
            }
        }
        self.cursor.seek(keep);
    }

    fn parse_error(&mut self, context: String) -> SelectorError {
        match &self.farthest {
            Some(failure) => SelectorError::Parse {
                context,
                expected: join(&failure.expected),
                found: failure.found.clone(),
                offset: failure.offset,
            },
            None => SelectorError::Parse {
                expected: context.clone(),
                context,
                found: self.cursor.current().to_string(),
                offset: self.cursor.key(),
            },
        }
    }
}

fn join(terms: &[Term]) -> String {
    terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
