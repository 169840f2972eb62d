//! Integration tests for the selector grammar.

use selcheck_css::cursor::Cursor;
use selcheck_css::error::SelectorError;
use selcheck_css::grammar::{Parser, Rule, SelectorValidator, is_valid, validate};
use selcheck_css::tokenizer::{Symbol, Token};

/// Helper to validate and return the parse error, panicking on success
fn parse_error(input: &str) -> SelectorError {
    match validate(input) {
        Ok(()) => panic!("Expected {input:?} to be rejected"),
        Err(err) => err,
    }
}

/// Helper to validate and check the cursor ends up past every token
fn assert_fully_consumed(input: &str) {
    let mut validator = SelectorValidator::new();
    validator.parse(input).unwrap();
    assert!(!validator.cursor_mut().valid(), "{input:?} left tokens behind");
}

// ========== Accepted selectors ==========

#[test]
fn test_type_selector() {
    assert!(is_valid("div"));
    assert!(is_valid("h1"));
}

#[test]
fn test_universal_selector() {
    assert!(is_valid("*"));
    assert!(is_valid("*.note"));
}

#[test]
fn test_namespaced_selectors() {
    assert!(is_valid("ns|div"));
    assert!(is_valid("*|*"));
    assert!(is_valid("|div"));
    assert!(is_valid("ns|*"));
}

#[test]
fn test_compound_selectors() {
    assert!(is_valid("#id.cls[attr~=v]"));
    assert!(is_valid(".a.b.c"));
    assert!(is_valid("a#b"));
}

#[test]
fn test_attribute_selectors() {
    assert!(is_valid("[title]"));
    assert!(is_valid("[title=\"x\"]"));
    assert!(is_valid("[ title = 'x' ]"));
    assert!(is_valid("[ns|lang|=en]"));
    assert!(is_valid("[href^=https][src$='.png'][data-x*=dark]"));
}

#[test]
fn test_pseudo_classes_and_elements() {
    assert!(is_valid(":hover"));
    assert!(is_valid("a:visited"));
    assert!(is_valid("::before"));
    assert!(is_valid("p::first-line"));
}

#[test]
fn test_functional_pseudo_classes() {
    assert!(is_valid(":nth-child(2n + 1)"));
    assert!(is_valid(":nth-child(-n+3)"));
    assert!(is_valid(":nth-of-type(odd)"));
    assert!(is_valid(":lang(\"fr\")"));
    assert!(!is_valid(":nth-child()"));
    assert!(!is_valid(":nth-child(2n"));
}

#[test]
fn test_group_separator() {
    assert!(is_valid("div, p"));
    assert!(is_valid("div,p"));
    assert!(is_valid("div ,p"));
    assert!(is_valid("a , b,\n\tc"));
}

#[test]
fn test_comments_are_transparent() {
    assert!(is_valid("/* lead */div"));
    assert!(is_valid("div/* tail */"));
    assert!(is_valid("div/* a */,/* b */ p"));
    assert!(is_valid("[/* x */title/* y */]"));
}

#[test]
fn test_accepted_selectors_are_fully_consumed() {
    for input in ["div", "div, p", "*|*", "[title=\"x\"]", ":nth-child(2n + 1)", "a/**/"] {
        assert_fully_consumed(input);
    }
}

// ========== Rejected selectors ==========

#[test]
fn test_empty_input() {
    let err = parse_error("");
    assert_eq!(err.offset(), 0);
    assert!(err.is_parse_error());
}

#[test]
fn test_trailing_comma() {
    let err = parse_error("div,");
    assert_eq!(
        err.to_string(),
        "parse error at 4: expected IDENT | '*' | '|' | HASH | '.' | '[' | ':' | NOT, \
         found <end> (while matching selector)"
    );
}

#[test]
fn test_leading_comma() {
    assert_eq!(parse_error(", p").offset(), 0);
}

#[test]
fn test_missing_attribute_value() {
    let err = parse_error("[title=]");
    assert_eq!(
        err,
        SelectorError::Parse {
            context: "selector".to_string(),
            expected: "IDENT | STRING".to_string(),
            found: "']'".to_string(),
            offset: 7,
        }
    );
}

#[test]
fn test_unclosed_attribute() {
    assert!(!is_valid("[title"));
    assert!(!is_valid("[title=x"));
}

#[test]
fn test_trailing_whitespace_is_not_a_separator() {
    let err = parse_error("div ");
    assert_eq!(err.offset(), 3);
}

#[test]
fn test_unknown_characters() {
    assert!(!is_valid("div!"));
    assert!(!is_valid("@media"));
    assert!(!is_valid("\"quoted\""));
}

// ========== Combinators ==========

#[test]
fn test_combinators_are_not_recognized() {
    assert!(is_valid("div"));
    let err = parse_error("div p");
    assert_eq!(err.offset(), 3);
    let SelectorError::Parse { context, found, .. } = err else {
        panic!("Expected a parse error");
    };
    assert_eq!(context, "COMMA");
    assert_eq!(found, "S \" \"");

    assert!(!is_valid("ul > li"));
    assert!(!is_valid("h1 + p"));
    assert!(!is_valid("h1 ~ p"));
}

#[test]
fn test_combinator_failure_points_at_the_combinator() {
    for (input, offset, found) in [
        ("a>b", 1, "GREATER \">\""),
        ("h1 + p", 2, "PLUS \" +\""),
        ("a ~ b", 1, "TILDE \" ~\""),
    ] {
        let SelectorError::Parse { found: actual, offset: at, .. } = parse_error(input) else {
            panic!("Expected a parse error for {input:?}");
        };
        assert_eq!((at, actual.as_str()), (offset, found), "{input:?}");
    }
}

// ========== Negation ==========
//
// The closing parenthesis of `:not(` is checked the wrong way round: a closed
// negation is rejected and an unclosed one is accepted. These tests pin the
// current behavior so any change to it is deliberate.

#[test]
fn test_closed_negation_is_rejected() {
    assert!(!is_valid(":not(.a)"));
    assert!(!is_valid("div:not(p)"));
}

#[test]
fn test_unclosed_negation_is_accepted() {
    assert!(is_valid(":not(.a"));
    assert!(is_valid("div:not( p "));
    assert!(!is_valid(":not()"));
}

// ========== Ordered choice and tracing ==========

#[test]
fn test_identifier_pseudo_never_tries_functional_pseudo() {
    let (result, trace) = SelectorValidator::new().parse_traced(":hover");
    result.unwrap();
    assert!(trace.iter().any(|entry| entry.rule == Rule::Pseudo && entry.matched));
    assert!(trace.iter().all(|entry| entry.rule != Rule::FunctionalPseudo));
}

#[test]
fn test_trace_records_failed_attempts() {
    let (result, trace) = SelectorValidator::new().parse_traced("div");
    result.unwrap();
    let combinator = trace
        .iter()
        .find(|entry| entry.rule == Rule::Combinator)
        .unwrap();
    assert!(!combinator.matched);
    assert_eq!(combinator.offset, 3);
    assert_eq!(combinator.depth, 2);
}

#[test]
fn test_untraced_parser_records_nothing() {
    let mut cursor = Cursor::new();
    cursor.set_string("div");
    let mut parser = Parser::new(&mut cursor);
    parser.parse_selectors_group().unwrap();
    assert!(parser.trace().is_empty());
}

// ========== Dispatcher ==========

#[test]
fn test_failed_production_restores_cursor() {
    let mut cursor = Cursor::new();
    cursor.set_string("ns|.a");
    let mut parser = Parser::new(&mut cursor);
    assert!(!parser.accept_rule(Rule::TypeSelector).unwrap());
    assert_eq!(parser.cursor().key(), 0);
    assert_eq!(parser.depth(), 0);
}

#[test]
fn test_matched_production_advances_cursor() {
    let mut cursor = Cursor::new();
    cursor.set_string("ns|div.a");
    let mut parser = Parser::new(&mut cursor);
    assert!(parser.accept_rule(Rule::TypeSelector).unwrap());
    assert_eq!(parser.cursor().key(), 6);
    assert!(parser.accept_rule(Rule::Class).unwrap());
    assert_eq!(parser.depth(), 0);
}

#[test]
fn test_accept_never_raises() {
    let mut cursor = Cursor::new();
    cursor.set_string("x");
    let mut parser = Parser::new(&mut cursor);
    assert!(!parser.accept_char('.').unwrap());
    assert!(!parser.accept_symbol(Symbol::Hash).unwrap());
    assert!(!parser.accept_rule(Rule::Attrib).unwrap());
    assert!(parser.accept_symbol(Symbol::Ident).unwrap());
}

#[test]
fn test_expect_raises_at_depth_zero() {
    let mut cursor = Cursor::new();
    cursor.set_string("x");
    let mut parser = Parser::new(&mut cursor);
    let err = parser.expect_char('.').unwrap_err();
    assert_eq!(
        err,
        SelectorError::Parse {
            context: "'.'".to_string(),
            expected: "'.'".to_string(),
            found: "IDENT \"x\"".to_string(),
            offset: 0,
        }
    );
    assert!(parser.expect_symbol(Symbol::Ident).unwrap());
}

#[test]
fn test_malformed_token_is_fatal() {
    let broken = |text: &str, offset: usize| {
        if offset < text.len() {
            Token::symbol(Symbol::Ident, "")
        } else {
            Token::End
        }
    };
    let mut validator = SelectorValidator::with_tokenizer(broken);
    let err = validator.parse("div").unwrap_err();
    assert!(matches!(err, SelectorError::MalformedToken { offset: 0, .. }));
    assert!(!err.is_parse_error());
}

#[test]
fn test_malformed_token_inside_production_restores_depth() {
    let broken_after_dot = |text: &str, offset: usize| match offset {
        0 => Token::Literal('.'),
        _ if offset < text.len() => Token::symbol(Symbol::Ident, ""),
        _ => Token::End,
    };
    let mut cursor = Cursor::with_tokenizer(broken_after_dot);
    cursor.set_string(".a");
    let mut parser = Parser::new(&mut cursor);
    let err = parser.accept_rule(Rule::SimpleSelectorSequence).unwrap_err();
    assert!(matches!(err, SelectorError::MalformedToken { offset: 1, .. }));
    assert_eq!(parser.depth(), 0);
}

#[test]
fn test_validator_reuse() {
    let mut validator = SelectorValidator::new();
    assert!(validator.parse("div,").is_err());
    validator.parse("div").unwrap();
    assert_eq!(validator.cursor().source(), "div");
}
