//! Terminal-level parsers: names, numbers, strings and operator symbols

use crate::ast::{Expr, Literal};
use crate::lexer::{Terminal, TerminalKind};

use crate::parser::combinators::{BoxedParser, expect_kind, expect_symbol, many};
use crate::parser::state::{ParseError, ParseResult};

use super::RawExpr;

/// Symbols that delimit module parts and can never be operators.
pub const RESERVED_SYMBOLS: [&str; 3] = [";", "=", "::"];

/// Starts a lambda; never an operator either.
pub const LAMBDA: &str = "\\";

/// Whether `terminal` can appear as an infix operator or in a section.
pub fn is_operator(terminal: &Terminal) -> bool {
    terminal.kind == TerminalKind::Symbol
        && terminal.text != LAMBDA
        && !RESERVED_SYMBOLS.contains(&terminal.text.as_str())
}

pub fn identifier() -> BoxedParser<String> {
    expect_kind(TerminalKind::Identifier) >> |t: Terminal| t.text
}

/// dotted_path := IDENT ("." IDENT)*
pub fn dotted_path() -> BoxedParser<Vec<String>> {
    identifier() + many(expect_symbol(".") * identifier())
        >> |(first, rest): (String, Vec<String>)| {
            let mut path = vec![first];
            path.extend(rest);
            path
        }
}

/// Any symbol usable as an operator
pub fn operator() -> BoxedParser<Terminal> {
    expect_kind(TerminalKind::Symbol).and_then(|t: Terminal| {
        if is_operator(&t) {
            Ok(t)
        } else {
            Err(ParseError::unexpected(&t, "operator"))
        }
    })
}

/// The symbol of an `infixl`/`infixr` declaration
pub fn declarable_operator() -> BoxedParser<String> {
    expect_kind(TerminalKind::Symbol).and_then(|t: Terminal| {
        if is_operator(&t) {
            Ok(t.text)
        } else {
            Err(ParseError::new(format!("'{}' is reserved and cannot be an operator", t.text))
                .at(t.position))
        }
    })
}

pub fn precedence() -> BoxedParser<i32> {
    expect_kind(TerminalKind::Number).and_then(|t: Terminal| {
        t.text.parse::<i32>().map_err(|_| {
            ParseError::new("invalid precedence")
                .expected("integer")
                .found(t.describe())
                .at(t.position.clone())
        })
    })
}

/// Integer when the text fits in an `i64`, floating point otherwise
pub fn number() -> BoxedParser<RawExpr> {
    expect_kind(TerminalKind::Number).and_then(|t: Terminal| parse_number(&t))
}

fn parse_number(terminal: &Terminal) -> ParseResult<RawExpr> {
    if let Ok(value) = terminal.text.parse::<i64>() {
        return Ok(Expr::Literal(Literal::Int(value)));
    }
    if let Ok(value) = terminal.text.parse::<f64>() {
        return Ok(Expr::Literal(Literal::Float(value)));
    }
    Err(ParseError::new("could not parse number")
        .found(terminal.describe())
        .at(terminal.position.clone()))
}

pub fn string_literal() -> BoxedParser<RawExpr> {
    expect_kind(TerminalKind::String) >> |t: Terminal| Expr::Literal(Literal::String(t.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::state::{ParseState, Parser};

    fn number_of(text: &str) -> ParseResult<RawExpr> {
        let mut state = ParseState::new(vec![Terminal::new(TerminalKind::Number, text)]);
        number().parse(&mut state)
    }

    #[test]
    fn test_integer_literal() {
        assert_eq!(number_of("42"), Ok(Expr::Literal(Literal::Int(42))));
    }

    #[test]
    fn test_overflowing_integer_becomes_float() {
        assert_eq!(
            number_of("99999999999999999999"),
            Ok(Expr::Literal(Literal::Float(1e20)))
        );
    }

    #[test]
    fn test_bad_exponent() {
        let err = number_of("1e").unwrap_err();
        assert_eq!(err.message, "could not parse number");
    }

    #[test]
    fn test_reserved_symbols_are_not_operators() {
        for symbol in RESERVED_SYMBOLS.iter().chain([&LAMBDA]) {
            assert!(!is_operator(&Terminal::new(TerminalKind::Symbol, *symbol)));
        }
        assert!(is_operator(&Terminal::new(TerminalKind::Symbol, "<$>")));
    }
}
