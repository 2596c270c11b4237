//! Expression parsers
//!
//! Infix operators are handled by precedence climbing over the fixity
//! table in [`ParseState`]. Everything between two operators is a
//! juxtaposition of atoms, folded into left-nested applications.

use crate::ast::Expr;
use crate::lexer::{Terminal, TerminalKind};
use crate::parser::combinators::{BoxedParser, expect_group, expect_symbol, many};
use crate::parser::state::{Fixity, ParseError, ParseResult, ParseState, Parser};

use super::RawExpr;
use super::literal::{LAMBDA, identifier, is_operator, number, operator, string_literal};

/// Parameter name introduced by a right section `(op x)`. It cannot be
/// written in source, so it never captures a user name.
pub const SECTION_ARGUMENT: &str = "opSectionArg#";

/// expression := primary (operator primary)*
pub fn expression() -> BoxedParser<RawExpr> {
    BoxedParser::new(|state: &mut ParseState| climb(state, Fixity::FLOOR))
}

/// Parse operators binding tighter than `floor`.
///
/// The operator is only consumed once it is known to bind at this level.
/// A declared operator directly followed by `)` is left for the enclosing
/// parenthesized group, which turns it into a left section.
fn climb(state: &mut ParseState, floor: i32) -> ParseResult<RawExpr> {
    let mut left = primary().parse(state)?;

    while let Some(op) = state.peek().filter(|t| is_operator(t)).cloned() {
        let fixity = state.fixity(&op.text).ok_or_else(|| {
            ParseError::new(format!("unknown operator '{}'", op.text)).at(op.position.clone())
        })?;
        if fixity.precedence <= floor || state.peek_nth(1).is_some_and(|t| t.is_group(")")) {
            break;
        }

        state.advance();
        let right = climb(state, fixity.right_floor())?;
        left = Expr::binary(Expr::Identifier(op.text), left, right);
    }

    Ok(left)
}

fn starts_atom(terminal: &Terminal) -> bool {
    matches!(
        terminal.kind,
        TerminalKind::Identifier | TerminalKind::Number | TerminalKind::String
    ) || terminal.is_group("(")
        || terminal.is_symbol(LAMBDA)
}

/// primary := atom+
fn primary() -> BoxedParser<RawExpr> {
    BoxedParser::new(|state: &mut ParseState| {
        let mut expr = atom().parse(state)?;
        while state.peek().is_some_and(starts_atom) {
            let argument = atom().parse(state)?;
            expr = Expr::apply(expr, argument);
        }
        Ok(expr)
    })
}

/// atom := IDENT | NUMBER | STRING | lambda | parenthesized
fn atom() -> BoxedParser<RawExpr> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(t) if t.is_group("(") => parenthesized().parse(state),
        Some(t) if t.is_symbol(LAMBDA) => lambda().parse(state),
        Some(t) if t.kind == TerminalKind::Number => number().parse(state),
        Some(t) if t.kind == TerminalKind::String => string_literal().parse(state),
        _ => (identifier() >> Expr::Identifier)
            .label("expression")
            .parse(state),
    })
}

/// lambda := "\" IDENT+ "->" expression
pub fn lambda() -> BoxedParser<RawExpr> {
    let params = identifier().label("lambda parameter") + many(identifier());
    let lambda = expect_symbol(LAMBDA) * params - expect_symbol("->") + expression();
    lambda
        >> |((first, mut rest), body): ((String, Vec<String>), RawExpr)| {
            rest.insert(0, first);
            Expr::curried(rest, body)
        }
}

/// parenthesized := "(" operator ")"
///                | "(" operator expression ")"
///                | "(" expression [operator] ")"
pub fn parenthesized() -> BoxedParser<RawExpr> {
    BoxedParser::new(|state: &mut ParseState| {
        expect_group("(").parse(state)?;

        let expr = if state.peek().is_some_and(is_operator) {
            right_section(state)?
        } else {
            let inner = expression().parse(state)?;
            if state.peek().is_some_and(is_operator) {
                // (x op) = (op) x
                let op = operator().parse(state)?;
                Expr::apply(Expr::Identifier(op.text), inner)
            } else {
                inner
            }
        };

        expect_group(")").parse(state)?;
        Ok(expr)
    })
}

/// `(op)` is the operator itself, `(op x)` is `\y -> (op) y x`.
fn right_section(state: &mut ParseState) -> ParseResult<RawExpr> {
    let op = operator().parse(state)?;
    if state.peek().is_some_and(|t| t.is_group(")")) {
        return Ok(Expr::Identifier(op.text));
    }

    let operand = expression().parse(state)?;
    if let Some(extra) = state.peek().filter(|t| is_operator(t)) {
        return Err(
            ParseError::new("double operator sections are not allowed")
                .found(extra.describe())
                .at(extra.position.clone()),
        );
    }

    let argument = SECTION_ARGUMENT.to_string();
    Ok(Expr::lambda(
        argument.clone(),
        Expr::binary(Expr::Identifier(op.text), Expr::Identifier(argument), operand),
    ))
}
