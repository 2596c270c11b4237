//! Definitions and type signatures
//!
//! The left-hand side of a binding is parsed as an ordinary expression and
//! then taken apart: `f x y = e` binds `f` to `\x -> \y -> e`. The same
//! happens for `::`, so `id a :: a -> a` gives `id` the type `\a -> a -> a`.

use lachs::Span;

use crate::ast::{Expr, ModulePart, RawBinder};
use crate::lexer::{Terminal, TerminalKind};
use crate::parser::combinators::{BoxedParser, expect_kind, expect_symbol};
use crate::parser::state::{ParseError, ParseResult};

use super::RawExpr;
use super::expression::expression;

/// definition := expression ("=" | "::") expression ";"
pub fn definition() -> BoxedParser<ModulePart<RawBinder>> {
    let assignment = expect_kind(TerminalKind::Symbol)
        .and_then(|t: Terminal| {
            if t.is_symbol("=") || t.is_symbol("::") {
                Ok(t)
            } else {
                Err(ParseError::unexpected(&t, "'=' or '::'"))
            }
        })
        .label("'=' or '::'");
    let binding = expression() + assignment + expression() - expect_symbol(";");

    binding.and_then(|((head, assignment), body): ((RawExpr, Terminal), RawExpr)| {
        let (name, expr) = desugar_head(head, body, &assignment.position)?;
        if assignment.is_symbol("=") {
            Ok(ModulePart::Definition { name, expr })
        } else {
            Ok(ModulePart::TypeDefinition { name, ty: expr })
        }
    })
}

/// Peel arguments off the head, wrapping `body` in one lambda per argument.
fn desugar_head(head: RawExpr, body: RawExpr, at: &Span) -> ParseResult<(RawBinder, RawExpr)> {
    match head {
        Expr::Identifier(name) => Ok((name, body)),
        Expr::Application(function, argument) => match *argument {
            Expr::Identifier(param) => desugar_head(*function, Expr::lambda(param, body), at),
            Expr::Literal(literal) => Err(ParseError::new("value-based pattern matching is not supported")
                .found(literal.to_string())
                .at(at.clone())),
            other => Err(ParseError::new("argument in a definition head must be an identifier")
                .found(other.to_string())
                .at(at.clone())),
        },
        Expr::Lambda(..) => {
            Err(ParseError::new("a definition head cannot contain a lambda").at(at.clone()))
        }
        Expr::Forall(..) => {
            Err(ParseError::new("a definition head cannot contain a quantifier").at(at.clone()))
        }
        Expr::Literal(literal) => Err(ParseError::new("value-based pattern matching is not supported")
            .found(literal.to_string())
            .at(at.clone())),
    }
}
