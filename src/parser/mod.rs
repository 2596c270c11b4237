//! # Parser
//!
//! Turns terminals into a [`Module<RawBinder>`]. The grammar is written with
//! the combinators in [`combinators`]; infix expressions use precedence
//! climbing driven by the `infixl`/`infixr` declarations seen so far.
//!
//! Desugaring done here, so later stages never see it:
//!
//! - `f x y = e` becomes `f = \x -> \y -> e` (same for `::`)
//! - `\x y -> e` becomes `\x -> \y -> e`
//! - `a + b` becomes `((+) a) b`
//! - `(+ x)` becomes `\opSectionArg# -> (+) opSectionArg# x`
//! - `(x +)` becomes `(+) x`

mod combinators;
mod grammar;
mod state;

pub use grammar::SECTION_ARGUMENT;
pub use state::{ARROW, Fixity, ParseError, ParseResult, ParseState, Parser};

use tracing::debug;

use crate::ast::{Module, RawBinder};
use crate::lexer::Terminal;

/// Parse a whole source file.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Terminal>) -> ParseResult<Module<RawBinder>> {
    let mut state = ParseState::new(tokens);
    let module = grammar::program().parse(&mut state)?;
    debug!(module = %module.name, parts = module.parts.len(), "parsed module");
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, ModulePart};
    use crate::lexer::tokenize;

    fn parse_source(source: &str) -> ParseResult<Module<RawBinder>> {
        parse(tokenize(source).unwrap())
    }

    fn ident(name: &str) -> Expr<RawBinder> {
        Expr::Identifier(name.to_string())
    }

    #[test]
    fn test_simple_definition() {
        let module = parse_source("module Main x = 1; ;").unwrap();
        assert_eq!(module.name, "Main");
        assert_eq!(module.parts.len(), 1);
    }

    #[test]
    fn test_missing_module_keyword() {
        let err = parse_source("Main x = 1; ;").unwrap_err();
        assert_eq!(err.expected, vec!["'module'".to_string()]);
    }

    #[test]
    fn test_missing_final_semicolon() {
        let err = parse_source("module Main x = 1;").unwrap_err();
        assert_eq!(err.message, "unexpected end of input");
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(parse_source("module Main ; x").is_err());
    }

    #[test]
    fn test_arrow_is_predeclared() {
        let module = parse_source("module Main f :: a -> b -> a; ;").unwrap();
        let ModulePart::TypeDefinition { ty, .. } = &module.parts[0] else {
            panic!("expected a type definition");
        };
        assert_eq!(
            *ty,
            Expr::binary(
                ident("->"),
                ident("a"),
                Expr::binary(ident("->"), ident("b"), ident("a"))
            )
        );
    }

    #[test]
    fn test_parenthesized_lambda_is_not_a_section() {
        let module = parse_source("module Main f = (\\x -> x); ;").unwrap();
        let ModulePart::Definition { expr, .. } = &module.parts[0] else {
            panic!("expected a definition");
        };
        assert_eq!(*expr, Expr::lambda("x".to_string(), ident("x")));
    }
}
