//! Grammar for module source files
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: terminal-level rules (names, numbers, strings, operators)
//! - `expression`: precedence climbing, application, lambdas, sections
//! - `definition`: `=` and `::` bindings and their head desugaring
//!
//! ```text
//! program     := "module" module
//! module      := IDENT modulepart* ";"
//! modulepart  := fixity | import | "module" module | definition
//! fixity      := ("infixl" | "infixr") NUMBER SYMBOL
//! import      := "import" IDENT ("." IDENT)*
//! ```

mod definition;
mod expression;
mod literal;

pub use expression::SECTION_ARGUMENT;

use crate::ast::{Associativity, Expr, FixityDefinition, ImportDeclaration, Module, ModulePart, RawBinder};

use super::combinators::{BoxedParser, expect_keyword};
use super::state::{Fixity, ParseError, ParseState, Parser};

use definition::definition;
use literal::{declarable_operator, dotted_path, identifier, precedence};

pub type RawExpr = Expr<RawBinder>;

/// program := "module" module
pub fn program() -> BoxedParser<Module<RawBinder>> {
    let top = expect_keyword("module") * module();
    BoxedParser::new(move |state: &mut ParseState| {
        let module = top.parse(state)?;
        match state.peek() {
            Some(extra) => Err(ParseError::new("unexpected token after module")
                .found(extra.describe())
                .at(extra.position.clone())),
            None => Ok(module),
        }
    })
}

/// module := IDENT modulepart* ";"
fn module() -> BoxedParser<Module<RawBinder>> {
    identifier().label("module name") + module_parts()
        >> |(name, parts): (String, Vec<ModulePart<RawBinder>>)| Module::new(name, parts)
}

fn module_parts() -> BoxedParser<Vec<ModulePart<RawBinder>>> {
    BoxedParser::new(|state: &mut ParseState| {
        let mut parts = Vec::new();
        loop {
            let part = match state.peek() {
                None => return Err(ParseError::end_of_input("';'")),
                Some(t) if t.is_symbol(";") => {
                    state.advance();
                    return Ok(parts);
                }
                Some(t) if t.is_keyword("infixl") => fixity(Associativity::Left).parse(state)?,
                Some(t) if t.is_keyword("infixr") => fixity(Associativity::Right).parse(state)?,
                Some(t) if t.is_keyword("module") => nested_module().parse(state)?,
                Some(t) if t.is_keyword("import") => import().parse(state)?,
                Some(_) => definition().parse(state)?,
            };
            parts.push(part);
        }
    })
}

fn nested_module() -> BoxedParser<ModulePart<RawBinder>> {
    expect_keyword("module") * module() >> ModulePart::Module
}

/// fixity := ("infixl" | "infixr") NUMBER SYMBOL
///
/// The declaration takes effect immediately for the rest of the source.
fn fixity(associativity: Associativity) -> BoxedParser<ModulePart<RawBinder>> {
    let keyword = match associativity {
        Associativity::Left => "infixl",
        Associativity::Right => "infixr",
    };
    let declaration = expect_keyword(keyword) * precedence() + declarable_operator();

    BoxedParser::new(move |state: &mut ParseState| {
        let (precedence, symbol) = declaration.parse(state)?;
        state.declare(
            symbol.clone(),
            Fixity {
                precedence,
                associativity,
            },
        );
        Ok(ModulePart::Fixity(FixityDefinition {
            symbol,
            associativity,
            precedence,
        }))
    })
}

/// import := "import" IDENT ("." IDENT)*
fn import() -> BoxedParser<ModulePart<RawBinder>> {
    expect_keyword("import") * dotted_path().label("module path")
        >> |path: Vec<String>| ModulePart::Import(ImportDeclaration { path })
}
