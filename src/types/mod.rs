//! # Type Checking
//!
//! Turns a resolved [`Module<UniqueBinder>`] into a
//! [`Module<TypedBinder, UniqueBinder>`] in two passes:
//!
//! 1. **Assignment** ([`Assigner`]): every binder gets a type. Definitions
//!    take their `::` signature, lambda parameters a fresh placeholder, and
//!    references to quantified values are applied to fresh type arguments.
//! 2. **Inference** ([`Inferencer`]): Hindley-Milner unification over each
//!    definition on its own, followed by generalization and a check of the
//!    result against the declared signature.
//!
//! Types are ordinary expressions over unique binders (see [`TypeExpr`]):
//!
//! ```text
//! Int                  Literal(Type(Identifier(Int)))
//! a -> b               Application(Application(Literal(Type(->)), a), b)
//! \a -> a -> a         Lambda(a, ...)          quantified type
//! ty3                  Identifier(ty3)         placeholder
//! ```
//!
//! [`TypeExpr`]: crate::prelude::TypeExpr

mod assign;
mod env;
mod error;
mod infer;
mod subst;
mod unify;

pub use assign::Assigner;
pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::{Inferencer, alpha_equivalent};
pub use subst::{Substitution, free_vars, occurs_in, substitute};
pub use unify::unify;

use tracing::debug;

use crate::ast::{Expr, Module, TypedBinder, UniqueBinder};
use crate::prelude::{Prelude, TypeExpr};

/// A value expression whose binders carry their types.
pub type TypedExpr = Expr<TypedBinder, UniqueBinder>;

pub type TypedModule = Module<TypedBinder, UniqueBinder>;

/// Source of fresh type placeholders.
///
/// Each call returns a binder that is distinct from every other binder,
/// whatever its printed name.
#[derive(Debug, Default)]
pub struct FreshVars {
    next: usize,
}

impl FreshVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binder(&mut self) -> UniqueBinder {
        let binder = UniqueBinder::named(format!("ty{}", self.next));
        self.next += 1;
        binder
    }

    /// A flexible placeholder that unification may bind.
    pub fn var(&mut self) -> TypeExpr {
        Expr::Identifier(self.binder())
    }

    /// A rigid type constant that only unifies with itself.
    pub fn rigid(&mut self) -> TypeExpr {
        Expr::type_literal(Expr::Identifier(self.binder()))
    }
}

/// Assign types to `module` and run inference over every definition.
#[tracing::instrument(level = "debug", skip_all, fields(module = %module.name))]
pub fn check(module: &Module<UniqueBinder>, prelude: &Prelude) -> Result<TypedModule, TypeError> {
    let mut fresh = FreshVars::new();
    let assigned = Assigner::new(module, prelude).module(module, &mut fresh)?;
    let checked = Inferencer::new(prelude, &mut fresh).module(&assigned)?;
    debug!(definitions = checked.definitions().len(), "type checked");
    Ok(checked)
}
