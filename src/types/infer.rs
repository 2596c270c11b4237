//! Hindley-Milner inference over one definition at a time.
//!
//! # Overview
//!
//! Every binder already carries a type (see [`Assigner`]). Inference walks
//! the body bottom-up and collects constraints into a [`Substitution`]:
//!
//! ```text
//! \x -> e          : tx -> te
//! f a              : r        with  tf ~ ta -> r, r fresh
//! f @t             : s[v := t] with tf = \v -> s
//! x                : tx
//! 1 / 1.0 / "s"    : Int / Double / String
//! ```
//!
//! The body type is then unified with the declared type, whose quantifiers
//! are instantiated with fresh placeholders. Placeholders left over after
//! the substitution is applied are generalized: the type gets one
//! type-level lambda per placeholder and the value one quantifier. The
//! generalized type must match the declaration up to renaming of its
//! quantified variables.
//!
//! Definitions only see each other through their declared signatures, so
//! the order of definitions never matters.
//!
//! [`Assigner`]: super::assign::Assigner

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::ast::{Expr, Literal, Module, ModulePart, TypedBinder, UniqueBinder};
use crate::prelude::{DOUBLE, INT, Prelude, STRING, TypeExpr};

use super::assign::is_type_argument;
use super::error::TypeError;
use super::subst::{Substitution, free_vars, substitute};
use super::unify::unify;
use super::{FreshVars, TypedExpr, TypedModule};

pub struct Inferencer<'a> {
    prelude: &'a Prelude,
    fresh: &'a mut FreshVars,
}

impl<'a> Inferencer<'a> {
    pub fn new(prelude: &'a Prelude, fresh: &'a mut FreshVars) -> Self {
        Self { prelude, fresh }
    }

    pub fn module(&mut self, module: &TypedModule) -> Result<TypedModule, TypeError> {
        let mut parts = Vec::with_capacity(module.parts.len());
        for part in &module.parts {
            parts.push(match part {
                ModulePart::Module(inner) => ModulePart::Module(self.module(inner)?),
                ModulePart::Definition { name, expr } => {
                    let (name, expr) = self.definition(name, expr)?;
                    ModulePart::Definition { name, expr }
                }
                other => other.clone(),
            });
        }
        Ok(Module::new(module.name.clone(), parts))
    }

    /// Infer, check and generalize a single definition.
    #[tracing::instrument(level = "debug", skip_all, fields(definition = %name))]
    pub fn definition(
        &mut self,
        name: &TypedBinder,
        expr: &TypedExpr,
    ) -> Result<(TypedBinder, TypedExpr), TypeError> {
        let mut subst = Substitution::empty();
        let context = || format!("in definition of {}", name);

        let inferred = self
            .infer(expr, &mut subst)
            .map_err(|e| e.with_context(context()))?;
        let declared = self.instantiate(&name.ty);
        unify(&inferred, &declared, &mut subst, self.fresh).map_err(|e| e.with_context(context()))?;

        let ty = subst.apply(&inferred);
        let vars = free_vars(&ty);
        let generalized = Expr::curried(vars.iter().cloned(), ty);
        debug!(ty = %generalized, "generalized");

        if !alpha_equivalent(&generalized, &name.ty) {
            return Err(TypeError::DeclaredTypeMismatch {
                name: name.to_string(),
                declared: name.ty.to_string(),
                actual: generalized.to_string(),
            });
        }

        let body = vars
            .into_iter()
            .rev()
            .fold(subst.apply_expr(expr), |body, var| Expr::forall(var, body));
        Ok((TypedBinder::new(name.name.clone(), generalized), body))
    }

    fn infer(&mut self, expr: &TypedExpr, subst: &mut Substitution) -> Result<TypeExpr, TypeError> {
        let ty = match expr {
            Expr::Lambda(param, body) => {
                let body = self.infer(body, subst)?;
                self.prelude.function_type(subst.apply(&param.ty), body)
            }
            Expr::Forall(..) => return Err(TypeError::IllegalForall),
            Expr::Application(function, argument) if is_type_argument(argument) => {
                let Expr::Literal(literal @ Literal::Type(argument)) = argument.as_ref() else {
                    return Err(TypeError::InvalidTypeLiteral {
                        literal: argument.to_string(),
                    });
                };
                let function = self.infer(function, subst)?;
                match subst.apply(&function) {
                    Expr::Lambda(var, body) => substitute(&body, &var, argument),
                    // Only quantified types take a type argument.
                    _ => {
                        return Err(TypeError::InvalidTypeLiteral {
                            literal: literal.to_string(),
                        });
                    }
                }
            }
            Expr::Application(function, argument) => {
                let function = self.infer(function, subst)?;
                let argument = self.infer(argument, subst)?;
                let result = self.fresh.var();
                let expected = self.prelude.function_type(argument, result.clone());
                unify(&function, &expected, subst, self.fresh)?;
                subst.apply(&result)
            }
            Expr::Identifier(binder) => subst.apply(&binder.ty),
            Expr::Literal(Literal::Int(_)) => self.prelude.constructor(INT),
            Expr::Literal(Literal::Float(_)) => self.prelude.constructor(DOUBLE),
            Expr::Literal(Literal::String(_)) => self.prelude.constructor(STRING),
            Expr::Literal(literal @ Literal::Type(_)) => {
                return Err(TypeError::InvalidTypeLiteral {
                    literal: literal.to_string(),
                });
            }
        };
        trace!(expr = %expr, ty = %ty, "inferred");
        Ok(ty)
    }

    /// Replace the leading quantifiers of `ty` with fresh placeholders.
    fn instantiate(&mut self, ty: &TypeExpr) -> TypeExpr {
        match ty {
            Expr::Lambda(var, body) => {
                let body = substitute(body, var, &self.fresh.var());
                self.instantiate(&body)
            }
            _ => ty.clone(),
        }
    }
}

/// Whether two types are equal up to a consistent renaming of their
/// quantified variables. The order of the outer quantifiers is irrelevant,
/// only their number must agree.
pub fn alpha_equivalent(left: &TypeExpr, right: &TypeExpr) -> bool {
    let (left_vars, left_body) = strip_quantifiers(left);
    let (right_vars, right_body) = strip_quantifiers(right);
    if left_vars.len() != right_vars.len() {
        return false;
    }
    let mut renaming = Renaming {
        quantified: (left_vars, right_vars),
        pairs: HashMap::new(),
        reverse: HashMap::new(),
    };
    renaming.equivalent(left_body, right_body)
}

fn strip_quantifiers(ty: &TypeExpr) -> (Vec<UniqueBinder>, &TypeExpr) {
    let mut vars = Vec::new();
    let mut body = ty;
    while let Expr::Lambda(var, inner) = body {
        vars.push(var.clone());
        body = inner;
    }
    (vars, body)
}

/// A bijection between the quantified variables of two types, built up as
/// the types are compared.
struct Renaming {
    quantified: (Vec<UniqueBinder>, Vec<UniqueBinder>),
    pairs: HashMap<UniqueBinder, UniqueBinder>,
    reverse: HashMap<UniqueBinder, UniqueBinder>,
}

impl Renaming {
    fn equivalent(&mut self, left: &TypeExpr, right: &TypeExpr) -> bool {
        match (left, right) {
            (Expr::Identifier(a), Expr::Identifier(b)) => self.pair(a, b),
            (Expr::Application(f, x), Expr::Application(g, y)) => {
                self.equivalent(f, g) && self.equivalent(x, y)
            }
            (Expr::Lambda(a, s), Expr::Lambda(b, t)) => {
                self.quantified.0.push(a.clone());
                self.quantified.1.push(b.clone());
                self.pair(a, b) && self.equivalent(s, t)
            }
            (Expr::Literal(Literal::Type(a)), Expr::Literal(Literal::Type(b))) => {
                self.equivalent(a, b)
            }
            (Expr::Literal(a), Expr::Literal(b)) => a == b,
            _ => false,
        }
    }

    fn pair(&mut self, left: &UniqueBinder, right: &UniqueBinder) -> bool {
        let left_bound = self.quantified.0.contains(left);
        let right_bound = self.quantified.1.contains(right);
        match (left_bound, right_bound) {
            (false, false) => left == right,
            (true, true) => {
                let forward = self.pairs.entry(left.clone()).or_insert_with(|| right.clone());
                if forward != right {
                    return false;
                }
                let backward = self.reverse.entry(right.clone()).or_insert_with(|| left.clone());
                backward == left
            }
            _ => false,
        }
    }
}
