use std::collections::HashMap;

use tracing::trace;

use crate::ast::{Expr, Literal, TypedBinder, UniqueBinder};
use crate::prelude::TypeExpr;

use super::TypedExpr;

/// Bindings of type placeholders to types.
///
/// The map is kept idempotent: whenever a placeholder is bound, the new
/// binding is applied to every existing one, so a single [`apply`] pass
/// fully resolves a type.
///
/// [`apply`]: Substitution::apply
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Substitution(pub HashMap<UniqueBinder, TypeExpr>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: UniqueBinder, ty: TypeExpr) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    /// Replace every free placeholder in `ty` that has a binding.
    pub fn apply(&self, ty: &TypeExpr) -> TypeExpr {
        match ty {
            Expr::Identifier(var) => self.0.get(var).cloned().unwrap_or_else(|| ty.clone()),
            Expr::Lambda(var, body) => Expr::lambda(var.clone(), self.apply(body)),
            Expr::Forall(var, body) => Expr::forall(var.clone(), self.apply(body)),
            Expr::Application(function, argument) => {
                Expr::apply(self.apply(function), self.apply(argument))
            }
            Expr::Literal(Literal::Type(inner)) => Expr::type_literal(self.apply(inner)),
            Expr::Literal(_) => ty.clone(),
        }
    }

    /// Bind `var` to `ty`, updating all existing bindings.
    pub fn insert(&mut self, var: UniqueBinder, ty: TypeExpr) {
        trace!(var = %var, ty = %ty, "bind type variable");
        let single = Substitution::singleton(var.clone(), ty.clone());
        for existing in self.0.values_mut() {
            *existing = single.apply(existing);
        }
        self.0.insert(var, ty);
    }

    /// Apply the substitution to the type of every binder in `expr`.
    pub fn apply_expr(&self, expr: &TypedExpr) -> TypedExpr {
        match expr {
            Expr::Lambda(param, body) => Expr::lambda(self.apply_binder(param), self.apply_expr(body)),
            Expr::Forall(var, body) => Expr::forall(var.clone(), self.apply_expr(body)),
            Expr::Application(function, argument) => {
                Expr::apply(self.apply_expr(function), self.apply_expr(argument))
            }
            Expr::Identifier(binder) => Expr::Identifier(self.apply_binder(binder)),
            Expr::Literal(Literal::Type(ty)) => Expr::type_literal(self.apply(ty)),
            Expr::Literal(literal) => Expr::Literal(literal.clone()),
        }
    }

    fn apply_binder(&self, binder: &TypedBinder) -> TypedBinder {
        TypedBinder::new(binder.name.clone(), self.apply(&binder.ty))
    }
}

/// `ty` with free occurrences of `var` replaced by `replacement`.
pub fn substitute(ty: &TypeExpr, var: &UniqueBinder, replacement: &TypeExpr) -> TypeExpr {
    Substitution::singleton(var.clone(), replacement.clone()).apply(ty)
}

/// Free type variables of `ty` in order of first occurrence, left to right.
pub fn free_vars(ty: &TypeExpr) -> Vec<UniqueBinder> {
    fn walk(ty: &TypeExpr, bound: &mut Vec<UniqueBinder>, found: &mut Vec<UniqueBinder>) {
        match ty {
            Expr::Identifier(var) => {
                if !bound.contains(var) && !found.contains(var) {
                    found.push(var.clone());
                }
            }
            Expr::Lambda(var, body) | Expr::Forall(var, body) => {
                bound.push(var.clone());
                walk(body, bound, found);
                bound.pop();
            }
            Expr::Application(function, argument) => {
                walk(function, bound, found);
                walk(argument, bound, found);
            }
            Expr::Literal(_) => {}
        }
    }

    let mut found = Vec::new();
    walk(ty, &mut Vec::new(), &mut found);
    found
}

/// Whether `var` occurs free in `ty`.
pub fn occurs_in(var: &UniqueBinder, ty: &TypeExpr) -> bool {
    free_vars(ty).contains(var)
}
