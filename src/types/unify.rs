//! Unification of type expressions.
//!
//! Both sides are resolved through the current substitution before they are
//! compared, so callers never have to apply it themselves. A successful call
//! extends the substitution in place; a failed call may leave partial
//! bindings behind, which is fine because a failure aborts the definition.

use tracing::trace;

use crate::ast::Expr;
use crate::prelude::TypeExpr;

use super::FreshVars;
use super::error::TypeError;
use super::subst::{Substitution, occurs_in, substitute};

/// Make `left` and `right` equal by extending `subst`.
///
/// # Rules
///
/// ```text
/// unify(a, a)               = ok
/// unify(a, t) / unify(t, a) = [a := t]        if a does not occur in t
/// unify(f x, g y)           = unify(x, y); unify(f, g)
/// unify(\a -> s, \b -> t)   = unify(s[a := k], t[b := k])   k a fresh constant
/// unify(lit, lit)           = ok                if the literals are equal
/// ```
///
/// Anything else is a [`TypeError::CannotUnify`]. A quantifier node in a
/// type is never valid and yields [`TypeError::IllegalForall`].
///
/// # Occurs Check
///
/// Binding `a := a -> Int` would describe an infinite type. Such a binding
/// is rejected with [`TypeError::OccursCheck`] instead of looping.
pub fn unify(
    left: &TypeExpr,
    right: &TypeExpr,
    subst: &mut Substitution,
    fresh: &mut FreshVars,
) -> Result<(), TypeError> {
    let left = subst.apply(left);
    let right = subst.apply(right);
    trace!(left = %left, right = %right, "unify");

    match (&left, &right) {
        (Expr::Identifier(a), Expr::Identifier(b)) if a == b => Ok(()),
        (Expr::Identifier(var), other) | (other, Expr::Identifier(var)) => {
            if occurs_in(var, other) {
                return Err(TypeError::OccursCheck {
                    var: var.to_string(),
                    ty: other.to_string(),
                    context: None,
                });
            }
            subst.insert(var.clone(), other.clone());
            Ok(())
        }
        (Expr::Application(f, x), Expr::Application(g, y)) => {
            unify(x, y, subst, fresh)?;
            unify(f, g, subst, fresh)
        }
        (Expr::Lambda(a, s), Expr::Lambda(b, t)) => {
            let constant = fresh.rigid();
            let s = substitute(s, a, &constant);
            let t = substitute(t, b, &constant);
            unify(&s, &t, subst, fresh)
        }
        (Expr::Literal(l), Expr::Literal(r)) => {
            if l == r {
                Ok(())
            } else {
                Err(TypeError::cannot_unify(&left, &right))
            }
        }
        (Expr::Forall(..), _) | (_, Expr::Forall(..)) => Err(TypeError::IllegalForall),
        _ => Err(TypeError::cannot_unify(&left, &right)),
    }
}
