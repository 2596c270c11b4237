use std::collections::HashMap;

use tracing::trace;

use crate::ast::{Expr, Literal, Module, ModulePart, TypedBinder, UniqueBinder};
use crate::prelude::{Prelude, TypeExpr};

use super::env::TypeEnv;
use super::error::TypeError;
use super::{FreshVars, TypedExpr, TypedModule};

/// Attaches a type to every binder of a resolved module.
///
/// Definitions take their declared signature, lambda parameters a fresh
/// placeholder. References to quantified values are applied to one fresh
/// type argument per quantifier, so inference only ever sees them
/// instantiated.
pub struct Assigner<'a> {
    prelude: &'a Prelude,
    signatures: HashMap<UniqueBinder, TypeExpr>,
}

impl<'a> Assigner<'a> {
    /// Collect every signature in `module`, including nested modules.
    pub fn new(module: &Module<UniqueBinder>, prelude: &'a Prelude) -> Self {
        let mut signatures = HashMap::new();
        collect_signatures(module, &mut signatures);
        Self {
            prelude,
            signatures,
        }
    }

    pub fn module(
        &self,
        module: &Module<UniqueBinder>,
        fresh: &mut FreshVars,
    ) -> Result<TypedModule, TypeError> {
        let mut parts = Vec::with_capacity(module.parts.len());
        for part in &module.parts {
            match part {
                ModulePart::Module(inner) => parts.push(ModulePart::Module(self.module(inner, fresh)?)),
                ModulePart::Fixity(fixity) => parts.push(ModulePart::Fixity(fixity.clone())),
                ModulePart::Import(import) => parts.push(ModulePart::Import(import.clone())),
                ModulePart::TypeDefinition { .. } => {}
                ModulePart::Definition { name, expr } => {
                    let ty = self.signatures.get(name).cloned().ok_or_else(|| {
                        TypeError::MissingSignature {
                            name: name.to_string(),
                        }
                    })?;
                    parts.push(ModulePart::Definition {
                        name: TypedBinder::new(name.clone(), ty),
                        expr: self.expr(expr, &TypeEnv::empty(), fresh)?,
                    });
                }
            }
        }
        Ok(Module::new(module.name.clone(), parts))
    }

    fn expr(
        &self,
        expr: &Expr<UniqueBinder>,
        env: &TypeEnv,
        fresh: &mut FreshVars,
    ) -> Result<TypedExpr, TypeError> {
        match expr {
            Expr::Lambda(param, body) => {
                let ty = fresh.var();
                trace!(param = %param, ty = %ty, "parameter placeholder");
                let inner = env.extend(param.clone(), ty.clone());
                Ok(Expr::lambda(
                    TypedBinder::new(param.clone(), ty),
                    self.expr(body, &inner, fresh)?,
                ))
            }
            Expr::Forall(..) => Err(TypeError::IllegalForall),
            Expr::Application(function, argument) => Ok(Expr::apply(
                self.expr(function, env, fresh)?,
                self.expr(argument, env, fresh)?,
            )),
            Expr::Identifier(binder) => {
                let ty = self.lookup(binder, env)?;
                let quantifiers = leading_lambdas(&ty);
                let reference = Expr::Identifier(TypedBinder::new(binder.clone(), ty));
                Ok((0..quantifiers).fold(reference, |expr, _| {
                    Expr::apply(expr, Expr::type_literal(fresh.var()))
                }))
            }
            Expr::Literal(literal) => Ok(Expr::Literal(literal.clone())),
        }
    }

    fn lookup(&self, binder: &UniqueBinder, env: &TypeEnv) -> Result<TypeExpr, TypeError> {
        env.lookup(binder)
            .or_else(|| self.signatures.get(binder))
            .or_else(|| self.prelude.value_type(binder))
            .cloned()
            .ok_or_else(|| TypeError::UnboundIdentifier {
                name: binder.to_string(),
            })
    }
}

fn collect_signatures(module: &Module<UniqueBinder>, signatures: &mut HashMap<UniqueBinder, TypeExpr>) {
    for part in &module.parts {
        match part {
            ModulePart::Module(inner) => collect_signatures(inner, signatures),
            ModulePart::TypeDefinition { name, ty } => {
                signatures.insert(name.clone(), ty.clone());
            }
            _ => {}
        }
    }
}

/// Number of type-level lambdas wrapping `ty`.
fn leading_lambdas(ty: &TypeExpr) -> usize {
    match ty {
        Expr::Lambda(_, body) => 1 + leading_lambdas(body),
        _ => 0,
    }
}

/// Whether `expr` is an explicit type argument.
pub(super) fn is_type_argument(expr: &TypedExpr) -> bool {
    matches!(expr, Expr::Literal(Literal::Type(_)))
}
