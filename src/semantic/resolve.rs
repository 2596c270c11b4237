use tracing::trace;

use crate::ast::{Expr, Literal, Module, ModulePart, RawBinder, UniqueBinder};
use crate::prelude::Prelude;

use super::collect::{Definitions, qualify};
use super::error::ScopeError;

/// The module a part is resolved in, with its imports already resolved to
/// absolute module paths.
struct ModuleScope {
    path: Vec<String>,
    imports: Vec<Vec<String>>,
}

impl ModuleScope {
    fn display(&self) -> String {
        self.path.join(".")
    }
}

/// Second resolution pass: rewrites raw names into unique binders.
pub struct Resolver<'a> {
    definitions: &'a Definitions,
    prelude: &'a Prelude,
}

/// Names bound while walking one expression.
struct Bindings {
    /// Lambda parameters, innermost last.
    locals: Vec<(String, UniqueBinder)>,
    /// Implicit type variables of a signature, in order of first use.
    /// `None` outside of signatures.
    implicit: Option<Vec<(String, UniqueBinder)>>,
}

impl<'a> Resolver<'a> {
    pub fn new(definitions: &'a Definitions, prelude: &'a Prelude) -> Self {
        Self {
            definitions,
            prelude,
        }
    }

    pub fn module(
        &self,
        module: &Module<RawBinder>,
        parent: &[String],
    ) -> Result<Module<UniqueBinder>, ScopeError> {
        let path = qualify(parent, &module.name);
        let imports = module
            .parts
            .iter()
            .filter_map(|part| match part {
                ModulePart::Import(import) => Some(self.import(&path, &import.path)),
                _ => None,
            })
            .collect::<Result<Vec<_>, _>>()?;
        let scope = ModuleScope { path, imports };

        let parts = module
            .parts
            .iter()
            .map(|part| self.part(part, &scope))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Module::new(module.name.clone(), parts))
    }

    fn part(
        &self,
        part: &ModulePart<RawBinder>,
        scope: &ModuleScope,
    ) -> Result<ModulePart<UniqueBinder>, ScopeError> {
        Ok(match part {
            ModulePart::Module(inner) => ModulePart::Module(self.module(inner, &scope.path)?),
            ModulePart::Fixity(fixity) => ModulePart::Fixity(fixity.clone()),
            ModulePart::Import(import) => ModulePart::Import(import.clone()),
            ModulePart::TypeDefinition { name, ty } => {
                let qualified = qualify(&scope.path, name);
                let binder = self.definitions.binder(&qualified).cloned().ok_or_else(|| {
                    ScopeError::SignatureWithoutDefinition {
                        name: qualified.join("."),
                    }
                })?;
                ModulePart::TypeDefinition {
                    name: binder,
                    ty: self.signature(ty, scope)?,
                }
            }
            ModulePart::Definition { name, expr } => {
                let binder = self
                    .definitions
                    .binder(&qualify(&scope.path, name))
                    .cloned()
                    .ok_or_else(|| ScopeError::UnidentifiedTerminal {
                        name: name.clone(),
                        module: scope.display(),
                    })?;
                let mut bindings = Bindings {
                    locals: Vec::new(),
                    implicit: None,
                };
                ModulePart::Definition {
                    name: binder,
                    expr: self.expr(expr, scope, &mut bindings)?,
                }
            }
        })
    }

    /// Resolve a type signature, quantifying over its implicit type
    /// variables with the first one used outermost.
    fn signature(
        &self,
        ty: &Expr<RawBinder>,
        scope: &ModuleScope,
    ) -> Result<Expr<UniqueBinder>, ScopeError> {
        let mut bindings = Bindings {
            locals: Vec::new(),
            implicit: Some(Vec::new()),
        };
        let resolved = self.expr(ty, scope, &mut bindings)?;
        let implicit = bindings.implicit.unwrap_or_default();
        Ok(Expr::curried(
            implicit.into_iter().map(|(_, binder)| binder),
            resolved,
        ))
    }

    fn expr(
        &self,
        expr: &Expr<RawBinder>,
        scope: &ModuleScope,
        bindings: &mut Bindings,
    ) -> Result<Expr<UniqueBinder>, ScopeError> {
        match expr {
            Expr::Lambda(param, body) => {
                let binder = UniqueBinder::named(param.clone());
                bindings.locals.push((param.clone(), binder.clone()));
                let body = self.expr(body, scope, bindings);
                bindings.locals.pop();
                Ok(Expr::lambda(binder, body?))
            }
            Expr::Forall(..) => Err(ScopeError::IllegalForall {
                module: scope.display(),
            }),
            Expr::Application(function, argument) => Ok(Expr::apply(
                self.expr(function, scope, bindings)?,
                self.expr(argument, scope, bindings)?,
            )),
            Expr::Identifier(name) => self.lookup(name, scope, bindings),
            Expr::Literal(literal) => Ok(Expr::Literal(match literal {
                Literal::Int(value) => Literal::Int(*value),
                Literal::Float(value) => Literal::Float(*value),
                Literal::String(value) => Literal::String(value.clone()),
                Literal::Type(ty) => Literal::Type(Box::new(self.expr(ty, scope, bindings)?)),
            })),
        }
    }

    /// Resolve a name. Lookup order:
    ///
    /// 1. lambda parameters, innermost first
    /// 2. implicit type variables (signatures only, lower-case names)
    /// 3. the current module and its imports, which must agree on one binder
    /// 4. enclosing modules, innermost first
    /// 5. builtin types, then builtin values
    fn lookup(
        &self,
        name: &str,
        scope: &ModuleScope,
        bindings: &mut Bindings,
    ) -> Result<Expr<UniqueBinder>, ScopeError> {
        if let Some((_, binder)) = bindings.locals.iter().rev().find(|(local, _)| local == name) {
            return Ok(Expr::Identifier(binder.clone()));
        }

        if let Some(implicit) = bindings.implicit.as_mut() {
            if name.starts_with(|c: char| c.is_lowercase()) {
                if let Some((_, binder)) = implicit.iter().find(|(var, _)| var == name) {
                    return Ok(Expr::Identifier(binder.clone()));
                }
                let binder = UniqueBinder::named(name);
                trace!(name, "implicit type variable");
                implicit.push((name.to_string(), binder.clone()));
                return Ok(Expr::Identifier(binder));
            }
        }

        let mut candidates: Vec<&UniqueBinder> = Vec::new();
        for module in std::iter::once(&scope.path).chain(&scope.imports) {
            if let Some(binder) = self.definitions.binder(&qualify(module, name)) {
                if !candidates.contains(&binder) {
                    candidates.push(binder);
                }
            }
        }
        match candidates.as_slice() {
            [binder] => return Ok(Expr::Identifier((*binder).clone())),
            [] => {}
            _ => {
                return Err(ScopeError::AmbiguousIdentifier {
                    name: name.to_string(),
                    candidates: candidates.iter().map(|b| b.to_string()).collect(),
                });
            }
        }

        for depth in (1..scope.path.len()).rev() {
            if let Some(binder) = self.definitions.binder(&qualify(&scope.path[..depth], name)) {
                return Ok(Expr::Identifier(binder.clone()));
            }
        }

        if let Some(binder) = self.prelude.type_named(name) {
            return Ok(Expr::type_literal(Expr::Identifier(binder.clone())));
        }
        if let Some(binder) = self.prelude.value_named(name) {
            return Ok(Expr::Identifier(binder.clone()));
        }

        Err(ScopeError::UnidentifiedTerminal {
            name: name.to_string(),
            module: scope.display(),
        })
    }

    /// Resolve an import against the importing module, then each enclosing
    /// module, then the top level.
    fn import(&self, module: &[String], import: &[String]) -> Result<Vec<String>, ScopeError> {
        (0..=module.len())
            .rev()
            .map(|depth| {
                let mut candidate = module[..depth].to_vec();
                candidate.extend(import.iter().cloned());
                candidate
            })
            .find(|candidate| self.definitions.has_module(candidate))
            .ok_or_else(|| ScopeError::UnknownModule {
                path: import.join("."),
                module: module.join("."),
            })
    }
}
