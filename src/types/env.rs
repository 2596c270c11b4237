use std::collections::HashMap;

use crate::ast::UniqueBinder;
use crate::prelude::TypeExpr;

/// Types of the lambda parameters in scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeEnv {
    bindings: HashMap<UniqueBinder, TypeExpr>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn lookup(&self, binder: &UniqueBinder) -> Option<&TypeExpr> {
        self.bindings.get(binder)
    }

    /// A copy of this environment with one more binding.
    pub fn extend(&self, binder: UniqueBinder, ty: TypeExpr) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(binder, ty);
        TypeEnv { bindings }
    }
}
