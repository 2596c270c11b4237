//! Builtin names.
//!
//! The prelude owns one [`UniqueBinder`] per builtin type constructor and
//! builtin value. Name resolution hands these binders out when a name is not
//! defined in source, and the type checker uses them to build the types of
//! literals and builtin values. A prelude is an ordinary value: build one and
//! pass it to every stage of a pipeline run.

use crate::ast::{Expr, UniqueBinder};
use crate::parser::ARROW;

/// A type expression over resolved binders.
pub type TypeExpr = Expr<UniqueBinder>;

pub const INT: &str = "Int";
pub const DOUBLE: &str = "Double";
pub const STRING: &str = "String";
pub const ADD: &str = "Add";

#[derive(Debug, Clone)]
pub struct Prelude {
    types: Vec<UniqueBinder>,
    values: Vec<(UniqueBinder, TypeExpr)>,
}

impl Prelude {
    /// `->`, `Int`, `Double`, `String` and `Add : Int -> Int -> Int`.
    pub fn standard() -> Self {
        let mut prelude = Self {
            types: [ARROW, INT, DOUBLE, STRING]
                .into_iter()
                .map(UniqueBinder::named)
                .collect(),
            values: Vec::new(),
        };
        let int = prelude.constructor(INT);
        let add = prelude.function_type(int.clone(), prelude.function_type(int.clone(), int));
        prelude.values.push((UniqueBinder::named(ADD), add));
        prelude
    }

    /// Register an additional builtin value with its type.
    pub fn with_value(mut self, name: &str, ty: TypeExpr) -> Self {
        self.values.push((UniqueBinder::named(name), ty));
        self
    }

    pub fn type_named(&self, name: &str) -> Option<&UniqueBinder> {
        self.types.iter().find(|binder| binder.path() == [name])
    }

    pub fn value_named(&self, name: &str) -> Option<&UniqueBinder> {
        self.values
            .iter()
            .find(|(binder, _)| binder.path() == [name])
            .map(|(binder, _)| binder)
    }

    /// The declared type of a builtin value.
    pub fn value_type(&self, binder: &UniqueBinder) -> Option<&TypeExpr> {
        self.values
            .iter()
            .find(|(candidate, _)| candidate == binder)
            .map(|(_, ty)| ty)
    }

    pub fn arrow(&self) -> TypeExpr {
        self.constructor(ARROW)
    }

    /// The builtin type constructor `name` as a type expression, or the
    /// name as a free identifier if no such constructor exists.
    pub fn constructor(&self, name: &str) -> TypeExpr {
        match self.type_named(name) {
            Some(binder) => Expr::type_literal(Expr::Identifier(binder.clone())),
            None => Expr::Identifier(UniqueBinder::named(name)),
        }
    }

    /// `from -> to`
    pub fn function_type(&self, from: TypeExpr, to: TypeExpr) -> TypeExpr {
        Expr::binary(self.arrow(), from, to)
    }

    /// Splits `from -> to` into its two halves.
    pub fn as_function_type<'t>(&self, ty: &'t TypeExpr) -> Option<(&'t TypeExpr, &'t TypeExpr)> {
        let Expr::Application(function, to) = ty else {
            return None;
        };
        let Expr::Application(arrow, from) = function.as_ref() else {
            return None;
        };
        (**arrow == self.arrow()).then_some((from.as_ref(), to.as_ref()))
    }
}

impl Default for Prelude {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types_are_stable() {
        let prelude = Prelude::standard();
        assert_eq!(prelude.constructor(INT), prelude.constructor(INT));
        assert_ne!(prelude.constructor(INT), prelude.constructor(STRING));
    }

    #[test]
    fn test_add_is_int_to_int_to_int() {
        let prelude = Prelude::standard();
        let add = prelude.value_named(ADD).unwrap();
        let ty = prelude.value_type(add).unwrap();
        assert_eq!(ty.to_string(), "(Int -> (Int -> Int))");
    }

    #[test]
    fn test_function_type_round_trip() {
        let prelude = Prelude::standard();
        let int = prelude.constructor(INT);
        let string = prelude.constructor(STRING);
        let ty = prelude.function_type(int.clone(), string.clone());
        assert_eq!(prelude.as_function_type(&ty), Some((&int, &string)));
    }
}
