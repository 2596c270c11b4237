//! # Abstract Syntax Tree
//!
//! One expression shape and one module shape are shared by every stage of
//! the pipeline. Both are generic over two binder parameters:
//!
//! - `B` names values (lambda parameters, references, definitions)
//! - `T` names type variables (the binder of a [`Expr::Forall`] and the
//!   binders inside a [`Literal::Type`]); it defaults to `B`
//!
//! | Stage            | Tree                                           |
//! |------------------|------------------------------------------------|
//! | parser           | `Module<RawBinder>`                            |
//! | name resolution  | `Module<UniqueBinder>`                         |
//! | type checking    | `Module<TypedBinder, UniqueBinder>`            |
//!
//! Types are themselves expressions: a function type `a -> b` is the
//! operator `->` applied to `a` and `b`, a quantified type is a type-level
//! [`Expr::Lambda`], and a type constructor reference is wrapped in a
//! [`Literal::Type`].
//!
//! Trees are never mutated; each stage builds a new one.

mod binder;

pub use binder::{Binder, RawBinder, TypedBinder, UniqueBinder};

/// Expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<B, T = B> {
    /// `\x -> body`
    Lambda(B, Box<Expr<B, T>>),
    /// Abstraction of a value over a type variable.
    Forall(T, Box<Expr<B, T>>),
    /// `function argument`
    Application(Box<Expr<B, T>>, Box<Expr<B, T>>),
    Identifier(B),
    Literal(Literal<T>),
}

/// Literal payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<T> {
    Int(i64),
    Float(f64),
    String(String),
    /// A type expression used in value position, e.g. an explicit type argument.
    Type(Box<Expr<T>>),
}

impl<B, T> Expr<B, T> {
    pub fn lambda(param: B, body: Expr<B, T>) -> Self {
        Expr::Lambda(param, Box::new(body))
    }

    pub fn forall(var: T, body: Expr<B, T>) -> Self {
        Expr::Forall(var, Box::new(body))
    }

    pub fn apply(function: Expr<B, T>, argument: Expr<B, T>) -> Self {
        Expr::Application(Box::new(function), Box::new(argument))
    }

    /// `((op) left) right`
    pub fn binary(op: Expr<B, T>, left: Expr<B, T>, right: Expr<B, T>) -> Self {
        Self::apply(Self::apply(op, left), right)
    }

    pub fn type_literal(ty: Expr<T>) -> Self {
        Expr::Literal(Literal::Type(Box::new(ty)))
    }

    /// Wrap `body` in one lambda per parameter, first parameter outermost.
    pub fn curried(params: impl IntoIterator<Item = B>, body: Expr<B, T>) -> Self {
        let params: Vec<B> = params.into_iter().collect();
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| Self::lambda(param, body))
    }
}

/// Associativity of a user-declared operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// `infixl 6 +`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixityDefinition {
    pub symbol: String,
    pub associativity: Associativity,
    pub precedence: i32,
}

/// `import Outer.Inner`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module<B, T = B> {
    pub name: String,
    pub parts: Vec<ModulePart<B, T>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModulePart<B, T = B> {
    Module(Module<B, T>),
    Fixity(FixityDefinition),
    /// `name :: type`
    TypeDefinition { name: B, ty: Expr<B, T> },
    /// `name = expr`
    Definition { name: B, expr: Expr<B, T> },
    Import(ImportDeclaration),
}

impl<B, T> Module<B, T> {
    pub fn new(name: impl Into<String>, parts: Vec<ModulePart<B, T>>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    /// All definitions in this module and its submodules, depth first.
    pub fn definitions(&self) -> Vec<(&B, &Expr<B, T>)> {
        let mut found = Vec::new();
        self.collect_definitions(&mut found);
        found
    }

    fn collect_definitions<'m>(&'m self, found: &mut Vec<(&'m B, &'m Expr<B, T>)>) {
        for part in &self.parts {
            match part {
                ModulePart::Module(module) => module.collect_definitions(found),
                ModulePart::Definition { name, expr } => found.push((name, expr)),
                ModulePart::Fixity(_)
                | ModulePart::TypeDefinition { .. }
                | ModulePart::Import(_) => {}
            }
        }
    }

    /// The first direct submodule with the given name.
    pub fn submodule(&self, name: &str) -> Option<&Module<B, T>> {
        self.parts.iter().find_map(|part| match part {
            ModulePart::Module(module) if module.name == name => Some(module),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curried_nests_first_parameter_outermost() {
        let expr: Expr<RawBinder> = Expr::curried(
            ["x".to_string(), "y".to_string()],
            Expr::Identifier("x".to_string()),
        );
        assert_eq!(
            expr,
            Expr::lambda(
                "x".to_string(),
                Expr::lambda("y".to_string(), Expr::Identifier("x".to_string()))
            )
        );
    }

    #[test]
    fn test_definitions_walks_submodules() {
        let module: Module<RawBinder> = Module::new(
            "Main",
            vec![
                ModulePart::Module(Module::new(
                    "Inner",
                    vec![ModulePart::Definition {
                        name: "a".to_string(),
                        expr: Expr::Literal(Literal::Int(1)),
                    }],
                )),
                ModulePart::Definition {
                    name: "b".to_string(),
                    expr: Expr::Literal(Literal::Int(2)),
                },
            ],
        );
        let names: Vec<_> = module.definitions().into_iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(module.submodule("Inner").is_some());
    }
}
