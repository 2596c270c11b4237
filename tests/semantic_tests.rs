use lumen::ast::{Expr, Literal, Module, ModulePart, UniqueBinder};
use lumen::lexer::tokenize;
use lumen::parser::parse;
use lumen::prelude::Prelude;
use lumen::semantic::{ScopeError, resolve};
use pretty_assertions::assert_eq;

fn resolve_with(source: &str, prelude: &Prelude) -> Result<Module<UniqueBinder>, ScopeError> {
    resolve(&parse(tokenize(source).unwrap()).unwrap(), prelude)
}

fn resolve_source(source: &str) -> Result<Module<UniqueBinder>, ScopeError> {
    resolve_with(source, &Prelude::standard())
}

fn definition<'m>(module: &'m Module<UniqueBinder>, path: &str) -> (&'m UniqueBinder, &'m Expr<UniqueBinder>) {
    module
        .definitions()
        .into_iter()
        .find(|(binder, _)| binder.to_string() == path)
        .unwrap_or_else(|| panic!("no definition {path}"))
}

#[test]
fn sibling_modules_get_distinct_binders() {
    let module = resolve_source(
        "module Main module A f = 1; ; module B f = 2; ; module C import A g = f; ; ;",
    )
    .unwrap();
    let (a, _) = definition(&module, "Main.A.f");
    let (b, _) = definition(&module, "Main.B.f");
    assert_ne!(a, b);

    let (_, g) = definition(&module, "Main.C.g");
    assert_eq!(g, &Expr::Identifier(a.clone()));
}

#[test]
fn references_share_the_definition_binder() {
    let module = resolve_source("module Main one = 1; two = Add one one; ;").unwrap();
    let (one, _) = definition(&module, "Main.one");
    let (_, two) = definition(&module, "Main.two");
    let Expr::Application(function, right) = two else {
        panic!("expected an application");
    };
    let Expr::Application(_, left) = function.as_ref() else {
        panic!("expected a binary application");
    };
    assert_eq!(left.as_ref(), &Expr::Identifier(one.clone()));
    assert_eq!(right.as_ref(), &Expr::Identifier(one.clone()));
}

#[test]
fn enclosing_module_is_searched() {
    let module = resolve_source("module Main g = 1; module Inner h = g; ; ;").unwrap();
    let (g, _) = definition(&module, "Main.g");
    let (_, h) = definition(&module, "Main.Inner.h");
    assert_eq!(h, &Expr::Identifier(g.clone()));
}

#[test]
fn current_module_shadows_enclosing_module() {
    let module = resolve_source("module Main g = 1; module Inner g = 2; h = g; ; ;").unwrap();
    let (inner, _) = definition(&module, "Main.Inner.g");
    let (_, h) = definition(&module, "Main.Inner.h");
    assert_eq!(h, &Expr::Identifier(inner.clone()));
}

#[test]
fn lambda_parameters_shadow_outer_names() {
    let module = resolve_source(r"module Main x = 1; f = \x -> \x -> x; ;").unwrap();
    let (global, _) = definition(&module, "Main.x");
    let (_, f) = definition(&module, "Main.f");
    let Expr::Lambda(outer, body) = f else {
        panic!("expected a lambda");
    };
    let Expr::Lambda(inner, body) = body.as_ref() else {
        panic!("expected a nested lambda");
    };
    assert_ne!(outer, inner);
    assert_eq!(body.as_ref(), &Expr::Identifier(inner.clone()));
    assert_ne!(inner, global);
}

#[test]
fn undefined_name() {
    let result = resolve_source("module Main main = missing; ;");
    assert_eq!(
        result.unwrap_err(),
        ScopeError::UnidentifiedTerminal {
            name: "missing".to_string(),
            module: "Main".to_string(),
        }
    );
}

#[test]
fn ambiguous_import() {
    let result = resolve_source(
        "module Main module A f = 1; ; module B f = 2; ; module C import A import B g = f; ; ;",
    );
    assert!(matches!(
        result,
        Err(ScopeError::AmbiguousIdentifier { ref name, ref candidates })
            if name == "f" && candidates.len() == 2
    ));
}

#[test]
fn unknown_import() {
    let result = resolve_source("module Main import Nowhere main = 1; ;");
    assert!(matches!(result, Err(ScopeError::UnknownModule { .. })));
}

#[test]
fn duplicate_definition() {
    let result = resolve_source("module Main a = 1; a = 2; ;");
    assert_eq!(
        result.unwrap_err(),
        ScopeError::DuplicateDefinition {
            name: "Main.a".to_string()
        }
    );
}

#[test]
fn signature_without_definition() {
    let result = resolve_source("module Main a :: Int; ;");
    assert_eq!(
        result.unwrap_err(),
        ScopeError::SignatureWithoutDefinition {
            name: "Main.a".to_string()
        }
    );
}

#[test]
fn builtins_resolve_to_prelude_binders() {
    let prelude = Prelude::standard();
    let module = resolve_with("module Main n :: Int; n = Add 1 2; ;", &prelude).unwrap();
    let ModulePart::TypeDefinition { ty, .. } = &module.parts[0] else {
        panic!("expected a signature");
    };
    assert_eq!(ty, &prelude.constructor("Int"));

    let (_, n) = definition(&module, "Main.n");
    let add = prelude.value_named("Add").unwrap();
    assert_eq!(
        n,
        &Expr::binary(
            Expr::Identifier(add.clone()),
            Expr::Literal(Literal::Int(1)),
            Expr::Literal(Literal::Int(2))
        )
    );
}

#[test]
fn implicit_type_variables_are_quantified() {
    let prelude = Prelude::standard();
    let module = resolve_with("module Main const :: a -> b -> a; const x y = x; ;", &prelude).unwrap();
    let ModulePart::TypeDefinition { ty, .. } = &module.parts[0] else {
        panic!("expected a signature");
    };
    let Expr::Lambda(a, inner) = ty else {
        panic!("expected a quantified type");
    };
    let Expr::Lambda(b, body) = inner.as_ref() else {
        panic!("expected a second quantifier");
    };
    let var = |binder: &UniqueBinder| Expr::Identifier(binder.clone());
    assert_eq!(
        body.as_ref(),
        &prelude.function_type(var(a), prelude.function_type(var(b), var(a)))
    );
}

#[test]
fn quantifier_before_type_checking() {
    let module = Module::new(
        "Main",
        vec![ModulePart::Definition {
            name: "main".to_string(),
            expr: Expr::forall("a".to_string(), Expr::Literal(Literal::Int(1))),
        }],
    );
    let error = resolve(&module, &Prelude::standard()).unwrap_err();
    assert_eq!(
        error,
        ScopeError::IllegalForall {
            module: "Main".to_string()
        }
    );
}
