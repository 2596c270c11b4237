//! # Lazy Evaluator
//!
//! Call-by-need evaluation of a module tree with any kind of binder.
//!
//! - Every top-level definition is evaluated at most once per run. Its
//!   [`Thunk`] is memoized by binder and shared by all references to it.
//! - Application forces the function and passes the argument as an
//!   unevaluated thunk, so unused arguments are never evaluated.
//! - Names that are neither parameters nor definitions fall through to the
//!   [`Primops`] table by their local name.
//!
//! ```text
//! main = (\x -> Add x x) (Add 1 2);     => 6, `Add 1 2` evaluated once
//! main = (\x -> 1) whatever;            => 1, `whatever` never evaluated
//! ```

mod error;
mod primops;
mod scope;
mod thunk;
mod value;

pub use error::EvalError;
pub use primops::{Primops, PrimopsBuilder};
pub use scope::Scope;
pub use thunk::Thunk;
pub use value::{Function, Value, ValueKind};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{Binder, Expr, Literal, Module};

/// State shared by every closure of one evaluation run.
struct Context<'a, B, T> {
    definitions: HashMap<&'a B, &'a Expr<B, T>>,
    primops: &'a Primops,
    memo: RefCell<HashMap<&'a B, Thunk<'a>>>,
}

/// Evaluate the single definition of `module` whose binder satisfies
/// `select`.
#[tracing::instrument(level = "debug", skip_all, fields(module = %module.name))]
pub fn evaluate<'a, B, T>(
    module: &'a Module<B, T>,
    primops: &'a Primops,
    select: impl Fn(&B) -> bool,
) -> Result<Value<'a>, EvalError>
where
    B: Binder + 'a,
    T: Binder + 'a,
{
    let mut definitions = HashMap::new();
    for (name, expr) in module.definitions() {
        if definitions.insert(name, expr).is_some() {
            return Err(EvalError::DuplicateDefinition {
                name: name.to_string(),
            });
        }
    }
    debug!(definitions = definitions.len(), "flattened module");

    let mut entries: Vec<&'a B> = definitions.keys().copied().filter(|name| select(*name)).collect();
    let entry = match entries.len() {
        0 => return Err(EvalError::EntryPointNotFound),
        1 => entries.remove(0),
        _ => {
            let mut candidates: Vec<String> = entries.iter().map(|name| name.to_string()).collect();
            candidates.sort();
            return Err(EvalError::AmbiguousEntryPoint { candidates });
        }
    };

    let context = Rc::new(Context {
        definitions,
        primops,
        memo: RefCell::new(HashMap::new()),
    });
    let result = match global(&context, entry) {
        Some(thunk) => thunk.force(),
        None => Err(EvalError::EntryPointNotFound),
    };
    // memoized thunks hold the context, drop them to break the cycle
    context.memo.borrow_mut().clear();
    result
}

/// Evaluate the definition whose binder prints as `name`.
pub fn evaluate_named<'a, B, T>(
    module: &'a Module<B, T>,
    primops: &'a Primops,
    name: &str,
) -> Result<Value<'a>, EvalError>
where
    B: Binder + 'a,
    T: Binder + 'a,
{
    evaluate(module, primops, |binder| binder.to_string() == name)
}

fn eval<'a, B, T>(
    context: &Rc<Context<'a, B, T>>,
    expr: &'a Expr<B, T>,
    scope: &Scope<'a, B>,
) -> Result<Value<'a>, EvalError>
where
    B: Binder + 'a,
    T: Binder + 'a,
{
    match expr {
        Expr::Lambda(param, body) => {
            let context = Rc::clone(context);
            let scope = scope.clone();
            Ok(Value::Function(Rc::new(move |argument: Thunk<'a>| {
                eval(&context, body, &scope.bind(param, argument))
            })))
        }
        Expr::Forall(..) => Err(EvalError::IllegalForall),
        Expr::Application(function, argument) => {
            let function = eval(context, function, scope)?;
            let argument = {
                let context = Rc::clone(context);
                let scope = scope.clone();
                Thunk::deferred(move || eval(&context, argument, &scope))
            };
            match function {
                Value::Function(function) => function(argument),
                other => Err(EvalError::NotAFunction {
                    found: other.to_string(),
                }),
            }
        }
        Expr::Identifier(name) => {
            if let Some(thunk) = scope.lookup(name) {
                return thunk.force();
            }
            if let Some(thunk) = global(context, name) {
                return thunk.force();
            }
            context
                .primops
                .lookup(name.local_name())
                .ok_or_else(|| EvalError::SymbolNotFound {
                    name: name.to_string(),
                })
        }
        Expr::Literal(literal) => Ok(match literal {
            Literal::Int(value) => Value::Int(*value),
            Literal::Float(value) => Value::Float(*value),
            Literal::String(value) => Value::String(value.clone()),
            Literal::Type(ty) => Value::Type(ty.to_string()),
        }),
    }
}

/// The memoized thunk of a top-level definition.
fn global<'a, B, T>(context: &Rc<Context<'a, B, T>>, name: &B) -> Option<Thunk<'a>>
where
    B: Binder + 'a,
    T: Binder + 'a,
{
    let (&binder, &expr) = context.definitions.get_key_value(name)?;
    let cached = context.memo.borrow().get(binder).cloned();
    if let Some(thunk) = cached {
        return Some(thunk);
    }

    trace!(definition = %binder, "allocating thunk");
    let shared = Rc::clone(context);
    let thunk = Thunk::deferred(move || eval(&shared, expr, &Scope::empty()));
    context.memo.borrow_mut().insert(binder, thunk.clone());
    Some(thunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ModulePart, RawBinder};

    fn definition(name: &str, expr: Expr<RawBinder>) -> ModulePart<RawBinder> {
        ModulePart::Definition {
            name: name.to_string(),
            expr,
        }
    }

    fn ident(name: &str) -> Expr<RawBinder> {
        Expr::Identifier(name.to_string())
    }

    fn int(value: i64) -> Expr<RawBinder> {
        Expr::Literal(Literal::Int(value))
    }

    #[test]
    fn test_literal_entry() {
        let module = Module::new("Main", vec![definition("main", int(7))]);
        let primops = Primops::standard();
        let value = evaluate_named(&module, &primops, "main").unwrap();
        assert_eq!(value.as_int(), Some(7));
    }

    #[test]
    fn test_application_of_lambda() {
        let body = Expr::binary(ident("Add"), ident("x"), ident("x"));
        let main = Expr::apply(Expr::lambda("x".to_string(), body), int(21));
        let module = Module::new("Main", vec![definition("main", main)]);
        let primops = Primops::standard();
        assert_eq!(evaluate_named(&module, &primops, "main").unwrap().as_int(), Some(42));
    }

    #[test]
    fn test_unused_argument_is_not_evaluated() {
        let main = Expr::apply(Expr::lambda("x".to_string(), int(1)), ident("missing"));
        let module = Module::new("Main", vec![definition("main", main)]);
        let primops = Primops::standard();
        assert_eq!(evaluate_named(&module, &primops, "main").unwrap().as_int(), Some(1));
    }

    #[test]
    fn test_missing_symbol() {
        let module = Module::new("Main", vec![definition("main", ident("missing"))]);
        let primops = Primops::standard();
        assert_eq!(
            evaluate_named(&module, &primops, "main").unwrap_err(),
            EvalError::SymbolNotFound {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_applying_a_number() {
        let module = Module::new("Main", vec![definition("main", Expr::apply(int(1), int(2)))]);
        let primops = Primops::standard();
        assert_eq!(
            evaluate_named(&module, &primops, "main").unwrap_err(),
            EvalError::NotAFunction {
                found: "1".to_string()
            }
        );
    }

    #[test]
    fn test_forall_is_rejected() {
        let main = Expr::forall("a".to_string(), int(1));
        let module = Module::new("Main", vec![definition("main", main)]);
        let primops = Primops::standard();
        assert_eq!(
            evaluate_named(&module, &primops, "main").unwrap_err(),
            EvalError::IllegalForall
        );
    }

    #[test]
    fn test_type_literal_is_inert() {
        let main = Expr::type_literal(ident("Int"));
        let module = Module::new("Main", vec![definition("main", main)]);
        let primops = Primops::standard();
        let value = evaluate_named(&module, &primops, "main").unwrap();
        assert_eq!(value.kind(), ValueKind::Type);
        assert_eq!(value.to_string(), "Int");
    }

    #[test]
    fn test_self_reference_is_an_infinite_loop() {
        let module = Module::new("Main", vec![definition("main", ident("main"))]);
        let primops = Primops::standard();
        assert_eq!(
            evaluate_named(&module, &primops, "main").unwrap_err(),
            EvalError::InfiniteLoop
        );
    }

    #[test]
    fn test_entry_point_selection() {
        let module = Module::new(
            "Main",
            vec![definition("first", int(1)), definition("second", int(2))],
        );
        let primops = Primops::standard();
        assert_eq!(
            evaluate_named(&module, &primops, "third").unwrap_err(),
            EvalError::EntryPointNotFound
        );
        assert_eq!(
            evaluate(&module, &primops, |_| true).unwrap_err(),
            EvalError::AmbiguousEntryPoint {
                candidates: vec!["first".to_string(), "second".to_string()]
            }
        );
    }

    #[test]
    fn test_duplicate_raw_names() {
        let module = Module::new(
            "Main",
            vec![
                ModulePart::Module(Module::new("Inner", vec![definition("f", int(1))])),
                definition("f", int(2)),
            ],
        );
        let primops = Primops::standard();
        assert_eq!(
            evaluate_named(&module, &primops, "f").unwrap_err(),
            EvalError::DuplicateDefinition {
                name: "f".to_string()
            }
        );
    }
}
