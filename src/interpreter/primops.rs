//! Primitive operations.
//!
//! A primitive is registered under a name with one or more overloads, each
//! an implementation plus the kinds of values it accepts. Looking a
//! primitive up yields a curried function value that collects its arguments
//! unevaluated, forces them all once the last one arrives and dispatches to
//! the overload matching their kinds.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::error::EvalError;
use super::thunk::Thunk;
use super::value::{Value, ValueKind};

type Implementation = dyn for<'v> Fn(&[Value<'v>]) -> Result<Value<'v>, EvalError>;

#[derive(Clone)]
struct Overload {
    params: Vec<ValueKind>,
    implementation: Rc<Implementation>,
}

/// All overloads registered under one name.
struct Family {
    name: String,
    arity: usize,
    overloads: Vec<Overload>,
}

impl Family {
    fn dispatch<'a>(&self, arguments: &[Value<'a>]) -> Result<Value<'a>, EvalError> {
        let kinds: Vec<ValueKind> = arguments.iter().map(Value::kind).collect();
        let overload = self
            .overloads
            .iter()
            .find(|overload| overload.params == kinds)
            .ok_or_else(|| EvalError::NoMatchingOverload {
                name: self.name.clone(),
                found: kinds.iter().map(ToString::to_string).collect(),
            })?;
        trace!(primitive = %self.name, "dispatch");
        (overload.implementation)(arguments)
    }
}

/// Table of primitive operations by name.
#[derive(Clone)]
pub struct Primops {
    table: HashMap<String, Rc<Family>>,
}

impl Primops {
    /// `Add` over two integers or two floats.
    pub fn standard() -> Self {
        PrimopsBuilder::standard().group()
    }

    pub fn builder() -> PrimopsBuilder {
        PrimopsBuilder::new()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// The primitive `name` as a curried function value.
    pub fn lookup<'a>(&self, name: &str) -> Option<Value<'a>> {
        self.table
            .get(name)
            .map(|family| curry(Rc::clone(family), Vec::new()))
    }
}

impl Default for Primops {
    fn default() -> Self {
        Self::standard()
    }
}

fn curry<'a>(family: Rc<Family>, collected: Vec<Thunk<'a>>) -> Value<'a> {
    Value::Function(Rc::new(move |argument: Thunk<'a>| {
        let mut collected = collected.clone();
        collected.push(argument);
        if collected.len() < family.arity {
            return Ok(curry(Rc::clone(&family), collected));
        }
        let arguments = collected
            .iter()
            .map(Thunk::force)
            .collect::<Result<Vec<_>, _>>()?;
        family.dispatch(&arguments)
    }))
}

/// Collects overloads and checks them for consistency.
#[derive(Default)]
pub struct PrimopsBuilder {
    registrations: Vec<(String, Overload)>,
}

impl PrimopsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder holding the standard primitives.
    pub fn standard() -> Self {
        Self::new()
            .register("Add", &[ValueKind::Int, ValueKind::Int], |arguments| {
                match arguments {
                    [Value::Int(left), Value::Int(right)] => left
                        .checked_add(*right)
                        .map(Value::Int)
                        .ok_or_else(|| EvalError::IntegerOverflow {
                            operation: "Add".to_string(),
                        }),
                    _ => Err(EvalError::NoMatchingOverload {
                        name: "Add".to_string(),
                        found: arguments.iter().map(|a| a.kind().to_string()).collect(),
                    }),
                }
            })
            .register("Add", &[ValueKind::Float, ValueKind::Float], |arguments| {
                match arguments {
                    [Value::Float(left), Value::Float(right)] => Ok(Value::Float(left + right)),
                    _ => Err(EvalError::NoMatchingOverload {
                        name: "Add".to_string(),
                        found: arguments.iter().map(|a| a.kind().to_string()).collect(),
                    }),
                }
            })
    }

    /// Register one overload of `name`.
    pub fn register<F>(mut self, name: &str, params: &[ValueKind], implementation: F) -> Self
    where
        F: for<'v> Fn(&[Value<'v>]) -> Result<Value<'v>, EvalError> + 'static,
    {
        self.registrations.push((
            name.to_string(),
            Overload {
                params: params.to_vec(),
                implementation: Rc::new(implementation),
            },
        ));
        self
    }

    /// Group the overloads by name. Fails if a primitive has no parameters
    /// or its overloads disagree on their arity.
    pub fn build(self) -> Result<Primops, EvalError> {
        let mut arities: HashMap<&str, usize> = HashMap::new();
        for (name, overload) in &self.registrations {
            let arity = overload.params.len();
            if arity == 0 {
                return Err(EvalError::NullaryPrimop { name: name.clone() });
            }
            let expected = *arities.entry(name).or_insert(arity);
            if expected != arity {
                return Err(EvalError::PrimopArity {
                    name: name.clone(),
                    expected,
                    found: arity,
                });
            }
        }
        Ok(self.group())
    }

    fn group(self) -> Primops {
        let mut families: HashMap<String, Family> = HashMap::new();
        for (name, overload) in self.registrations {
            families
                .entry(name.clone())
                .or_insert_with(|| Family {
                    name,
                    arity: overload.params.len(),
                    overloads: Vec::new(),
                })
                .overloads
                .push(overload);
        }
        Primops {
            table: families
                .into_iter()
                .map(|(name, family)| (name, Rc::new(family)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply<'a>(function: Value<'a>, argument: Value<'a>) -> Result<Value<'a>, EvalError> {
        match function {
            Value::Function(f) => f(Thunk::ready(argument)),
            other => panic!("not a function: {other}"),
        }
    }

    #[test]
    fn test_add_integers() {
        let primops = Primops::standard();
        let add = primops.lookup("Add").unwrap();
        let partial = apply(add, Value::Int(1)).unwrap();
        assert_eq!(apply(partial, Value::Int(2)).unwrap().as_int(), Some(3));
    }

    #[test]
    fn test_add_floats() {
        let primops = Primops::standard();
        let add = primops.lookup("Add").unwrap();
        let partial = apply(add, Value::Float(1.5)).unwrap();
        let Value::Float(sum) = apply(partial, Value::Float(2.0)).unwrap() else {
            panic!("expected a float");
        };
        assert_eq!(sum, 3.5);
    }

    #[test]
    fn test_mixed_arguments_have_no_overload() {
        let primops = Primops::standard();
        let add = primops.lookup("Add").unwrap();
        let partial = apply(add, Value::Int(1)).unwrap();
        assert_eq!(
            apply(partial, Value::Float(2.0)).unwrap_err(),
            EvalError::NoMatchingOverload {
                name: "Add".to_string(),
                found: vec!["Int".to_string(), "Double".to_string()],
            }
        );
    }

    #[test]
    fn test_integer_overflow() {
        let primops = Primops::standard();
        let add = primops.lookup("Add").unwrap();
        let partial = apply(add, Value::Int(i64::MAX)).unwrap();
        assert!(matches!(
            apply(partial, Value::Int(1)),
            Err(EvalError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_inconsistent_arity_is_rejected() {
        let result = PrimopsBuilder::standard()
            .register("Add", &[ValueKind::Int], |arguments| Ok(arguments[0].clone()))
            .build();
        assert!(matches!(
            result,
            Err(EvalError::PrimopArity {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_nullary_is_rejected() {
        let result = PrimopsBuilder::new()
            .register("Zero", &[], |_| Ok(Value::Int(0)))
            .build();
        assert!(matches!(result, Err(EvalError::NullaryPrimop { .. })));
    }

    #[test]
    fn test_unknown_primitive() {
        assert!(Primops::standard().lookup("Mul").is_none());
        assert!(Primops::standard().contains("Add"));
    }
}
