use std::fmt;
use std::rc::Rc;

use super::error::EvalError;
use super::thunk::Thunk;

/// A one-argument function taking its argument unevaluated.
pub type Function<'a> = Rc<dyn Fn(Thunk<'a>) -> Result<Value<'a>, EvalError> + 'a>;

/// Runtime value representation
#[derive(Clone)]
pub enum Value<'a> {
    Int(i64),
    Float(f64),
    String(String),
    /// A type argument, kept only as its printed form.
    Type(String),
    Function(Function<'a>),
}

/// The runtime kind of a value, used to pick primitive overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    String,
    Type,
    Function,
}

impl Value<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Type(_) => ValueKind::Type,
            Value::Function(_) => ValueKind::Function,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Value::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Value::String(value) => f.debug_tuple("String").field(value).finish(),
            Value::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Value::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::String(value) => write!(f, "{value:?}"),
            Value::Type(ty) => write!(f, "{ty}"),
            Value::Function(_) => f.write_str("<function>"),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "Int",
            ValueKind::Float => "Double",
            ValueKind::String => "String",
            ValueKind::Type => "Type",
            ValueKind::Function => "Function",
        };
        f.write_str(name)
    }
}
