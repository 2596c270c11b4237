//! Pretty-printing for expressions and modules.
//!
//! Output is valid source text where possible: operator applications print
//! infix, bare operators print in parentheses, and a printed module can be
//! parsed again as long as its fixity declarations are kept.

use std::fmt::{self, Display, Formatter, Write};

use crate::ast::{Associativity, Binder, Expr, Literal, Module, ModulePart};

impl<B: Binder, T: Binder> Display for Expr<B, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Lambda(param, body) => {
                write!(f, "\\")?;
                write_name(f, param)?;
                write!(f, " -> {body}")
            }
            Expr::Forall(var, body) => {
                write!(f, "/\\")?;
                write_name(f, var)?;
                write!(f, " -> {body}")
            }
            Expr::Application(function, argument) => {
                if let Some((op, left, right)) = as_binary(self) {
                    return write!(f, "({} {op} {})", left, right);
                }
                write_function(f, function)?;
                f.write_char(' ')?;
                write_argument(f, argument)
            }
            Expr::Identifier(name) => write_name(f, name),
            Expr::Literal(literal) => literal.fmt(f),
        }
    }
}

impl<T: Binder> Display for Literal<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value:?}"),
            Literal::String(value) => write!(f, "{value:?}"),
            Literal::Type(ty) => ty.fmt(f),
        }
    }
}

impl<B: Binder, T: Binder> Display for Module<B, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_module(f, self, 0)
    }
}

fn write_module<B: Binder, T: Binder>(
    f: &mut Formatter<'_>,
    module: &Module<B, T>,
    depth: usize,
) -> fmt::Result {
    let indent = "    ".repeat(depth);
    writeln!(f, "{indent}module {}", module.name)?;
    for part in &module.parts {
        match part {
            ModulePart::Module(inner) => write_module(f, inner, depth + 1)?,
            ModulePart::Fixity(fixity) => {
                let keyword = match fixity.associativity {
                    Associativity::Left => "infixl",
                    Associativity::Right => "infixr",
                };
                writeln!(
                    f,
                    "{indent}    {keyword} {} {}",
                    fixity.precedence, fixity.symbol
                )?;
            }
            ModulePart::Import(import) => {
                writeln!(f, "{indent}    import {}", import.path.join("."))?
            }
            ModulePart::TypeDefinition { name, ty } => {
                write!(f, "{indent}    ")?;
                write_name(f, name)?;
                writeln!(f, " :: {ty};")?;
            }
            ModulePart::Definition { name, expr } => {
                write!(f, "{indent}    ")?;
                write_name(f, name)?;
                writeln!(f, " = {expr};")?;
            }
        }
    }
    writeln!(f, "{indent};")
}

fn write_name(f: &mut Formatter<'_>, name: &impl Binder) -> fmt::Result {
    if name.is_operator() {
        write!(f, "({name})")
    } else {
        write!(f, "{name}")
    }
}

fn write_function<B: Binder, T: Binder>(f: &mut Formatter<'_>, expr: &Expr<B, T>) -> fmt::Result {
    match expr {
        Expr::Lambda(..) | Expr::Forall(..) => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

fn write_argument<B: Binder, T: Binder>(f: &mut Formatter<'_>, expr: &Expr<B, T>) -> fmt::Result {
    match expr {
        Expr::Application(..) if as_binary(expr).is_none() => write!(f, "({expr})"),
        Expr::Lambda(..) | Expr::Forall(..) => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

/// Splits `((op) left) right` into its parts when `op` is an operator,
/// either as a value identifier or as a type constructor literal.
fn as_binary<B: Binder, T: Binder>(expr: &Expr<B, T>) -> Option<(String, &Expr<B, T>, &Expr<B, T>)> {
    let Expr::Application(function, right) = expr else {
        return None;
    };
    let Expr::Application(op, left) = function.as_ref() else {
        return None;
    };
    let symbol = match op.as_ref() {
        Expr::Identifier(name) if name.is_operator() => name.to_string(),
        Expr::Literal(Literal::Type(ty)) => match ty.as_ref() {
            Expr::Identifier(name) if name.is_operator() => name.to_string(),
            _ => return None,
        },
        _ => return None,
    };
    Some((symbol, left, right))
}
