//! # Type Error Definitions
//!
//! Errors raised while assigning types to binders or while running
//! unification over a definition. Types are rendered into the error when it
//! is created, so an error stays meaningful after the pass that produced it
//! has dropped its substitution.
//!
//! ## Example Error Messages
//!
//! ```text
//! Type error: definition of Main.f did not contain a type definition
//! Type error: cannot unify types String and Int
//!   Note: in definition of Main.bad
//! Type error: declared type did not match actual type for Main.f: declared \a -> (a -> a), actual (Int -> Int)
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A definition without a `::` signature.
    MissingSignature { name: String },
    /// A reference with no type in scope.
    UnboundIdentifier { name: String },
    /// A type literal used as a value.
    InvalidTypeLiteral { literal: String },
    /// Two types that cannot be made equal.
    CannotUnify {
        left: String,
        right: String,
        context: Option<String>,
    },
    /// A placeholder that would have to contain itself.
    OccursCheck {
        var: String,
        ty: String,
        context: Option<String>,
    },
    /// The generalized inferred type differs from the signature.
    DeclaredTypeMismatch {
        name: String,
        declared: String,
        actual: String,
    },
    /// A quantifier node in input that has not been through inference.
    IllegalForall,
}

impl TypeError {
    pub fn cannot_unify(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        TypeError::CannotUnify {
            left: left.to_string(),
            right: right.to_string(),
            context: None,
        }
    }

    /// Add context to this error (only affects unification failures).
    pub fn with_context(mut self, note: String) -> Self {
        match &mut self {
            TypeError::CannotUnify { context, .. } | TypeError::OccursCheck { context, .. } => {
                *context = Some(note);
            }
            _ => {}
        }
        self
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (msg, context) = match self {
            TypeError::MissingSignature { name } => (
                format!("definition of {} did not contain a type definition", name),
                None,
            ),
            TypeError::UnboundIdentifier { name } => (format!("unbound identifier: {}", name), None),
            TypeError::InvalidTypeLiteral { literal } => {
                (format!("invalid type literal in expression: {}", literal), None)
            }
            TypeError::CannotUnify {
                left,
                right,
                context,
            } => (format!("cannot unify types {} and {}", left, right), context.as_ref()),
            TypeError::OccursCheck { var, ty, context } => (
                format!("cannot construct infinite type: {} = {}", var, ty),
                context.as_ref(),
            ),
            TypeError::DeclaredTypeMismatch {
                name,
                declared,
                actual,
            } => (
                format!(
                    "declared type did not match actual type for {}: declared {}, actual {}",
                    name, declared, actual
                ),
                None,
            ),
            TypeError::IllegalForall => ("quantifier is not allowed in this position".to_string(), None),
        };
        match context {
            Some(note) => write!(f, "Type error: {}\n  Note: {}", msg, note),
            None => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for TypeError {}
