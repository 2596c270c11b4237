use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A name bound neither locally, globally nor as a primitive.
    SymbolNotFound { name: String },
    /// Application of something that is not a function.
    NotAFunction { found: String },
    IllegalForall,
    /// No overload of a primitive accepts the given argument kinds.
    NoMatchingOverload { name: String, found: Vec<String> },
    /// Overloads of one primitive disagree on their number of parameters.
    PrimopArity {
        name: String,
        expected: usize,
        found: usize,
    },
    /// A primitive registered without parameters.
    NullaryPrimop { name: String },
    EntryPointNotFound,
    AmbiguousEntryPoint { candidates: Vec<String> },
    /// A value that depends on itself.
    InfiniteLoop,
    DuplicateDefinition { name: String },
    IntegerOverflow { operation: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            EvalError::SymbolNotFound { name } => format!("symbol not found: {}", name),
            EvalError::NotAFunction { found } => format!("cannot apply non-function value {}", found),
            EvalError::IllegalForall => "quantifier reached evaluation".to_string(),
            EvalError::NoMatchingOverload { name, found } => format!(
                "no overload of {} accepts arguments ({})",
                name,
                found.join(", ")
            ),
            EvalError::PrimopArity {
                name,
                expected,
                found,
            } => format!(
                "overloads of primitive {} take {} and {} arguments",
                name, expected, found
            ),
            EvalError::NullaryPrimop { name } => {
                format!("primitive {} must take at least one argument", name)
            }
            EvalError::EntryPointNotFound => "entry point not found".to_string(),
            EvalError::AmbiguousEntryPoint { candidates } => {
                format!("ambiguous entry point: {}", candidates.join(", "))
            }
            EvalError::InfiniteLoop => "infinite loop: value depends on itself".to_string(),
            EvalError::DuplicateDefinition { name } => format!("duplicate definition of {}", name),
            EvalError::IntegerOverflow { operation } => format!("integer overflow in {}", operation),
        };
        write!(f, "Evaluation error: {}", msg)
    }
}

impl std::error::Error for EvalError {}
