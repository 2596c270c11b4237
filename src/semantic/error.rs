use std::fmt;

/// Name resolution errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A name that is neither local, defined in an enclosing module, nor builtin
    UnidentifiedTerminal { name: String, module: String },
    /// A name defined in more than one module that is in scope
    AmbiguousIdentifier { name: String, candidates: Vec<String> },
    /// A quantifier appeared before type checking introduced it
    IllegalForall { module: String },
    /// Two definitions with the same fully qualified name
    DuplicateDefinition { name: String },
    /// A type signature for a name that is never defined
    SignatureWithoutDefinition { name: String },
    /// An import of a module that does not exist
    UnknownModule { path: String, module: String },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ScopeError::UnidentifiedTerminal { name, module } => {
                format!("unidentified terminal '{}' in module {}", name, module)
            }
            ScopeError::AmbiguousIdentifier { name, candidates } => format!(
                "ambiguous identifier '{}', candidates: {}",
                name,
                candidates.join(", ")
            ),
            ScopeError::IllegalForall { module } => {
                format!("quantifier is not allowed before type checking (in module {})", module)
            }
            ScopeError::DuplicateDefinition { name } => {
                format!("'{}' is defined more than once", name)
            }
            ScopeError::SignatureWithoutDefinition { name } => {
                format!("type signature for '{}' lacks an accompanying definition", name)
            }
            ScopeError::UnknownModule { path, module } => {
                format!("unknown module '{}' imported in module {}", path, module)
            }
        };
        write!(f, "Scope error: {}", msg)
    }
}

impl std::error::Error for ScopeError {}
