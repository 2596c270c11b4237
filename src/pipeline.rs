//! Convenience entry points running several stages in a row.

use crate::ast::{Module, RawBinder, UniqueBinder};
use crate::error::Error;
use crate::interpreter::{Primops, evaluate_named};
use crate::lexer::{Terminal, tokenize};
use crate::parser::parse;
use crate::prelude::Prelude;
use crate::semantic::resolve;
use crate::types::{TypedModule, check};

/// The builtins every stage of a run agrees on.
#[derive(Clone, Default)]
pub struct Pipeline {
    pub prelude: Prelude,
    pub primops: Primops,
}

impl Pipeline {
    pub fn new(prelude: Prelude, primops: Primops) -> Self {
        Self { prelude, primops }
    }

    pub fn tokens(&self, source: &str) -> Result<Vec<Terminal>, Error> {
        Ok(tokenize(source)?)
    }

    pub fn parse(&self, source: &str) -> Result<Module<RawBinder>, Error> {
        Ok(parse(self.tokens(source)?)?)
    }

    pub fn resolve(&self, source: &str) -> Result<Module<UniqueBinder>, Error> {
        Ok(resolve(&self.parse(source)?, &self.prelude)?)
    }

    /// The resolved module together with its type-checked counterpart.
    pub fn check(&self, source: &str) -> Result<(Module<UniqueBinder>, TypedModule), Error> {
        let resolved = self.resolve(source)?;
        let typed = check(&resolved, &self.prelude)?;
        Ok((resolved, typed))
    }

    /// Type check `source`, then evaluate the definition named `entry`
    /// (fully qualified, e.g. `Main.main`).
    ///
    /// The value is returned in printed form since it may borrow from the
    /// module it was computed from.
    pub fn run(&self, source: &str, entry: &str) -> Result<String, Error> {
        let (resolved, _) = self.check(source)?;
        let value = evaluate_named(&resolved, &self.primops, entry)?;
        Ok(value.to_string())
    }

    /// Evaluate the parsed module directly, without name resolution or type
    /// checking. `entry` is matched against the unqualified definition name.
    pub fn run_raw(&self, source: &str, entry: &str) -> Result<String, Error> {
        let module = self.parse(source)?;
        let value = evaluate_named(&module, &self.primops, entry)?;
        Ok(value.to_string())
    }
}
