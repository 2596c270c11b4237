//! # Name Resolution
//!
//! Rewrites a [`Module<RawBinder>`] into a [`Module<UniqueBinder>`] in two
//! passes:
//!
//! 1. [`Definitions::collect`] walks the module tree and allocates one
//!    unique binder per definition, keyed by its fully qualified path
//!    (`Main.Inner.f`).
//! 2. [`Resolver`] walks the tree again and replaces every name with the
//!    binder it refers to. Lambda parameters get fresh binders scoped to the
//!    lambda body. Builtin type names resolve to type literals, builtin
//!    values to plain identifiers.
//!
//! Type signatures may mention lower-case type variables without declaring
//! them; those are quantified with type-level lambdas around the signature.
//!
//! Any name that cannot be resolved aborts the pass.

mod collect;
mod error;
mod resolve;

pub use collect::Definitions;
pub use error::ScopeError;
pub use resolve::Resolver;

use tracing::debug;

use crate::ast::{Module, RawBinder, UniqueBinder};
use crate::prelude::Prelude;

/// Resolve every name in `module`.
#[tracing::instrument(level = "debug", skip_all, fields(module = %module.name))]
pub fn resolve(
    module: &Module<RawBinder>,
    prelude: &Prelude,
) -> Result<Module<UniqueBinder>, ScopeError> {
    let definitions = Definitions::collect(module)?;
    debug!(definitions = definitions.len(), "collected definitions");
    Resolver::new(&definitions, prelude).module(module, &[])
}
