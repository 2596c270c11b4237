use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Expr;

/// The identity of a name in the tree.
///
/// Every stage of the pipeline uses the same [`Expr`] shape and only swaps
/// the binder: raw source text after parsing, [`UniqueBinder`] after name
/// resolution and [`TypedBinder`] after type assignment.
pub trait Binder: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// The unqualified name as written in source.
    fn local_name(&self) -> &str;

    /// Whether the name is an operator (`+`, `->`) rather than a word.
    fn is_operator(&self) -> bool {
        self.local_name()
            .chars()
            .next()
            .is_some_and(|c| !c.is_alphanumeric())
    }
}

/// Binder straight out of the parser: the token text.
pub type RawBinder = String;

impl Binder for String {
    fn local_name(&self) -> &str {
        self
    }
}

/// A binder with identity semantics.
///
/// Two unique binders are equal only when they come from the same call to
/// [`UniqueBinder::new`]; the path is kept for display.
#[derive(Clone)]
pub struct UniqueBinder(Rc<Vec<String>>);

impl UniqueBinder {
    pub fn new(path: Vec<String>) -> Self {
        Self(Rc::new(path))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(vec![name.into()])
    }

    pub fn path(&self) -> &[String] {
        &self.0
    }
}

impl PartialEq for UniqueBinder {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for UniqueBinder {}

impl Hash for UniqueBinder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for UniqueBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:p}", self, Rc::as_ptr(&self.0))
    }
}

impl fmt::Display for UniqueBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl Binder for UniqueBinder {
    fn local_name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

/// A binder tagged with its type.
///
/// Equality and hashing look at `name` only, so a reference and its binding
/// site match even when they carry different (instantiated) types.
#[derive(Debug, Clone)]
pub struct TypedBinder<B = UniqueBinder> {
    pub name: B,
    pub ty: Expr<B>,
}

impl<B> TypedBinder<B> {
    pub fn new(name: B, ty: Expr<B>) -> Self {
        Self { name, ty }
    }
}

impl<B: PartialEq> PartialEq for TypedBinder<B> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<B: Eq> Eq for TypedBinder<B> {}

impl<B: Hash> Hash for TypedBinder<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<B: fmt::Display> fmt::Display for TypedBinder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

impl<B: Binder> Binder for TypedBinder<B> {
    fn local_name(&self) -> &str {
        self.name.local_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unique_binders_compare_by_identity() {
        let a = UniqueBinder::new(vec!["Main".into(), "x".into()]);
        let b = UniqueBinder::new(vec!["Main".into(), "x".into()]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_unique_binder_hash_follows_identity() {
        let a = UniqueBinder::named("x");
        let b = UniqueBinder::named("x");
        let set: HashSet<_> = [a.clone(), b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_typed_binder_ignores_type() {
        let name = UniqueBinder::named("f");
        let int = Expr::Identifier(UniqueBinder::named("Int"));
        let string = Expr::Identifier(UniqueBinder::named("String"));
        assert_eq!(
            TypedBinder::new(name.clone(), int),
            TypedBinder::new(name, string)
        );
    }

    #[test]
    fn test_operator_detection() {
        assert!("+".to_string().is_operator());
        assert!("->".to_string().is_operator());
        assert!(!"add".to_string().is_operator());
        assert_eq!(UniqueBinder::new(vec!["M".into(), "+".into()]).local_name(), "+");
    }
}
