use std::rc::Rc;

use super::thunk::Thunk;

/// Lambda parameters in scope, as a persistent linked list.
///
/// Binding a parameter returns a new scope that shares its tail with the
/// old one, so closures can capture a scope by cloning it.
pub struct Scope<'a, B> {
    head: Option<Rc<Frame<'a, B>>>,
}

struct Frame<'a, B> {
    binder: &'a B,
    value: Thunk<'a>,
    parent: Option<Rc<Frame<'a, B>>>,
}

impl<'a, B: PartialEq> Scope<'a, B> {
    pub fn empty() -> Self {
        Scope { head: None }
    }

    /// A scope with `binder` bound to `value` in front of this one.
    pub fn bind(&self, binder: &'a B, value: Thunk<'a>) -> Self {
        Scope {
            head: Some(Rc::new(Frame {
                binder,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    /// The innermost binding of `binder`.
    pub fn lookup(&self, binder: &B) -> Option<Thunk<'a>> {
        let mut frame = self.head.as_deref();
        while let Some(current) = frame {
            if current.binder == binder {
                return Some(current.value.clone());
            }
            frame = current.parent.as_deref();
        }
        None
    }
}

impl<B> Clone for Scope<'_, B> {
    fn clone(&self) -> Self {
        Scope {
            head: self.head.clone(),
        }
    }
}
