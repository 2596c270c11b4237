use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::error::EvalError;
use super::value::Value;

type Computation<'a> = Box<dyn FnOnce() -> Result<Value<'a>, EvalError> + 'a>;

enum State<'a> {
    Pending(Computation<'a>),
    /// Currently being forced. Forcing it again means the value depends
    /// on itself.
    Forcing,
    Evaluated(Value<'a>),
    Failed(EvalError),
}

/// A shared, memoized deferred computation.
///
/// Clones share their state: the computation runs at most once, and every
/// clone sees its result.
#[derive(Clone)]
pub struct Thunk<'a>(Rc<RefCell<State<'a>>>);

impl<'a> Thunk<'a> {
    pub fn deferred(compute: impl FnOnce() -> Result<Value<'a>, EvalError> + 'a) -> Self {
        Thunk(Rc::new(RefCell::new(State::Pending(Box::new(compute)))))
    }

    pub fn ready(value: Value<'a>) -> Self {
        Thunk(Rc::new(RefCell::new(State::Evaluated(value))))
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(&*self.0.borrow(), State::Evaluated(_))
    }

    pub fn force(&self) -> Result<Value<'a>, EvalError> {
        let state = std::mem::replace(&mut *self.0.borrow_mut(), State::Forcing);
        let compute = match state {
            State::Pending(compute) => compute,
            State::Forcing => return Err(EvalError::InfiniteLoop),
            State::Evaluated(value) => {
                *self.0.borrow_mut() = State::Evaluated(value.clone());
                return Ok(value);
            }
            State::Failed(error) => {
                *self.0.borrow_mut() = State::Failed(error.clone());
                return Err(error);
            }
        };

        trace!("forcing thunk");
        let result = compute();
        *self.0.borrow_mut() = match &result {
            Ok(value) => State::Evaluated(value.clone()),
            Err(error) => State::Failed(error.clone()),
        };
        result
    }
}

impl fmt::Debug for Thunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.borrow() {
            State::Pending(_) => f.write_str("Thunk(<pending>)"),
            State::Forcing => f.write_str("Thunk(<forcing>)"),
            State::Evaluated(value) => write!(f, "Thunk({value:?})"),
            State::Failed(error) => write!(f, "Thunk({error})"),
        }
    }
}
