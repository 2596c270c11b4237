//! Parser combinators over [`ParseState`].
//!
//! Parsers are boxed closures so grammar rules can be built from plain
//! functions and glued with operators:
//!
//! | operator | meaning                            |
//! |----------|------------------------------------|
//! | `a + b`  | both, result `(A, B)`              |
//! | `a - b`  | both, keep `A`                     |
//! | `a * b`  | both, keep `B`                     |
//! | `a >> f` | map the result of `a` through `f`  |

use std::ops::{Add, Mul, Shr, Sub};
use std::rc::Rc;

use crate::lexer::{Terminal, TerminalKind};

use super::state::{ParseError, ParseResult, ParseState, Parser};

pub struct BoxedParser<T> {
    parser: Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>,
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state: &mut ParseState| parser.parse(state)),
        }
    }

    /// Feed the result of `self` into a step that may reject it.
    pub fn and_then<U: 'static>(self, step: impl Fn(T) -> ParseResult<U> + 'static) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| step(self.parse(state)?))
    }

    /// Report a failure as "expected `name`".
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            self.parse(state).map_err(|mut err| {
                err.expected = vec![name.to_string()];
                err
            })
        })
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        BoxedParser::new(move |state: &mut ParseState| Ok((self.parse(state)?, rhs.parse(state)?)))
    }
}

impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        (self + rhs) >> |(kept, _): (T, U)| kept
    }
}

impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        (self + rhs) >> |(_, kept): (T, U)| kept
    }
}

impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        BoxedParser::new(move |state: &mut ParseState| self.parse(state).map(&f))
    }
}

/// The next terminal, if it satisfies `accept`.
fn satisfy(expected: String, accept: impl Fn(&Terminal) -> bool + 'static) -> BoxedParser<Terminal> {
    BoxedParser::new(move |state: &mut ParseState| {
        match state.peek() {
            None => return Err(ParseError::end_of_input(expected.clone())),
            Some(terminal) if !accept(terminal) => {
                return Err(ParseError::unexpected(terminal, expected.clone()));
            }
            Some(_) => {}
        }
        state
            .advance()
            .ok_or_else(|| ParseError::end_of_input(expected.clone()))
    })
}

pub fn expect_kind(kind: TerminalKind) -> BoxedParser<Terminal> {
    satisfy(kind.to_string(), move |t| t.kind == kind)
}

/// A keyword, lexed as an identifier
pub fn expect_keyword(keyword: &'static str) -> BoxedParser<Terminal> {
    satisfy(format!("'{keyword}'"), move |t| t.is_keyword(keyword))
}

pub fn expect_symbol(symbol: &'static str) -> BoxedParser<Terminal> {
    satisfy(format!("'{symbol}'"), move |t| t.is_symbol(symbol))
}

pub fn expect_group(symbol: &'static str) -> BoxedParser<Terminal> {
    satisfy(format!("'{symbol}'"), move |t| t.is_group(symbol))
}

/// Zero or more occurrences. A failed attempt consumes nothing.
pub fn many<T: 'static>(item: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut items = Vec::new();
        loop {
            let checkpoint = state.position();
            match item.parse(state) {
                Ok(next) => items.push(next),
                Err(_) => {
                    state.restore(checkpoint);
                    return Ok(items);
                }
            }
        }
    })
}
