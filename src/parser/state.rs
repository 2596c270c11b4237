use std::collections::HashMap;
use std::fmt;

use lachs::Span;

use crate::ast::Associativity;
use crate::lexer::Terminal;

/// Syntax error with the position of the offending terminal, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: Vec::new(),
            found: None,
            span: None,
        }
    }

    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn unexpected(terminal: &Terminal, expected: impl Into<String>) -> Self {
        Self::new("unexpected token")
            .expected(expected)
            .found(terminal.describe())
            .at(terminal.position.clone())
    }

    pub fn end_of_input(expected: impl Into<String>) -> Self {
        Self::new("unexpected end of input").expected(expected)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = self.message.clone();
        if !self.expected.is_empty() {
            msg.push_str(&format!(", expected {}", self.expected.join(" or ")));
        }
        if let Some(found) = &self.found {
            msg.push_str(&format!(", found {found}"));
        }
        match &self.span {
            Some(span) if !span.source.is_empty() => write!(f, "{}", span.to_string(&msg)),
            _ => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Binding power of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixity {
    pub precedence: i32,
    pub associativity: Associativity,
}

impl Fixity {
    /// Floor passed to the outermost expression; every operator binds tighter.
    pub const FLOOR: i32 = -1;

    /// The floor for this operator's right operand. Left associative
    /// operators stop at their own level, right associative ones continue
    /// through it.
    pub fn right_floor(self) -> i32 {
        match self.associativity {
            Associativity::Left => self.precedence,
            Associativity::Right => self.precedence - 1,
        }
    }
}

/// The type arrow is usable in signatures without a declaration.
pub const ARROW: &str = "->";

pub struct ParseState {
    tokens: Vec<Terminal>,
    index: usize,
    fixities: HashMap<String, Fixity>,
}

impl ParseState {
    pub fn new(tokens: Vec<Terminal>) -> Self {
        let mut fixities = HashMap::new();
        fixities.insert(
            ARROW.to_string(),
            Fixity {
                precedence: 0,
                associativity: Associativity::Right,
            },
        );
        Self {
            tokens,
            index: 0,
            fixities,
        }
    }

    pub fn advance(&mut self) -> Option<Terminal> {
        let token = self.tokens.get(self.index).cloned()?;
        self.index += 1;
        Some(token)
    }

    pub fn peek(&self) -> Option<&Terminal> {
        self.tokens.get(self.index)
    }

    /// Look `offset` terminals past the current one.
    pub fn peek_nth(&self, offset: usize) -> Option<&Terminal> {
        self.tokens.get(self.index + offset)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    pub fn fixity(&self, symbol: &str) -> Option<Fixity> {
        self.fixities.get(symbol).copied()
    }

    /// Record an operator declaration. Later declarations of the same
    /// symbol replace earlier ones.
    pub fn declare(&mut self, symbol: impl Into<String>, fixity: Fixity) {
        self.fixities.insert(symbol.into(), fixity);
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
