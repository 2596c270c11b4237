//! # Tokenizer
//!
//! Source text is split by the `lachs` generated [`Token`] lexer and then
//! normalized into a flat sequence of [`Terminal`]s, which is what every
//! later stage works with. Normalization decodes string escapes and turns
//! the catch-all token kinds into [`LexError`]s.
//!
//! Terminals come in five kinds:
//!
//! - identifiers: an ASCII letter followed by letters and digits
//! - numbers: digits, an optional `.digits` part and an optional `e digits` part
//! - strings: double quoted, closed on the same line
//! - symbols: maximal runs of operator characters (`+`, `->`, `::`, ...)
//! - group symbols: one of `( ) { } [ ]`, always a single character
//!
//! Whitespace separates terminals and is never emitted.

mod error;
mod token;

pub use error::LexError;

use std::fmt;

use lachs::Span;
use tracing::debug;

use token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    GroupSymbol,
    Symbol,
    Identifier,
    Number,
    String,
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminalKind::GroupSymbol => "group symbol",
            TerminalKind::Symbol => "symbol",
            TerminalKind::Identifier => "identifier",
            TerminalKind::Number => "number",
            TerminalKind::String => "string",
        };
        f.write_str(name)
    }
}

/// A single lexed terminal.
///
/// For strings, `text` holds the decoded contents without the surrounding
/// quotes. Two terminals are equal when their kind and text are equal; the
/// source position is ignored.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub kind: TerminalKind,
    pub text: String,
    pub position: Span,
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Terminal {}

impl Terminal {
    pub fn new(kind: TerminalKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            position: Span::default(),
        }
    }

    pub fn is(&self, kind: TerminalKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_symbol(&self, text: &str) -> bool {
        self.is(TerminalKind::Symbol, text)
    }

    pub fn is_group(&self, text: &str) -> bool {
        self.is(TerminalKind::GroupSymbol, text)
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TerminalKind::Identifier, keyword)
    }

    /// Returns a human-readable description of the terminal
    pub fn describe(&self) -> String {
        match self.kind {
            TerminalKind::String => format!("string {}", self.source_text()),
            kind => format!("{kind} '{}'", self.text),
        }
    }

    /// The text as it would have to appear in source to lex back into this
    /// terminal.
    pub fn source_text(&self) -> String {
        match self.kind {
            TerminalKind::String => {
                let mut quoted = String::with_capacity(self.text.len() + 2);
                quoted.push('"');
                for c in self.text.chars() {
                    match c {
                        '\n' => quoted.push_str("\\n"),
                        '\r' => quoted.push_str("\\r"),
                        '\t' => quoted.push_str("\\t"),
                        '"' => quoted.push_str("\\\""),
                        '\\' => quoted.push_str("\\\\"),
                        c => quoted.push(c),
                    }
                }
                quoted.push('"');
                quoted
            }
            _ => self.text.clone(),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_text())
    }
}

/// Tokenize `source` into terminals.
///
/// Every call starts from the beginning of the text. The first lexical error
/// aborts tokenization.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Terminal>, LexError> {
    let tokens = Token::lex(source).map_err(|err| LexError::Unrecognized {
        message: err.to_string(),
    })?;

    let terminals = tokens
        .into_iter()
        .map(terminal)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = terminals.len(), "tokenized source");
    Ok(terminals)
}

fn terminal(token: Token) -> Result<Terminal, LexError> {
    let (kind, text, position) = match token {
        Token::Identifier(inner) => (TerminalKind::Identifier, inner.value, inner.position),
        Token::Number(inner) => (TerminalKind::Number, inner.value, inner.position),
        Token::GroupSymbol(inner) => (TerminalKind::GroupSymbol, inner.value, inner.position),
        Token::Symbol(inner) => (TerminalKind::Symbol, inner.value, inner.position),
        Token::StringLiteral(inner) => {
            let text = unescape(&inner.value, &inner.position)?;
            (TerminalKind::String, text, inner.position)
        }
        Token::UnterminatedString(inner) => {
            return Err(LexError::UnterminatedString {
                position: inner.position,
            });
        }
        Token::Unexpected(inner) => {
            return Err(LexError::UnexpectedCharacter {
                character: inner.value.chars().next().unwrap_or_default(),
                position: inner.position,
            });
        }
    };

    Ok(Terminal {
        kind,
        text,
        position,
    })
}

/// Strip the quotes off a string token and decode its escapes.
fn unescape(raw: &str, position: &Span) -> Result<String, LexError> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| LexError::UnterminatedString {
            position: position.clone(),
        })?;

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some('"') => decoded.push('"'),
            Some('\'') => decoded.push('\''),
            Some('\\') => decoded.push('\\'),
            Some(other) => {
                return Err(LexError::UnrecognizedEscape {
                    escape: other,
                    position: position.clone(),
                });
            }
            None => {
                return Err(LexError::UnterminatedString {
                    position: position.clone(),
                });
            }
        }
    }
    Ok(decoded)
}
