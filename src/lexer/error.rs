use std::fmt;

use lachs::Span;

/// Fatal conditions found while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A string literal reached the end of its line before the closing quote.
    UnterminatedString { position: Span },
    /// A backslash escape outside of `\n \r \t \" \' \\`.
    UnrecognizedEscape { escape: char, position: Span },
    /// A character that cannot start any terminal.
    UnexpectedCharacter { character: char, position: Span },
    /// The underlying lexer gave up without a position.
    Unrecognized { message: String },
}

impl LexError {
    fn message(&self) -> String {
        match self {
            LexError::UnterminatedString { .. } => "unterminated string literal".to_string(),
            LexError::UnrecognizedEscape { escape, .. } => {
                format!("unrecognized escape sequence '\\{escape}'")
            }
            LexError::UnexpectedCharacter { character, .. } => {
                format!("unexpected character '{character}'")
            }
            LexError::Unrecognized { message } => message.clone(),
        }
    }

    fn position(&self) -> Option<&Span> {
        match self {
            LexError::UnterminatedString { position }
            | LexError::UnrecognizedEscape { position, .. }
            | LexError::UnexpectedCharacter { position, .. } => Some(position),
            LexError::Unrecognized { .. } => None,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = self.message();
        match self.position() {
            Some(span) if !span.source.is_empty() => write!(f, "{}", span.to_string(&msg)),
            _ => write!(f, "Lex error: {}", msg),
        }
    }
}

impl std::error::Error for LexError {}
