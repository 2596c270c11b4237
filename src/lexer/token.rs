//! Raw token patterns. Alternatives are tried longest match first, so
//! `UnterminatedString` only wins when no closing quote follows.

#[lachs::token]
pub enum Token {
    #[literal("[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,
    #[literal(r"[0-9]+(\.[0-9]*)?([eE][0-9]*)?")]
    Number,
    #[literal(r#""([^"\\\r\n]|\\.)*""#)]
    StringLiteral,
    #[literal(r#""([^"\\\r\n]|\\.)*"#)]
    UnterminatedString,
    #[literal(r"[(){}\[\]]")]
    GroupSymbol,
    #[literal(r"[`~!@#$%^&*_+=|\\:;'<,>.?/-]+")]
    Symbol,
    #[literal(r##"[^a-zA-Z0-9\s"`~!@#$%^&*_+=|\\:;'<,>.?/(){}\[\]-]"##)]
    Unexpected,
}
