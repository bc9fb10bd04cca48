//! Token kinds produced by the [`super::Lexer`].

use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `data_<name>`.
    DataHeading(String),
    /// `save_<name>`.
    SaveHeading(String),
    /// Bare `save_` closing a frame.
    SaveEnd,
    LoopKeyword,
    GlobalKeyword,
    StopKeyword,
    /// An identifier starting with `_`.
    Tag(String),
    /// A scalar value token. `quoted` is true for any quote-delimited
    /// form (`'...'`, `"..."`, triple-quoted, or semicolon text field);
    /// quoted tokens always classify as `Text` regardless of their
    /// contents. `triple` distinguishes the CIF 2.0-only triple-quoted
    /// form, which the parser rejects in a CIF 1.1 document.
    Value {
        text: String,
        quoted: bool,
        triple: bool,
    },
    ListOpen,
    ListClose,
    TableOpen,
    TableClose,
    Colon,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
