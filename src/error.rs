//! Error taxonomies.
//!
//! Two disjoint families, per the design: [`CifError`] is fatal and
//! surfaced to the caller of `parse`/`parse_file`/`add_dictionary`; the
//! [`Category`] enum (in [`crate::validator`]) labels findings collected,
//! never thrown, into a [`crate::validator::ValidationResult`].

use crate::span::Span;
use std::fmt;

/// Fatal parse/IO errors. Unified into one enum so every fallible entry
/// point returns a single `Result<_, CifError>`, following the one
/// enum-per-pipeline-boundary shape used elsewhere in this codebase.
#[derive(Debug, Clone, PartialEq)]
pub enum CifError {
    /// The source could not be read (file not found, not UTF-8, a
    /// directory instead of a file, ...).
    Io(String),
    /// A lexical error: unterminated quoted string, unterminated
    /// semicolon text field, a stray closing bracket, invalid bytes.
    Lex { span: Span, message: String },
    /// A structural/grammar error: unexpected token, missing tag after
    /// `loop_`, a non-rectangular loop, a CIF 2.0 construct used in a
    /// CIF 1.1 document.
    Syntax { span: Span, message: String },
}

impl CifError {
    pub fn lex(span: Span, message: impl Into<String>) -> Self {
        CifError::Lex {
            span,
            message: message.into(),
        }
    }

    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        CifError::Syntax {
            span,
            message: message.into(),
        }
    }

    /// The span at which the failure was detected, if any (`Io` has none).
    pub fn span(&self) -> Option<Span> {
        match self {
            CifError::Io(_) => None,
            CifError::Lex { span, .. } | CifError::Syntax { span, .. } => Some(*span),
        }
    }
}

impl fmt::Display for CifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CifError::Io(msg) => write!(f, "I/O error: {}", msg),
            CifError::Lex { span, message } => write!(f, "lex error at {}: {}", span, message),
            CifError::Syntax { span, message } => {
                write!(f, "syntax error at {}: {}", span, message)
            }
        }
    }
}

impl std::error::Error for CifError {}

impl From<std::io::Error> for CifError {
    fn from(err: std::io::Error) -> Self {
        CifError::Io(err.to_string())
    }
}
