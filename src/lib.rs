//! A CIF 1.1/2.0 parser and DDLm dictionary validator.
//!
//! Two independent cores share one [`span::Span`] primitive: a
//! [`lexer::Lexer`] and [`parser`] build an immutable [`document`] tree
//! from CIF text, and a [`dictionary::Dictionary`] loader plus
//! [`validator::Validator`] check a parsed document against one or
//! more DDLm schemas. [`pipeline`] composes both into the small set of
//! convenience entry points most callers reach for first.

pub mod dictionary;
pub mod document;
pub mod error;
pub mod lexer;
pub mod ordered_map;
pub mod parser;
pub mod pipeline;
pub mod span;
pub mod validator;
pub mod value;

pub use dictionary::{DataDef, DataType, Dictionary};
pub use document::{Block, Document, Frame, Loop, Version};
pub use error::CifError;
pub use pipeline::{parse, parse_file, validate};
pub use span::Span;
pub use validator::{Category, Finding, ValidationMode, ValidationResult, Validator};
pub use value::{Value, ValueKind};
