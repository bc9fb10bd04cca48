//! Composed, language-neutral entry points. Each function here only
//! wires together the phase each concern already owns; no behavior
//! lives here that isn't implemented once, upstream.

use crate::document::Document;
use crate::error::CifError;
use crate::parser;
use crate::validator::{ValidationMode, ValidationResult, Validator};
use std::fs;
use std::path::Path;

/// Parses CIF text into a `Document`.
pub fn parse(text: &str) -> Result<Document, CifError> {
    parser::parse(text)
}

/// Reads `path` as UTF-8 and parses it.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, CifError> {
    let text = fs::read_to_string(path).map_err(CifError::from)?;
    parse(&text)
}

/// Validates `cif_text` against the single dictionary `dict_text` in
/// `Strict` mode, without requiring the caller to construct a
/// `Validator`.
pub fn validate(cif_text: &str, dict_text: &str) -> Result<ValidationResult, CifError> {
    let mut validator = Validator::new();
    validator.add_dictionary(dict_text)?;
    validator.set_mode(ValidationMode::Strict);
    validator.validate(cif_text)
}
