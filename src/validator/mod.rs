//! DDLm-driven document validation.

mod category;
mod finding;

pub use category::Category;
pub use finding::{Finding, ValidationResult};

use crate::dictionary::Dictionary;
use crate::document::{Block, Document, Loop};
use crate::error::CifError;
use crate::ordered_map::OrderedMap;
use crate::parser;
use crate::span::Span;
use crate::value::Value;
use std::path::Path;

/// Validator strictness. `Strict` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    Lenient,
    #[default]
    Strict,
    Pedantic,
}

/// Resolves a parsed Document against one or more merged DDLm
/// dictionaries. Carries no interior mutability: once its dictionaries
/// and mode are set, `validate` may be called repeatedly and
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    dictionary: Dictionary,
    mode: ValidationMode,
    /// Canonical names overwritten by a later `add_dictionary` call,
    /// surfaced as `DictionaryConflict` warnings on the next `validate`.
    pending_conflicts: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: ValidationMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn add_dictionary(&mut self, text: &str) -> Result<&mut Self, CifError> {
        let dict = Dictionary::from_text(text)?;
        let conflicts = self.dictionary.merge(dict);
        self.pending_conflicts.extend(conflicts);
        Ok(self)
    }

    pub fn add_dictionary_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, CifError> {
        let dict = Dictionary::from_file(path)?;
        let conflicts = self.dictionary.merge(dict);
        self.pending_conflicts.extend(conflicts);
        Ok(self)
    }

    pub fn validate(&self, text: &str) -> Result<ValidationResult, CifError> {
        let document = parser::parse(text)?;
        Ok(self.validate_document(&document))
    }

    pub fn validate_document(&self, document: &Document) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for name in &self.pending_conflicts {
            warnings.push(Finding {
                category: Category::DictionaryConflict,
                message: format!(
                    "dictionary definition for '{}' was replaced by a later add_dictionary call",
                    name
                ),
                tag: Some(name.clone()),
                actual: None,
                expected: None,
                span: Span::point(1, 1),
            });
        }

        for block in document.blocks() {
            self.check_container(block.items(), block.loops(), &mut errors, &mut warnings);
            if self.mode == ValidationMode::Pedantic {
                self.check_missing_mandatory(block, &mut errors);
            }
            for frame in block.frames() {
                self.check_container(frame.items(), frame.loops(), &mut errors, &mut warnings);
            }
        }

        errors.sort_by_key(|f| f.span);
        warnings.sort_by_key(|f| f.span);
        ValidationResult { errors, warnings }
    }

    fn check_container(
        &self,
        items: &OrderedMap<Value>,
        loops: &[Loop],
        errors: &mut Vec<Finding>,
        warnings: &mut Vec<Finding>,
    ) {
        for (tag, value) in items.iter() {
            self.check_pair(tag, value, errors, warnings);
        }
        for loop_ in loops {
            for row in 0..loop_.len() {
                for tag in loop_.tags() {
                    if let Some(value) = loop_.get_by_tag(row, tag) {
                        self.check_pair(tag, value, errors, warnings);
                    }
                }
            }
        }
    }

    fn check_pair(&self, tag: &str, value: &Value, errors: &mut Vec<Finding>, warnings: &mut Vec<Finding>) {
        let span = value.span;
        let Some((def, via_alias)) = self.dictionary.resolve(tag) else {
            match self.mode {
                ValidationMode::Lenient => warnings.push(Finding {
                    category: Category::UnknownItem,
                    message: format!("'{}' is not defined by any loaded dictionary", tag),
                    tag: Some(tag.to_string()),
                    actual: None,
                    expected: None,
                    span,
                }),
                ValidationMode::Strict | ValidationMode::Pedantic => errors.push(Finding {
                    category: Category::UnknownDataName,
                    message: format!("'{}' is not defined by any loaded dictionary", tag),
                    tag: Some(tag.to_string()),
                    actual: None,
                    expected: None,
                    span,
                }),
            }
            return;
        };

        if self.mode == ValidationMode::Pedantic {
            if via_alias {
                warnings.push(Finding {
                    category: Category::DeprecatedAlias,
                    message: format!("'{}' is a deprecated alias for '{}'", tag, def.display_name),
                    tag: Some(tag.to_string()),
                    actual: None,
                    expected: Some(def.display_name.clone()),
                    span,
                });
            } else if tag != def.display_name {
                warnings.push(Finding {
                    category: Category::CaseMismatch,
                    message: format!("'{}' does not match the dictionary's declared casing '{}'", tag, def.display_name),
                    tag: Some(tag.to_string()),
                    actual: Some(tag.to_string()),
                    expected: Some(def.display_name.clone()),
                    span,
                });
            }
        }

        if !def.data_type.accepts(value) {
            errors.push(Finding {
                category: Category::TypeError,
                message: format!("'{}' expects type {:?}, found {}", tag, def.data_type, value.value_type()),
                tag: Some(tag.to_string()),
                actual: Some(value.value_type().to_string()),
                expected: Some(format!("{:?}", def.data_type)),
                span,
            });
            return;
        }

        if let Some((lo, hi)) = def.range {
            if let Some(x) = value.numeric_value() {
                let in_range = lo.map_or(true, |l| x >= l) && hi.map_or(true, |h| x <= h);
                if !in_range {
                    let actual = value.raw_text().map(|s| s.to_string()).unwrap_or_else(|| x.to_string());
                    errors.push(Finding {
                        category: Category::RangeError,
                        message: format!("'{}' value {} is outside its declared range", tag, actual),
                        tag: Some(tag.to_string()),
                        actual: Some(actual),
                        expected: Some(range_string(lo, hi)),
                        span,
                    });
                }
            }
        }

        if let Some(set) = &def.enumeration {
            if let Some(text) = value.text_value() {
                let allowed = if def.case_sensitive {
                    set.contains(text)
                } else {
                    set.iter().any(|s| s.eq_ignore_ascii_case(text))
                };
                if !allowed {
                    errors.push(Finding {
                        category: Category::EnumerationError,
                        message: format!("'{}' value '{}' is not one of the declared enumeration", tag, text),
                        tag: Some(tag.to_string()),
                        actual: Some(text.to_string()),
                        expected: Some(format!("{:?}", set)),
                        span,
                    });
                }
            }
        }
    }

    fn check_missing_mandatory(&self, block: &Block, errors: &mut Vec<Finding>) {
        for def in self.dictionary.definitions() {
            if !def.mandatory {
                continue;
            }
            let present = block.get_item(&def.display_name).is_some()
                || block.find_loop(&def.display_name).is_some()
                || def
                    .aliases
                    .iter()
                    .any(|a| block.get_item(a).is_some() || block.find_loop(a).is_some());
            if !present {
                errors.push(Finding {
                    category: Category::MissingMandatory,
                    message: format!(
                        "mandatory item '{}' is missing from block '{}'",
                        def.display_name,
                        block.name()
                    ),
                    tag: Some(def.canonical_name.clone()),
                    actual: None,
                    expected: None,
                    span: block.span(),
                });
            }
        }
    }
}

fn range_string(lo: Option<f64>, hi: Option<f64>) -> String {
    format!(
        "{}:{}",
        lo.map(|v| v.to_string()).unwrap_or_default(),
        hi.map(|v| v.to_string()).unwrap_or_default()
    )
}
