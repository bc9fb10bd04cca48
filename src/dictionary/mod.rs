//! DDLm dictionary loading.
//!
//! A DDLm dictionary is itself a CIF document: one block, and one save
//! frame per data definition. This module parses that document with
//! [`crate::parser`] and reduces it to a lookup structure the
//! validator consumes; it never re-implements CIF parsing itself.

mod data_def;
mod range;

pub use data_def::{DataDef, DataType};

use crate::document::Document;
use crate::error::CifError;
use crate::parser;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A resolved DDLm schema: canonical definitions plus an alias index.
/// Built once per `add_dictionary`/`add_dictionary_file` call and then
/// merged into a [`crate::validator::Validator`]'s running schema.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    defs: HashMap<String, DataDef>,
    aliases: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` as a DDLm dictionary and extracts its definitions.
    /// Unknown DDLm attributes are ignored; only a parse failure in the
    /// dictionary text itself is an error.
    pub fn from_text(text: &str) -> Result<Self, CifError> {
        let document = parser::parse(text)?;
        Ok(Self::from_document(&document))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CifError> {
        let text = fs::read_to_string(path).map_err(CifError::from)?;
        Self::from_text(&text)
    }

    fn from_document(document: &Document) -> Self {
        let mut defs = HashMap::new();
        let mut aliases = HashMap::new();
        for block in document.blocks() {
            for frame in block.frames() {
                if let Some(def) = data_def::extract(frame) {
                    for alias in &def.aliases {
                        aliases.insert(alias.to_lowercase(), def.canonical_name.clone());
                    }
                    defs.insert(def.canonical_name.clone(), def);
                }
            }
        }
        Self { defs, aliases }
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Resolves a tag (any case) to its `DataDef`, first as a canonical
    /// name, then through the alias index. Returns the definition plus
    /// whether resolution went through an alias, which the validator
    /// uses for the pedantic `DeprecatedAlias` warning.
    pub fn resolve(&self, tag: &str) -> Option<(&DataDef, bool)> {
        let lower = tag.to_lowercase();
        if let Some(def) = self.defs.get(&lower) {
            return Some((def, false));
        }
        let canonical = self.aliases.get(&lower)?;
        self.defs.get(canonical).map(|def| (def, true))
    }

    pub fn get(&self, canonical_name: &str) -> Option<&DataDef> {
        self.defs.get(&canonical_name.to_lowercase())
    }

    pub fn definitions(&self) -> impl Iterator<Item = &DataDef> {
        self.defs.values()
    }

    /// Merges `other` into `self`, applying supersede-on-conflict:
    /// a later definition with the same canonical name wins. Returns
    /// the canonical names that were overwritten, for the caller to
    /// turn into `DictionaryConflict` warnings.
    pub fn merge(&mut self, other: Dictionary) -> Vec<String> {
        let mut conflicts = Vec::new();
        for (name, def) in other.defs {
            if self.defs.contains_key(&name) {
                conflicts.push(name.clone());
            }
            self.defs.insert(name, def);
        }
        for (alias, canonical) in other.aliases {
            self.aliases.insert(alias, canonical);
        }
        conflicts
    }
}
