//! A single DDLm data definition, extracted from one save frame.

use super::range;
use crate::document::Frame;
use crate::value::Value;
use std::collections::HashSet;

/// The coarse type alternatives DDLm definitions declare through
/// `_type.contents` (scalar kinds) and `_type.container` (`List`
/// container overrides to CIF 2.0 list/table values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Numb,
    Char,
    Text,
    Code,
    List,
    Table,
    /// Any `_type.contents` this loader does not special-case; imposes
    /// no type constraint. The loader is permissive on unknown DDLm
    /// attributes.
    Other(String),
}

impl DataType {
    fn from_ddlm(contents: Option<&str>, container: Option<&str>) -> DataType {
        if let Some(container) = container {
            match container.to_lowercase().as_str() {
                "list" => return DataType::List,
                "table" => return DataType::Table,
                _ => {}
            }
        }
        match contents.map(|s| s.to_lowercase()) {
            Some(s) if s == "numb" => DataType::Numb,
            Some(s) if s == "text" => DataType::Text,
            Some(s) if s == "code" => DataType::Code,
            Some(s) if matches!(s.as_str(), "char" | "name" | "tag" | "uri" | "date" | "symop") => {
                DataType::Char
            }
            Some(other) => DataType::Other(other),
            None => DataType::Text,
        }
    }

    /// Whether `value`'s kind satisfies this type. `Unknown` and
    /// `NotApplicable` always satisfy every type.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_unknown() || value.is_not_applicable() {
            return true;
        }
        match self {
            DataType::Numb => value.is_any_numeric(),
            DataType::Char | DataType::Text | DataType::Code => value.is_text(),
            DataType::List => value.is_list(),
            DataType::Table => value.is_table(),
            DataType::Other(_) => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataDef {
    /// Lowercased, used as the lookup key.
    pub canonical_name: String,
    /// As written in `_definition.id`.
    pub display_name: String,
    pub purpose: Option<String>,
    pub category: Option<String>,
    pub data_type: DataType,
    pub range: Option<(Option<f64>, Option<f64>)>,
    pub enumeration: Option<HashSet<String>>,
    pub aliases: Vec<String>,
    pub mandatory: bool,
    /// Whether enumeration comparison against this definition is
    /// case-sensitive. Defaults to `true`.
    pub case_sensitive: bool,
}

/// Extracts a `DataDef` from a save frame, or `None` if the frame does
/// not declare `_definition.id`.
pub fn extract(frame: &Frame) -> Option<DataDef> {
    let display_name = frame.get_item("_definition.id")?.text_value()?.to_string();
    let canonical_name = display_name.to_lowercase();

    let purpose = text_item(frame, "_type.purpose");
    let category = text_item(frame, "_name.category_id");
    let contents = frame.get_item("_type.contents").and_then(|v| v.text_value());
    let container = frame.get_item("_type.container").and_then(|v| v.text_value());
    let data_type = DataType::from_ddlm(contents, container);

    let range = frame
        .get_item("_enumeration.range")
        .and_then(|v| v.text_value())
        .and_then(range::parse);

    let enumeration = frame.find_loop("_enumeration_set.state").map(|l| {
        l.get_column("_enumeration_set.state")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| v.text_value().map(|s| s.to_string()))
            .collect::<HashSet<_>>()
    });

    let aliases = frame
        .find_loop("_alias.definition_id")
        .map(|l| {
            l.get_column("_alias.definition_id")
                .unwrap_or_default()
                .into_iter()
                .filter_map(|v| v.text_value().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let mandatory = text_item(frame, "_definition.mandatory_flag")
        .map(|s| matches!(s.to_lowercase().as_str(), "yes" | "true" | "implicit"))
        .unwrap_or(false);

    let case_sensitive = text_item(frame, "_enumeration.case_sensitive_flag")
        .map(|s| !matches!(s.to_lowercase().as_str(), "no" | "false"))
        .unwrap_or(true);

    Some(DataDef {
        canonical_name,
        display_name,
        purpose,
        category,
        data_type,
        range,
        enumeration,
        aliases,
        mandatory,
        case_sensitive,
    })
}

fn text_item(frame: &Frame, tag: &str) -> Option<String> {
    frame.get_item(tag).and_then(|v| v.text_value()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordered_map::OrderedMap;
    use crate::span::Span;

    fn sp() -> Span {
        Span::point(1, 1)
    }

    #[test]
    fn frame_without_definition_id_yields_no_def() {
        let mut items = OrderedMap::new();
        items.insert("_name.category_id".into(), Value::text("cell", sp()));
        let frame = Frame::new("anonymous".into(), sp(), items, Vec::new());
        assert!(extract(&frame).is_none());
    }

    #[test]
    fn type_container_overrides_contents_to_list() {
        let mut items = OrderedMap::new();
        items.insert("_definition.id".into(), Value::text("_a", sp()));
        items.insert("_type.container".into(), Value::text("List", sp()));
        items.insert("_type.contents".into(), Value::text("Numb", sp()));
        let frame = Frame::new("a".into(), sp(), items, Vec::new());
        let def = extract(&frame).unwrap();
        assert_eq!(def.data_type, DataType::List);
    }

    #[test]
    fn unrecognized_contents_value_is_permissive() {
        let v = Value::numeric(5.0, sp());
        assert!(DataType::Other("exotic".into()).accepts(&v));
        let u = Value::unknown(sp());
        assert!(DataType::Numb.accepts(&u));
    }
}
