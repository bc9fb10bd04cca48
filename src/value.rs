//! The polymorphic CIF value type.
//!
//! A [`Value`] pairs a [`ValueKind`] tagged union with the [`Span`]
//! covering its entire textual extent, including delimiters, brackets,
//! and the uncertainty parenthesis. There is no subclassing: kind tests
//! and typed accessors are the entire interface.

use crate::ordered_map::OrderedMap;
use crate::span::Span;
use serde_json::{Map, Number, Value as Json};

/// The fixed set of value alternatives a CIF scalar or composite can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Text(String),
    Numeric(f64),
    NumericWithUncertainty(f64, f64),
    Unknown,
    NotApplicable,
    /// CIF 2.0 only.
    List(Vec<Value>),
    /// CIF 2.0 only; keys are unique within one table and preserve
    /// insertion order.
    Table(OrderedMap<Value>),
}

/// A CIF value: its kind plus the span of its full textual form.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
    /// The original unquoted source lexeme, for numeric kinds only.
    /// `to_string()` on a parsed `f64` does not round-trip formatting
    /// (`-5.0` becomes `"-5"`), so anything that reports a numeric
    /// value back to the user should prefer this over reformatting
    /// the parsed number.
    raw: Option<String>,
}

impl Value {
    pub fn new(kind: ValueKind, span: Span) -> Self {
        Self { kind, span, raw: None }
    }

    /// Builds a value that remembers the unquoted source text it was
    /// classified from, for numeric lexeme fidelity in diagnostics.
    pub(crate) fn new_with_raw(kind: ValueKind, span: Span, raw: String) -> Self {
        Self { kind, span, raw: Some(raw) }
    }

    /// The original source lexeme, if this value was parsed from
    /// unquoted text. `None` for values built programmatically or
    /// quoted at the source.
    pub fn raw_text(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn text(literal: impl Into<String>, span: Span) -> Self {
        Self::new(ValueKind::Text(literal.into()), span)
    }

    pub fn numeric(value: f64, span: Span) -> Self {
        Self::new(ValueKind::Numeric(value), span)
    }

    pub fn numeric_with_uncertainty(value: f64, uncertainty: f64, span: Span) -> Self {
        Self::new(ValueKind::NumericWithUncertainty(value, uncertainty), span)
    }

    pub fn unknown(span: Span) -> Self {
        Self::new(ValueKind::Unknown, span)
    }

    pub fn not_applicable(span: Span) -> Self {
        Self::new(ValueKind::NotApplicable, span)
    }

    pub fn list(items: Vec<Value>, span: Span) -> Self {
        Self::new(ValueKind::List(items), span)
    }

    pub fn table(entries: OrderedMap<Value>, span: Span) -> Self {
        Self::new(ValueKind::Table(entries), span)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ValueKind::Text(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ValueKind::Numeric(_))
    }

    pub fn is_numeric_with_uncertainty(&self) -> bool {
        matches!(self.kind, ValueKind::NumericWithUncertainty(_, _))
    }

    /// True for either bare numeric form: with or without an uncertainty.
    pub fn is_any_numeric(&self) -> bool {
        self.is_numeric() || self.is_numeric_with_uncertainty()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, ValueKind::Unknown)
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self.kind, ValueKind::NotApplicable)
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, ValueKind::List(_))
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, ValueKind::Table(_))
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The numeric component, for either `Numeric` or
    /// `NumericWithUncertainty` (the uncertainty, if any, is dropped;
    /// use [`Value::uncertainty_value`] for that).
    pub fn numeric_value(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Numeric(v) => Some(v),
            ValueKind::NumericWithUncertainty(v, _) => Some(v),
            _ => None,
        }
    }

    pub fn uncertainty_value(&self) -> Option<f64> {
        match self.kind {
            ValueKind::NumericWithUncertainty(_, u) => Some(u),
            _ => None,
        }
    }

    pub fn list_value(&self) -> Option<&[Value]> {
        match &self.kind {
            ValueKind::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn table_value(&self) -> Option<&OrderedMap<Value>> {
        match &self.kind {
            ValueKind::Table(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short string name of this value's kind.
    pub fn value_type(&self) -> &'static str {
        match self.kind {
            ValueKind::Text(_) => "text",
            ValueKind::Numeric(_) => "numeric",
            ValueKind::NumericWithUncertainty(_, _) => "numeric_with_uncertainty",
            ValueKind::Unknown => "unknown",
            ValueKind::NotApplicable => "not_applicable",
            ValueKind::List(_) => "list",
            ValueKind::Table(_) => "table",
        }
    }

    /// Converts to a host-native, JSON-shaped representation.
    /// `Unknown`/`NotApplicable` become `null`; both numeric kinds become
    /// a JSON number (the uncertainty component is not carried across
    /// this conversion, callers that need it use
    /// [`Value::uncertainty_value`] directly); `Text` becomes a JSON
    /// string; `List`/`Table` recurse, preserving order (the crate is
    /// built with `serde_json`'s `preserve_order` feature so `Table`
    /// survives the round trip as an ordered map).
    pub fn to_host_native(&self) -> Json {
        match &self.kind {
            ValueKind::Text(s) => Json::String(s.clone()),
            ValueKind::Numeric(v) | ValueKind::NumericWithUncertainty(v, _) => Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            ValueKind::Unknown | ValueKind::NotApplicable => Json::Null,
            ValueKind::List(items) => {
                Json::Array(items.iter().map(Value::to_host_native).collect())
            }
            ValueKind::Table(entries) => {
                let mut map = Map::new();
                for (key, value) in entries.iter() {
                    map.insert(key.to_string(), value.to_host_native());
                }
                Json::Object(map)
            }
        }
    }
}
