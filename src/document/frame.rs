//! Save frames.

use crate::document::Loop;
use crate::ordered_map::OrderedMap;
use crate::span::Span;
use crate::value::Value;

/// A named save frame, nested inside a [`super::Block`]. Frames share
/// the same internal shape as a Block (items and loops) but do not
/// nest further.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    span: Span,
    items: OrderedMap<Value>,
    loops: Vec<Loop>,
}

impl Frame {
    pub fn new(name: String, span: Span, items: OrderedMap<Value>, loops: Vec<Loop>) -> Self {
        Self {
            name,
            span,
            items,
            loops,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn items(&self) -> &OrderedMap<Value> {
        &self.items
    }

    pub fn get_item(&self, tag: &str) -> Option<&Value> {
        self.items
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(tag))
            .map(|(_, v)| v)
    }

    pub fn item_keys(&self) -> Vec<&str> {
        self.items.keys().collect()
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn get_loop(&self, index: usize) -> Option<&Loop> {
        self.loops.get(index)
    }

    pub fn find_loop(&self, tag: &str) -> Option<&Loop> {
        self.loops.iter().find(|l| l.has_column(tag))
    }
}
