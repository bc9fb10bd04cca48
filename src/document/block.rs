//! Data blocks.

use crate::document::{Frame, Loop};
use crate::ordered_map::OrderedMap;
use crate::span::Span;
use crate::value::Value;

/// A `data_<name>` block: an insertion-ordered map of items, an
/// ordered list of loops, and an ordered list of save frames. The
/// parser guarantees (but this type does not re-check) that a tag
/// never appears both as an item and as a loop column in the same
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    span: Span,
    items: OrderedMap<Value>,
    loops: Vec<Loop>,
    frames: Vec<Frame>,
}

impl Block {
    pub fn new(name: String, span: Span) -> Self {
        Self {
            name,
            span,
            items: OrderedMap::new(),
            loops: Vec::new(),
            frames: Vec::new(),
        }
    }

    pub fn with_contents(
        name: String,
        span: Span,
        items: OrderedMap<Value>,
        loops: Vec<Loop>,
        frames: Vec<Frame>,
    ) -> Self {
        Self {
            name,
            span,
            items,
            loops,
            frames,
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

    /// The first loop whose column set contains `tag` (case-insensitive).
    pub fn find_loop(&self, tag: &str) -> Option<&Loop> {
        self.loops.iter().find(|l| l.has_column(tag))
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn get_frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn get_frame_by_name(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_lookup_is_case_insensitive() {
        let frame = Frame::new(
            "Atom1".into(),
            Span::point(1, 1),
            OrderedMap::new(),
            Vec::new(),
        );
        let block = Block::with_contents(
            "test".into(),
            Span::point(1, 1),
            OrderedMap::new(),
            Vec::new(),
            vec![frame],
        );
        assert!(block.get_frame_by_name("atom1").is_some());
        assert!(block.get_frame_by_name("ATOM1").is_some());
        assert!(block.get_frame_by_name("missing").is_none());
    }

    #[test]
    fn item_and_loop_lookup_are_independent_views() {
        let mut items = OrderedMap::new();
        items.insert("_title".into(), Value::text("hi", Span::point(1, 1)));
        let loop_ = Loop::new(vec!["_a".into()], vec![Value::numeric(1.0, Span::point(1, 1))]);
        let block = Block::with_contents(
            "test".into(),
            Span::point(1, 1),
            items,
            vec![loop_],
            Vec::new(),
        );
        assert!(block.get_item("_TITLE").is_some());
        assert!(block.find_loop("_A").is_some());
        assert!(block.get_item("_a").is_none());
    }
}
