//! Grammar-driven construction of a [`Document`] from a token stream.
//! Hand-written recursive descent over the flat token stream the
//! [`crate::lexer::Lexer`] produces, following this codebase's
//! existing tokenizer/parser split.

mod numeric;

use crate::document::{Block, Document, Frame, Loop, Version};
use crate::error::CifError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::ordered_map::OrderedMap;
use crate::span::Span;
use crate::value::{Value, ValueKind};

/// Parses a complete CIF document from decoded text.
pub fn parse(text: &str) -> Result<Document, CifError> {
    let version = Version::detect(text);
    let tokens = Lexer::tokenize(text)?;
    Parser::new(tokens, version).parse_document()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    version: Version,
}

impl Parser {
    fn new(tokens: Vec<Token>, version: Version) -> Self {
        Self {
            tokens,
            pos: 0,
            version,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn parse_document(&mut self) -> Result<Document, CifError> {
        let mut blocks: Vec<Block> = Vec::new();
        loop {
            match self.peek().kind.clone() {
                TokenKind::Eof => break,
                TokenKind::DataHeading(name) => {
                    let heading_span = self.peek().span;
                    self.advance();
                    if blocks.iter().any(|b| b.name().eq_ignore_ascii_case(&name)) {
                        return Err(CifError::syntax(
                            heading_span,
                            format!("duplicate block name '{}'", name),
                        ));
                    }
                    let block = self.parse_block(name, heading_span)?;
                    blocks.push(block);
                }
                _ => {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "expected a data_ block heading",
                    ));
                }
            }
        }
        Ok(Document::new(self.version, blocks))
    }

    fn parse_block(&mut self, name: String, heading_span: Span) -> Result<Block, CifError> {
        let mut items: OrderedMap<Value> = OrderedMap::new();
        let mut loops: Vec<Loop> = Vec::new();
        let mut frames: Vec<Frame> = Vec::new();

        loop {
            match self.peek().kind.clone() {
                TokenKind::Eof | TokenKind::DataHeading(_) => break,
                TokenKind::Tag(tag) => {
                    let tag_span = self.peek().span;
                    self.advance();
                    if tag_already_used(&items, &loops, &tag) {
                        return Err(CifError::syntax(
                            tag_span,
                            format!("duplicate tag '{}' in block '{}'", tag, name),
                        ));
                    }
                    let value = self.parse_value()?;
                    items.insert(tag, value);
                }
                TokenKind::LoopKeyword => {
                    let kw_span = self.peek().span;
                    self.advance();
                    let l = self.parse_loop(kw_span)?;
                    for tag in l.tags() {
                        if tag_already_used(&items, &loops, tag) {
                            return Err(CifError::syntax(
                                kw_span,
                                format!("duplicate tag '{}' in block '{}'", tag, name),
                            ));
                        }
                    }
                    loops.push(l);
                }
                TokenKind::SaveHeading(frame_name) => {
                    let heading_span = self.peek().span;
                    self.advance();
                    let frame = self.parse_frame(frame_name, heading_span)?;
                    frames.push(frame);
                }
                _ => {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "unexpected token inside data block",
                    ));
                }
            }
        }

        Ok(Block::with_contents(name, heading_span, items, loops, frames))
    }

    fn parse_frame(&mut self, name: String, heading_span: Span) -> Result<Frame, CifError> {
        let mut items: OrderedMap<Value> = OrderedMap::new();
        let mut loops: Vec<Loop> = Vec::new();

        loop {
            match self.peek().kind.clone() {
                TokenKind::SaveEnd => {
                    self.advance();
                    break;
                }
                TokenKind::Eof | TokenKind::DataHeading(_) => {
                    return Err(CifError::syntax(
                        self.peek().span,
                        format!("unterminated save frame '{}'", name),
                    ));
                }
                TokenKind::SaveHeading(_) => {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "save frames do not nest",
                    ));
                }
                TokenKind::Tag(tag) => {
                    let tag_span = self.peek().span;
                    self.advance();
                    if tag_already_used(&items, &loops, &tag) {
                        return Err(CifError::syntax(
                            tag_span,
                            format!("duplicate tag '{}' in frame '{}'", tag, name),
                        ));
                    }
                    let value = self.parse_value()?;
                    items.insert(tag, value);
                }
                TokenKind::LoopKeyword => {
                    let kw_span = self.peek().span;
                    self.advance();
                    let l = self.parse_loop(kw_span)?;
                    loops.push(l);
                }
                _ => {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "unexpected token inside save frame",
                    ));
                }
            }
        }

        Ok(Frame::new(name, heading_span, items, loops))
    }

    fn parse_loop(&mut self, kw_span: Span) -> Result<Loop, CifError> {
        let mut tags = Vec::new();
        while let TokenKind::Tag(t) = self.peek().kind.clone() {
            tags.push(t);
            self.advance();
        }
        if tags.is_empty() {
            return Err(CifError::syntax(
                kw_span,
                "loop_ requires at least one column tag",
            ));
        }

        let mut values = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Eof
                | TokenKind::DataHeading(_)
                | TokenKind::SaveEnd
                | TokenKind::SaveHeading(_)
                | TokenKind::LoopKeyword
                | TokenKind::Tag(_) => break,
                _ => values.push(self.parse_value()?),
            }
        }

        if values.len() % tags.len() != 0 {
            let err_span = values.last().map(|v| v.span).unwrap_or(kw_span);
            return Err(CifError::syntax(
                err_span,
                format!(
                    "loop has {} values, not a multiple of its {} column(s)",
                    values.len(),
                    tags.len()
                ),
            ));
        }

        Ok(Loop::new(tags, values))
    }

    fn parse_value(&mut self) -> Result<Value, CifError> {
        match self.peek().kind.clone() {
            TokenKind::Value {
                text,
                quoted,
                triple,
            } => {
                if triple && self.version.is_cif1() {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "triple-quoted strings require CIF 2.0",
                    ));
                }
                let span = self.peek().span;
                self.advance();
                if quoted {
                    Ok(Value::new(ValueKind::Text(text), span))
                } else {
                    let kind = numeric::classify_unquoted(&text);
                    Ok(Value::new_with_raw(kind, span, text))
                }
            }
            TokenKind::ListOpen => {
                if self.version.is_cif1() {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "list values require CIF 2.0",
                    ));
                }
                self.parse_list()
            }
            TokenKind::TableOpen => {
                if self.version.is_cif1() {
                    return Err(CifError::syntax(
                        self.peek().span,
                        "table values require CIF 2.0",
                    ));
                }
                self.parse_table()
            }
            _ => Err(CifError::syntax(self.peek().span, "expected a value")),
        }
    }

    fn parse_list(&mut self) -> Result<Value, CifError> {
        let start_span = self.advance().span; // '['
        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::ListClose => {
                    let end_span = self.advance().span;
                    return Ok(Value::list(items, start_span.merge(&end_span)));
                }
                TokenKind::Eof => {
                    return Err(CifError::syntax(start_span, "unterminated list"));
                }
                _ => items.push(self.parse_value()?),
            }
        }
    }

    fn parse_table(&mut self) -> Result<Value, CifError> {
        let start_span = self.advance().span; // '{'
        let mut entries: OrderedMap<Value> = OrderedMap::new();
        loop {
            match self.peek().kind.clone() {
                TokenKind::TableClose => {
                    let end_span = self.advance().span;
                    return Ok(Value::table(entries, start_span.merge(&end_span)));
                }
                TokenKind::Eof => {
                    return Err(CifError::syntax(start_span, "unterminated table"));
                }
                TokenKind::Value { text: key, .. } => {
                    let key_span = self.peek().span;
                    self.advance();
                    match self.peek().kind {
                        TokenKind::Colon => {
                            self.advance();
                        }
                        _ => {
                            return Err(CifError::syntax(
                                self.peek().span,
                                "expected ':' after table key",
                            ));
                        }
                    }
                    let value = self.parse_value()?;
                    if entries.contains_key(&key) {
                        return Err(CifError::syntax(
                            key_span,
                            format!("duplicate table key '{}'", key),
                        ));
                    }
                    entries.insert(key, value);
                }
                _ => {
                    return Err(CifError::syntax(self.peek().span, "expected a table key"));
                }
            }
        }
    }
}

fn tag_already_used(items: &OrderedMap<Value>, loops: &[Loop], tag: &str) -> bool {
    items.iter().any(|(k, _)| k.eq_ignore_ascii_case(tag)) || loops.iter().any(|l| l.has_column(tag))
}
