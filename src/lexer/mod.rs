//! The CIF lexer: turns a Unicode text buffer into a flat stream
//! of spanned [`Token`]s.
//!
//! The lexer is context-free at the character-class level: `[`, `]`,
//! `{`, `}`, and `:` are always standalone tokens, even outside a CIF
//! 2.0 document (the parser is what rejects them there), which is
//! what lets a flat token stream correctly tokenize adjacent nested
//! structures like `[[1 2][3 4]]` with no intervening whitespace.

pub mod token;

pub use token::{Token, TokenKind};

use crate::error::CifError;
use crate::span::Span;

/// Characters that always terminate an in-progress unquoted run, even
/// without intervening whitespace, because they are themselves always
/// standalone tokens. `;` is deliberately excluded: it is only special
/// as the first character of a line, so a `;` encountered away from
/// column 1 is ordinary content.
const RUN_STOP: [char; 8] = ['[', ']', '{', '}', ':', '\'', '"', '#'];

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(text: &str) -> Result<Vec<Token>, CifError> {
        let mut lexer = Lexer::new(text);
        lexer.run()
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn is_at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn run(&mut self) -> Result<Vec<Token>, CifError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.is_at_eof() {
                let (line, col) = self.position();
                tokens.push(Token::new(TokenKind::Eof, Span::point(line, col)));
                break;
            }
            let ch = self.peek().unwrap();
            if ch == '#' {
                self.skip_comment();
                continue;
            }
            if ch == ';' && self.col == 1 {
                tokens.push(self.scan_semicolon_field()?);
                continue;
            }
            if ch == '\'' || ch == '"' {
                if self.peek_at(1) == Some(ch) && self.peek_at(2) == Some(ch) {
                    tokens.push(self.scan_triple(ch)?);
                } else {
                    tokens.push(self.scan_quoted(ch)?);
                }
                continue;
            }
            if let Some(single) = single_char_kind(ch) {
                let (line, col) = self.position();
                self.advance();
                let span = Span::new(line, col, line, col + 1);
                tokens.push(Token::new(single, span));
                continue;
            }
            tokens.push(self.scan_unquoted());
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_quoted(&mut self, delim: char) -> Result<Token, CifError> {
        let (start_line, start_col) = self.position();
        self.advance(); // opening delimiter
        let mut content = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(CifError::lex(
                        Span::new(start_line, start_col, self.line, self.col),
                        "unterminated quoted string",
                    ));
                }
                Some('\n') => {
                    return Err(CifError::lex(
                        Span::new(start_line, start_col, self.line, self.col),
                        "unterminated quoted string: reached end of line",
                    ));
                }
                Some(ch) if ch == delim => {
                    let next = self.peek_at(1);
                    let closes = match next {
                        None => true,
                        Some(n) => n.is_whitespace(),
                    };
                    if closes {
                        self.advance(); // closing delimiter
                        let (end_line, end_col) = self.position();
                        return Ok(Token::new(
                            TokenKind::Value {
                                text: content,
                                quoted: true,
                                triple: false,
                            },
                            Span::new(start_line, start_col, end_line, end_col),
                        ));
                    } else {
                        content.push(ch);
                        self.advance();
                    }
                }
                Some(ch) => {
                    content.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn scan_triple(&mut self, delim: char) -> Result<Token, CifError> {
        let (start_line, start_col) = self.position();
        self.advance();
        self.advance();
        self.advance(); // opening triple delimiter
        let mut content = String::new();
        loop {
            if self.is_at_eof() {
                return Err(CifError::lex(
                    Span::new(start_line, start_col, self.line, self.col),
                    "unterminated triple-quoted string",
                ));
            }
            if self.peek() == Some(delim)
                && self.peek_at(1) == Some(delim)
                && self.peek_at(2) == Some(delim)
            {
                self.advance();
                self.advance();
                self.advance();
                let (end_line, end_col) = self.position();
                return Ok(Token::new(
                    TokenKind::Value {
                        text: content,
                        quoted: true,
                        triple: true,
                    },
                    Span::new(start_line, start_col, end_line, end_col),
                ));
            }
            content.push(self.advance().unwrap());
        }
    }

    fn scan_semicolon_field(&mut self) -> Result<Token, CifError> {
        let (start_line, start_col) = self.position();
        self.advance(); // opening ';'
        if self.peek() == Some('\n') {
            self.advance();
        } else if self.peek() == Some('\r') && self.peek_at(1) == Some('\n') {
            self.advance();
            self.advance();
        }
        let mut content = String::new();
        loop {
            if self.is_at_eof() {
                return Err(CifError::lex(
                    Span::new(start_line, start_col, self.line, self.col),
                    "unterminated semicolon text field",
                ));
            }
            if self.peek() == Some(';') && self.col == 1 {
                self.advance(); // closing ';'
                let (end_line, end_col) = self.position();
                // The newline that ends the content's last line is not
                // part of the value; strip exactly one trailing
                // newline, if present.
                if content.ends_with('\n') {
                    content.pop();
                    if content.ends_with('\r') {
                        content.pop();
                    }
                }
                return Ok(Token::new(
                    TokenKind::Value {
                        text: content,
                        quoted: true,
                        triple: false,
                    },
                    Span::new(start_line, start_col, end_line, end_col),
                ));
            }
            content.push(self.advance().unwrap());
        }
    }

    fn scan_unquoted(&mut self) -> Token {
        let (start_line, start_col) = self.position();
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || RUN_STOP.contains(&ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        let (end_line, end_col) = self.position();
        let span = Span::new(start_line, start_col, end_line, end_col);
        classify_run(text, span)
    }
}

fn single_char_kind(ch: char) -> Option<TokenKind> {
    match ch {
        '[' => Some(TokenKind::ListOpen),
        ']' => Some(TokenKind::ListClose),
        '{' => Some(TokenKind::TableOpen),
        '}' => Some(TokenKind::TableClose),
        ':' => Some(TokenKind::Colon),
        _ => None,
    }
}

fn classify_run(text: String, span: Span) -> Token {
    let lower = text.to_lowercase();
    let kind = if lower == "loop_" {
        TokenKind::LoopKeyword
    } else if lower == "global_" {
        TokenKind::GlobalKeyword
    } else if lower == "stop_" {
        TokenKind::StopKeyword
    } else if lower.starts_with("data_") && text.len() > 5 {
        TokenKind::DataHeading(text[5..].to_string())
    } else if lower.starts_with("save_") {
        if text.len() == 5 {
            TokenKind::SaveEnd
        } else {
            TokenKind::SaveHeading(text[5..].to_string())
        }
    } else if let Some(rest) = text.strip_prefix('_') {
        let _ = rest;
        TokenKind::Tag(text)
    } else {
        TokenKind::Value {
            text,
            quoted: false,
            triple: false,
        }
    };
    Token::new(kind, span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Lexer::tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn recognizes_keywords_case_insensitively() {
        let kinds = kinds("DATA_foo Loop_ SAVE_ save_ GLOBAL_ stop_");
        assert_eq!(
            kinds,
            vec![
                TokenKind::DataHeading("foo".into()),
                TokenKind::LoopKeyword,
                TokenKind::SaveHeading("".into()),
                TokenKind::SaveEnd,
                TokenKind::GlobalKeyword,
                TokenKind::StopKeyword,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tags_start_with_underscore() {
        let kinds = kinds("_cell_length_a");
        assert_eq!(
            kinds,
            vec![TokenKind::Tag("_cell_length_a".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn quoted_strings_close_on_quote_followed_by_whitespace() {
        let toks = Lexer::tokenize("'it''s ok'").unwrap();
        // The first `'` after "it" is followed by `'` (non-whitespace),
        // so it does not close the string; scanning continues.
        match &toks[0].kind {
            TokenKind::Value { text, quoted, .. } => {
                assert!(quoted);
                assert_eq!(text, "it''s ok");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = Lexer::tokenize("'unclosed").unwrap_err();
        assert!(matches!(err, CifError::Lex { .. }));
    }

    #[test]
    fn semicolon_field_spans_multiple_lines_and_strips_trailing_newline() {
        let toks = Lexer::tokenize(";line one\nline two\n;").unwrap();
        match &toks[0].kind {
            TokenKind::Value { text, quoted, .. } => {
                assert!(quoted);
                assert_eq!(text, "line one\nline two");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(toks[0].span, Span::new(1, 1, 3, 2));
    }

    #[test]
    fn semicolon_not_at_column_one_is_ordinary_text() {
        let kinds = kinds("foo;bar");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Value {
                    text: "foo;bar".into(),
                    quoted: false,
                    triple: false,
                },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn triple_quoted_spans_lines_and_permits_embedded_single_quotes() {
        let toks = Lexer::tokenize("'''it's a test\nmultiline'''").unwrap();
        match &toks[0].kind {
            TokenKind::Value {
                text,
                quoted,
                triple,
            } => {
                assert!(quoted);
                assert!(triple);
                assert_eq!(text, "it's a test\nmultiline");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn adjacent_brackets_split_without_whitespace() {
        let kinds = kinds("[[1 2][3 4]]");
        assert_eq!(
            kinds,
            vec![
                TokenKind::ListOpen,
                TokenKind::ListOpen,
                TokenKind::Value {
                    text: "1".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Value {
                    text: "2".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::ListClose,
                TokenKind::ListOpen,
                TokenKind::Value {
                    text: "3".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Value {
                    text: "4".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::ListClose,
                TokenKind::ListClose,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn table_colon_splits_key_from_value() {
        let kinds = kinds("{x:1.5 y:2.5}");
        assert_eq!(
            kinds,
            vec![
                TokenKind::TableOpen,
                TokenKind::Value {
                    text: "x".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Colon,
                TokenKind::Value {
                    text: "1.5".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Value {
                    text: "y".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Colon,
                TokenKind::Value {
                    text: "2.5".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::TableClose,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let kinds = kinds("_tag value # a comment\n_tag2 value2");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Tag("_tag".into()),
                TokenKind::Value {
                    text: "value".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Tag("_tag2".into()),
                TokenKind::Value {
                    text: "value2".into(),
                    quoted: false,
                    triple: false
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unquoted_value_span_excludes_trailing_whitespace() {
        let toks = Lexer::tokenize("_cell_length_a 10.0   \n").unwrap();
        let value_tok = &toks[1];
        assert_eq!(value_tok.span, Span::new(1, 16, 1, 20));
    }
}
