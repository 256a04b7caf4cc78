//! Permissive JSON parser that keeps a concrete syntax tree
//!
//! Accepts comments, trailing commas, single-quoted strings and bare
//! identifier keys. Every node remembers its byte span and the trivia
//! (whitespace and comments) around it so the renderer can reproduce
//! untouched regions byte-for-byte.

use std::ops::Range;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub span: Range<usize>,
    pub value: Value,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Scalar,
    Array(Container<()>),
    Object(Container<Key>),
}

#[derive(Debug, Clone)]
pub(crate) struct Container<K> {
    pub items: Vec<Item<K>>,
    /// Trivia after the last item (or its trailing comma) up to the closing bracket.
    pub close: Range<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct Item<K> {
    /// Trivia between the opening bracket or previous comma and the item.
    pub lead: Range<usize>,
    pub key: K,
    pub node: Node,
    /// Trivia between the value and the comma that follows it.
    pub trail: Range<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct Key {
    pub name: String,
    /// Key text through the colon and any trivia up to the value.
    pub prefix: Range<usize>,
    /// The part of `prefix` after the key itself.
    pub separator: Range<usize>,
}

/// Counters the style detector uses to guess formatting conventions.
#[derive(Debug, Clone, Default)]
pub(crate) struct Stats {
    pub double_quoted: usize,
    pub single_quoted: usize,
    pub quoted_keys: usize,
    pub bare_keys: usize,
    /// Leading whitespace of each line that begins with a token, in source
    /// order. Lines inside comments never appear here.
    pub indents: Vec<Range<usize>>,
}

#[derive(Debug, Clone)]
pub(crate) struct Parsed {
    pub root: Node,
    pub stats: Stats,
}

pub(crate) fn parse(source: &str) -> Result<Parsed> {
    let mut parser = Parser {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        stats: Stats::default(),
    };

    if source.starts_with('\u{feff}') {
        parser.pos = '\u{feff}'.len_utf8();
    }

    parser.skip_trivia()?;
    if parser.peek().is_none() {
        return Err(parser.error("empty document"));
    }
    parser.note_indent();
    let root = parser.parse_value(0)?;
    parser.skip_trivia()?;
    if parser.peek().is_some() {
        return Err(parser.error("unexpected content after the root value"));
    }

    Ok(Parsed {
        root,
        stats: parser.stats,
    })
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    stats: Stats,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: impl Into<String>) -> Error {
        let (line, column) = line_column(self.src, self.pos);
        Error::parse(line, column, message)
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.pos += 1,
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        self.pos = self.src[self.pos..]
                            .find('\n')
                            .map_or(self.bytes.len(), |offset| self.pos + offset);
                    }
                    Some(b'*') => {
                        let Some(offset) = self.src[self.pos + 2..].find("*/") else {
                            return Err(self.error("unterminated block comment"));
                        };
                        self.pos += 2 + offset + 2;
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Record the current line's indentation if the token at `pos` is the
    /// first thing on it.
    fn note_indent(&mut self) {
        let before = self.src[..self.pos].trim_end_matches([' ', '\t']);
        if before.is_empty() || before.ends_with('\n') {
            self.stats.indents.push(before.len()..self.pos);
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Node> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        match self.peek() {
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"' | b'\'') => {
                let start = self.pos;
                let text = self.parse_string()?;
                Ok(self.scalar(start, Value::String(text)))
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b) if b.is_ascii_alphabetic() => self.parse_literal(),
            Some(_) => {
                let ch = self.src[self.pos..].chars().next().unwrap_or('?');
                Err(self.error(format!("unexpected character '{ch}'")))
            }
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn scalar(&self, start: usize, value: Value) -> Node {
        Node {
            span: start..self.pos,
            value,
            kind: NodeKind::Scalar,
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Node> {
        let start = self.pos;
        self.pos += 1;
        let mut items = Vec::new();

        let close = loop {
            let lead_start = self.pos;
            self.skip_trivia()?;
            self.note_indent();
            if self.peek() == Some(b']') {
                let close = lead_start..self.pos;
                self.pos += 1;
                break close;
            }

            let lead = lead_start..self.pos;
            let node = self.parse_value(depth + 1)?;
            let trail_start = self.pos;
            self.skip_trivia()?;
            self.note_indent();

            match self.peek() {
                Some(b',') => {
                    items.push(Item {
                        lead,
                        key: (),
                        node,
                        trail: trail_start..self.pos,
                    });
                    self.pos += 1;
                }
                Some(b']') => {
                    items.push(Item {
                        lead,
                        key: (),
                        node,
                        trail: trail_start..trail_start,
                    });
                    let close = trail_start..self.pos;
                    self.pos += 1;
                    break close;
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        };

        let value = Value::Array(items.iter().map(|item| item.node.value.clone()).collect());
        Ok(Node {
            span: start..self.pos,
            value,
            kind: NodeKind::Array(Container { items, close }),
        })
    }

    fn parse_object(&mut self, depth: usize) -> Result<Node> {
        let start = self.pos;
        self.pos += 1;
        let mut items: Vec<Item<Key>> = Vec::new();
        let mut map = Map::new();

        let close = loop {
            let lead_start = self.pos;
            self.skip_trivia()?;
            self.note_indent();
            if self.peek() == Some(b'}') {
                let close = lead_start..self.pos;
                self.pos += 1;
                break close;
            }

            let lead = lead_start..self.pos;
            let key_start = self.pos;
            let name = self.parse_key()?;
            if map.contains_key(&name) {
                let (line, column) = line_column(self.src, key_start);
                return Err(Error::DuplicateKey {
                    key: name,
                    line,
                    column,
                });
            }
            let key_end = self.pos;

            self.skip_trivia()?;
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_trivia()?;
            let value_start = self.pos;

            let node = self.parse_value(depth + 1)?;
            map.insert(name.clone(), node.value.clone());
            let key = Key {
                name,
                prefix: key_start..value_start,
                separator: key_end..value_start,
            };

            let trail_start = self.pos;
            self.skip_trivia()?;
            self.note_indent();
            match self.peek() {
                Some(b',') => {
                    items.push(Item {
                        lead,
                        key,
                        node,
                        trail: trail_start..self.pos,
                    });
                    self.pos += 1;
                }
                Some(b'}') => {
                    items.push(Item {
                        lead,
                        key,
                        node,
                        trail: trail_start..trail_start,
                    });
                    let close = trail_start..self.pos;
                    self.pos += 1;
                    break close;
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        };

        Ok(Node {
            span: start..self.pos,
            value: Value::Object(map),
            kind: NodeKind::Object(Container { items, close }),
        })
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(b'"' | b'\'') => {
                self.stats.quoted_keys += 1;
                self.parse_string()
            }
            Some(b) if is_identifier_start(b) => {
                self.stats.bare_keys += 1;
                let start = self.pos;
                while self.peek().is_some_and(is_identifier_part) {
                    self.pos += 1;
                }
                Ok(self.src[start..self.pos].to_string())
            }
            _ => Err(self.error("expected object key")),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = char::from(self.bytes[self.pos]);
        if quote == '"' {
            self.stats.double_quoted += 1;
        } else {
            self.stats.single_quoted += 1;
        }
        self.pos += 1;

        let mut out = String::new();
        loop {
            let Some(ch) = self.src[self.pos..].chars().next() else {
                return Err(self.error("unterminated string"));
            };
            self.pos += ch.len_utf8();
            match ch {
                c if c == quote => return Ok(out),
                '\\' => {
                    let escaped = self.parse_escape()?;
                    if let Some(c) = escaped {
                        out.push(c);
                    }
                }
                '\n' | '\r' => return Err(self.error("unescaped line break in string")),
                c => out.push(c),
            }
        }
    }

    /// Returns `None` for an escaped line break, which continues the string.
    fn parse_escape(&mut self) -> Result<Option<char>> {
        let Some(ch) = self.src[self.pos..].chars().next() else {
            return Err(self.error("unterminated escape sequence"));
        };
        self.pos += ch.len_utf8();
        let c = match ch {
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '\n' => return Ok(None),
            'u' => {
                let high = self.parse_hex4()?;
                if (0xD800..0xDC00).contains(&high) {
                    if !self.src[self.pos..].starts_with("\\u") {
                        return Err(self.error("unpaired surrogate in unicode escape"));
                    }
                    self.pos += 2;
                    let low = self.parse_hex4()?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error("invalid low surrogate in unicode escape"));
                    }
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))?
                } else {
                    char::from_u32(high).ok_or_else(|| self.error("invalid unicode escape"))?
                }
            }
            other => return Err(self.error(format!("invalid escape '\\{other}'"))),
        };
        Ok(Some(c))
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("expected four hex digits"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|e| self.error(e.to_string()))?;
        self.pos += 4;
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Node> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error("invalid number")),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
                return Err(self.error("expected digit after decimal point"));
            }
            self.skip_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
                return Err(self.error("expected digit in exponent"));
            }
            self.skip_digits();
        }

        let text = &self.src[start..self.pos];
        let value: Value = serde_json::from_str(text).map_err(|e| {
            let (line, column) = line_column(self.src, start);
            Error::parse(line, column, format!("invalid number '{text}': {e}"))
        })?;
        Ok(self.scalar(start, value))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn parse_literal(&mut self) -> Result<Node> {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let value = match &self.src[start..self.pos] {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            other => {
                let message = format!("unexpected token '{other}'");
                self.pos = start;
                return Err(self.error(message));
            }
        };
        Ok(self.scalar(start, value))
    }
}

pub(crate) fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

pub(crate) fn is_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// 1-based line and column (in characters) of a byte offset.
fn line_column(src: &str, pos: usize) -> (usize, usize) {
    let before = &src[..pos.min(src.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
