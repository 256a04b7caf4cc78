//! Re-rendering an updated value over the original concrete syntax tree

use serde_json::{Map, Value};

use super::parser::{Container, Item, Key, Node, NodeKind, is_identifier_part, is_identifier_start};
use super::style::JsoncStyle;

pub(crate) struct Emitter<'a> {
    pub src: &'a str,
    pub style: &'a JsoncStyle,
}

impl Emitter<'_> {
    /// Emit `new` in place of `node`.
    ///
    /// `base` is the indentation of the line the node starts on.
    pub fn emit(&self, node: &Node, new: &Value, base: &str, out: &mut String) {
        if node.value == *new {
            out.push_str(&self.src[node.span.clone()]);
            return;
        }
        match (&node.kind, new) {
            (NodeKind::Array(container), Value::Array(items)) => {
                self.emit_array(container, items, base, out)
            }
            (NodeKind::Object(container), Value::Object(map)) => {
                self.emit_object(container, map, base, out)
            }
            _ => self.render_fresh(new, base, out),
        }
    }

    fn emit_array(&self, container: &Container<()>, new: &[Value], base: &str, out: &mut String) {
        let pairs = pair_elements(&container.items, new);

        out.push('[');
        for (k, value) in new.iter().enumerate() {
            if k > 0 {
                out.push(',');
            }
            match pairs[k] {
                Some(j) => {
                    let item = &container.items[j];
                    let lead = self.lead_for(container, j, k, base);
                    out.push_str(&lead);
                    self.emit(&item.node, value, &line_indent(&lead, base), out);
                    out.push_str(&self.src[item.trail.clone()]);
                }
                None => {
                    let whitespace = self.slot_whitespace(container, k, base);
                    out.push_str(&whitespace);
                    self.render_fresh(value, &line_indent(&whitespace, base), out);
                }
            }
        }
        self.push_close(container, !new.is_empty(), base, out);
        out.push(']');
    }

    /// Surviving keys keep their original order; new keys are appended.
    fn emit_object(
        &self,
        container: &Container<Key>,
        new: &Map<String, Value>,
        base: &str,
        out: &mut String,
    ) {
        let mut entries: Vec<(Option<usize>, &str, &Value)> = Vec::with_capacity(new.len());
        for (j, item) in container.items.iter().enumerate() {
            if let Some(value) = new.get(&item.key.name) {
                entries.push((Some(j), &item.key.name, value));
            }
        }
        for (key, value) in new {
            if !container.items.iter().any(|item| item.key.name == *key) {
                entries.push((None, key, value));
            }
        }

        out.push('{');
        for (k, (old, key, value)) in entries.iter().enumerate() {
            if k > 0 {
                out.push(',');
            }
            match old {
                Some(j) => {
                    let item = &container.items[*j];
                    let lead = self.lead_for(container, *j, k, base);
                    out.push_str(&lead);
                    out.push_str(&self.src[item.key.prefix.clone()]);
                    self.emit(&item.node, value, &line_indent(&lead, base), out);
                    out.push_str(&self.src[item.trail.clone()]);
                }
                None => {
                    let whitespace = self.slot_whitespace(container, k, base);
                    out.push_str(&whitespace);
                    self.render_key(key, out);
                    out.push_str(&self.member_separator(container));
                    self.render_fresh(value, &line_indent(&whitespace, base), out);
                }
            }
        }
        self.push_close(container, !entries.is_empty(), base, out);
        out.push('}');
    }

    /// Leading trivia for an existing item now written at position `k`.
    ///
    /// Comments travel with their item; plain whitespace belongs to the
    /// position.
    fn lead_for<K>(&self, container: &Container<K>, j: usize, k: usize, base: &str) -> String {
        let lead = &self.src[container.items[j].lead.clone()];
        if has_comment(lead) {
            lead.to_string()
        } else {
            self.slot_whitespace(container, k, base)
        }
    }

    fn slot_whitespace<K>(&self, container: &Container<K>, k: usize, base: &str) -> String {
        let n = container.items.len();
        if n == 0 {
            let close = &self.src[container.close.clone()];
            if k == 0 && has_comment(close) {
                return format!("{}{}{base}{}", close.trim_end(), self.newline(), self.style.indent);
            }
            return format!("{}{base}{}", self.newline(), self.style.indent);
        }
        let whitespace = whitespace_tail(&self.src[container.items[k.min(n - 1)].lead.clone()]);
        if k >= 1 && n == 1 && !whitespace.contains('\n') {
            return " ".to_string();
        }
        whitespace.to_string()
    }

    fn push_close<K>(&self, container: &Container<K>, has_items: bool, base: &str, out: &mut String) {
        let close = &self.src[container.close.clone()];
        if !has_items {
            if has_comment(close) {
                out.push_str(close);
            }
            return;
        }
        if container.items.is_empty() {
            out.push_str(self.newline());
            out.push_str(base);
            return;
        }
        out.push_str(close);
    }

    fn newline(&self) -> &'static str {
        self.style.line_ending.as_str()
    }

    fn member_separator(&self, container: &Container<Key>) -> String {
        container
            .items
            .iter()
            .map(|item| &self.src[item.key.separator.clone()])
            .find(|separator| !has_comment(separator))
            .unwrap_or(": ")
            .to_string()
    }

    /// Render a value that has no counterpart in the original text.
    pub fn render_fresh(&self, value: &Value, base: &str, out: &mut String) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::String(s) => self.render_string(s, out),
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Array(items) => {
                let inner = format!("{base}{}", self.style.indent);
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(self.newline());
                    out.push_str(&inner);
                    self.render_fresh(item, &inner, out);
                }
                out.push_str(self.newline());
                out.push_str(base);
                out.push(']');
            }
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) => {
                let inner = format!("{base}{}", self.style.indent);
                out.push('{');
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(self.newline());
                    out.push_str(&inner);
                    self.render_key(key, out);
                    out.push_str(": ");
                    self.render_fresh(item, &inner, out);
                }
                out.push_str(self.newline());
                out.push_str(base);
                out.push('}');
            }
        }
    }

    fn render_key(&self, key: &str, out: &mut String) {
        if !self.style.quote_keys && is_identifier(key) {
            out.push_str(key);
        } else {
            self.render_string(key, out);
        }
    }

    fn render_string(&self, s: &str, out: &mut String) {
        let quote = self.style.quote.as_char();
        out.push(quote);
        for ch in s.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{8}' => out.push_str("\\b"),
                '\u{c}' => out.push_str("\\f"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        }
        out.push(quote);
    }
}

/// Match each new element with an old item whose text can be reused.
///
/// Preference order: equal value at the same index, equal value anywhere,
/// then any unused item at the same index (edited in place).
fn pair_elements(old: &[Item<()>], new: &[Value]) -> Vec<Option<usize>> {
    let mut used = vec![false; old.len()];
    let mut pairs = vec![None; new.len()];

    for (k, value) in new.iter().enumerate() {
        if k < old.len() && old[k].node.value == *value {
            pairs[k] = Some(k);
            used[k] = true;
        }
    }
    for (k, value) in new.iter().enumerate() {
        if pairs[k].is_some() {
            continue;
        }
        if let Some(j) = (0..old.len()).find(|&j| !used[j] && old[j].node.value == *value) {
            pairs[k] = Some(j);
            used[j] = true;
        }
    }
    for k in 0..new.len() {
        if pairs[k].is_none() && k < old.len() && !used[k] {
            pairs[k] = Some(k);
            used[k] = true;
        }
    }
    pairs
}

fn has_comment(trivia: &str) -> bool {
    trivia.contains('/')
}

/// The whitespace after the last comment in a trivia run.
fn whitespace_tail(trivia: &str) -> &str {
    let bytes = trivia.as_bytes();
    let mut end_of_last_comment = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = trivia[i..].find('\n').map_or(bytes.len(), |offset| i + offset);
            end_of_last_comment = i;
        } else if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = trivia[i + 2..]
                .find("*/")
                .map_or(bytes.len(), |offset| i + 2 + offset + 2);
            end_of_last_comment = i;
        } else {
            i += 1;
        }
    }
    &trivia[end_of_last_comment..]
}

/// Indentation of the line a value starts on, given the whitespace before it.
fn line_indent(whitespace: &str, base: &str) -> String {
    match whitespace.rfind('\n') {
        Some(i) => {
            let tail = &whitespace[i + 1..];
            if tail.bytes().all(|b| b == b' ' || b == b'\t') {
                tail.to_string()
            } else {
                base.to_string()
            }
        }
        None => base.to_string(),
    }
}

fn is_identifier(key: &str) -> bool {
    let mut bytes = key.bytes();
    bytes.next().is_some_and(is_identifier_start) && bytes.all(is_identifier_part)
}
