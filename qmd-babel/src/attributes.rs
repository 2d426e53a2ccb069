//! Attribute model shared by divs, math labels and directives
//!
//! A brace group such as `{#fig-1 .wide .dark width="50%"}` carries an identifier, an ordered
//! class list and ordered key/value pairs. The same token syntax is used by Pandoc and by the
//! directive grammar, so one parser serves both sides of the transcoder.
//!
//! Serialization is policy driven. Math labels and fenced divs were historically written in
//! different orders (id first for math, classes first for divs) and documents in the wild rely on
//! both, so each construct gets its own named [`AttributeOrder`] instead of one shared writer.

use hashlink::LinkedHashMap;
use serde::Serialize;
use std::fmt;

/// Identifier, classes and key/value pairs of a block.
///
/// `id` and `class` never appear as keys in `pairs`: [`Attributes::insert`] routes them to their
/// dedicated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub pairs: LinkedHashMap<String, String>,
}

/// Position and reason of a malformed attribute group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeError {
    /// Byte offset into the attribute text.
    pub offset: usize,
    pub message: String,
}

impl AttributeError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.pairs.is_empty()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a key/value pair, routing `id` and `class` to their own fields.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "id" => self.id = Some(value),
            "class" => self
                .classes
                .extend(value.split_whitespace().map(str::to_string)),
            _ => {
                self.pairs.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Parse the inside of a brace group (without the braces).
    pub fn parse(source: &str) -> Result<Self, AttributeError> {
        let mut attrs = Attributes::new();
        let mut cursor = Cursor::new(source);

        loop {
            cursor.skip_whitespace();
            let Some((start, c)) = cursor.peek() else {
                break;
            };

            match c {
                '#' => {
                    cursor.bump();
                    let word = cursor.take_while(|c| !c.is_whitespace());
                    if word.is_empty() {
                        return Err(AttributeError::new(start, "empty identifier after '#'"));
                    }
                    attrs.id = Some(word);
                }
                '.' => {
                    cursor.bump();
                    let word = cursor.take_while(|c| !c.is_whitespace());
                    if word.is_empty() {
                        return Err(AttributeError::new(start, "empty class after '.'"));
                    }
                    attrs.classes.push(word);
                }
                '=' | '"' | '\'' => {
                    return Err(AttributeError::new(start, format!("unexpected '{c}'")));
                }
                _ => {
                    let key = cursor
                        .take_while(|c| !c.is_whitespace() && c != '=' && c != '"' && c != '\'');
                    match cursor.peek() {
                        Some((_, '=')) => {
                            cursor.bump();
                            let value = match cursor.peek() {
                                Some((quote_at, quote @ ('"' | '\''))) => {
                                    cursor.bump();
                                    let value = cursor.take_quoted(quote).ok_or_else(|| {
                                        AttributeError::new(quote_at, "unterminated quoted value")
                                    })?;
                                    if let Some((at, next)) = cursor.peek() {
                                        if !next.is_whitespace() {
                                            return Err(AttributeError::new(
                                                at,
                                                "expected whitespace after quoted value",
                                            ));
                                        }
                                    }
                                    value
                                }
                                _ => cursor.take_while(|c| !c.is_whitespace()),
                            };
                            attrs.insert(key, value);
                        }
                        Some((at, quote @ ('"' | '\''))) => {
                            return Err(AttributeError::new(at, format!("unexpected '{quote}'")));
                        }
                        // Pandoc shorthand for `.unnumbered`
                        _ if key == "-" => attrs.classes.push("unnumbered".to_string()),
                        _ => attrs.insert(key, ""),
                    }
                }
            }
        }

        Ok(attrs)
    }

    /// Render the tokens of `order` separated by spaces, without braces.
    pub fn render<O: AttributeOrder>(&self, order: O) -> String {
        order.tokens(self).join(" ")
    }

    /// Render `{...}` or `None` when there is nothing to write.
    pub fn braced<O: AttributeOrder>(&self, order: O) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{{{}}}", self.render(order)))
        }
    }
}

/// A serialization policy deciding the token order of an attribute group.
pub trait AttributeOrder {
    fn tokens(&self, attrs: &Attributes) -> Vec<String>;
}

/// `#id .class key="value"`: the order used for math labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathAttributeOrder;

/// `.class #id key="value"`: the order used for fenced divs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivAttributeOrder;

/// Order used when writing the intermediate directive grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveAttributeOrder;

impl AttributeOrder for MathAttributeOrder {
    fn tokens(&self, attrs: &Attributes) -> Vec<String> {
        let mut tokens = Vec::new();
        push_id(&mut tokens, attrs);
        push_classes(&mut tokens, attrs);
        push_pairs(&mut tokens, attrs);
        tokens
    }
}

impl AttributeOrder for DivAttributeOrder {
    fn tokens(&self, attrs: &Attributes) -> Vec<String> {
        let mut tokens = Vec::new();
        push_classes(&mut tokens, attrs);
        push_id(&mut tokens, attrs);
        push_pairs(&mut tokens, attrs);
        tokens
    }
}

impl AttributeOrder for DirectiveAttributeOrder {
    fn tokens(&self, attrs: &Attributes) -> Vec<String> {
        MathAttributeOrder.tokens(attrs)
    }
}

fn push_id(tokens: &mut Vec<String>, attrs: &Attributes) {
    if let Some(id) = &attrs.id {
        tokens.push(format!("#{id}"));
    }
}

fn push_classes(tokens: &mut Vec<String>, attrs: &Attributes) {
    tokens.extend(attrs.classes.iter().map(|class| format!(".{class}")));
}

fn push_pairs(tokens: &mut Vec<String>, attrs: &Attributes) {
    tokens.extend(
        attrs
            .pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", quote_value(value))),
    );
}

/// Wrap `value` in double quotes, escaping what the parser would otherwise misread.
///
/// A backslash is only doubled when it precedes a quote, another backslash, or the end of the
/// value; everything else (LaTeX in shortcodes, Windows paths) is written as-is.
pub fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' if matches!(chars.peek(), None | Some('"') | Some('\\')) => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.source[self.pos..].chars().next().map(|c| (self.pos, c))
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.source[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while let Some((_, c)) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.bump();
        }
        self.source[start..self.pos].to_string()
    }

    /// Read up to the closing `quote`, which is consumed. `None` if the value never ends.
    fn take_quoted(&mut self, quote: char) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.bump()? {
                '\\' => {
                    let next = self.bump()?;
                    if next != quote && next != '\\' {
                        value.push('\\');
                    }
                    value.push(next);
                }
                c if c == quote => return Some(value),
                c => value.push(c),
            }
        }
    }
}
