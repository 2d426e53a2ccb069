//! The intermediate directive grammar
//!
//! Pandoc constructs are rewritten into generic directive lines before the tree is read:
//!
//! ```text
//! :::::div{.outer}        container opener: fence, name, optional attribute group
//! ::::math{#eq:one}       nested container, one colon shorter
//! ::::                    closer: colon-only line at least as long as the opener
//! ::shortcode{raw="..."}  leaf directive
//! ::math[x^2]{#eq:two}    leaf directive with an escaped label
//! ```
//!
//! This module owns both directions of that syntax: building lines for the pre-processor and
//! recognizing them for the directive reader.

use crate::attributes::{quote_value, Attributes, DirectiveAttributeOrder};
use crate::fence::FenceStrength;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static CONTAINER_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(:{3,})([A-Za-z][\w-]*)(?:\{(.*)\})?\s*$").expect("valid container regex")
});

static CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(:{3,})\s*$").expect("valid close regex"));

static LEAF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}::([A-Za-z][\w-]*)(?:\[((?:\\.|[^\]\\])*)\])?(?:\{(.*)\})?\s*$")
        .expect("valid leaf regex")
});

static LITERAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( {0,3})(\\*)").expect("valid literal prefix regex"));

/// A line of directive text, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveLine<'a> {
    Open {
        strength: FenceStrength,
        name: &'a str,
        /// Attribute text without braces, and its byte offset in the line.
        attributes: Option<(&'a str, usize)>,
    },
    Close {
        strength: FenceStrength,
    },
    Leaf {
        name: &'a str,
        label: Option<String>,
        attributes: Option<(&'a str, usize)>,
    },
    Other,
}

impl<'a> DirectiveLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(caps) = CLOSE.captures(line) {
            return DirectiveLine::Close {
                strength: FenceStrength::new(caps[1].len()),
            };
        }
        if let Some(caps) = CONTAINER_OPEN.captures(line) {
            let (Some(fence), Some(name)) = (caps.get(1), caps.get(2)) else {
                return DirectiveLine::Other;
            };
            return DirectiveLine::Open {
                strength: FenceStrength::new(fence.len()),
                name: name.as_str(),
                attributes: caps.get(3).map(|m| (m.as_str(), m.start())),
            };
        }
        if let Some(caps) = LEAF.captures(line) {
            let Some(name) = caps.get(1) else {
                return DirectiveLine::Other;
            };
            return DirectiveLine::Leaf {
                name: name.as_str(),
                label: caps.get(2).map(|m| unescape_label(m.as_str())),
                attributes: caps.get(3).map(|m| (m.as_str(), m.start())),
            };
        }
        DirectiveLine::Other
    }
}

/// Protect a line that must stay text but would read as a directive line.
///
/// One backslash goes in front of the directive markup, after any indentation. Lines that
/// already carry backslashes there get one more, so [`unescape_literal`] is an exact inverse.
pub fn escape_literal(line: &str) -> Cow<'_, str> {
    match split_literal(line) {
        Some((indent, backslashes, rest)) => Cow::Owned(format!("{indent}\\{backslashes}{rest}")),
        None => Cow::Borrowed(line),
    }
}

/// Undo [`escape_literal`]. Lines it would not have produced are returned unchanged.
pub fn unescape_literal(line: &str) -> Cow<'_, str> {
    match split_literal(line) {
        Some((indent, backslashes, rest)) if !backslashes.is_empty() => {
            Cow::Owned(format!("{indent}{}{rest}", &backslashes[1..]))
        }
        _ => Cow::Borrowed(line),
    }
}

/// Indentation, leading backslashes and the rest of a line whose rest reads as directive markup.
fn split_literal(line: &str) -> Option<(&str, &str, &str)> {
    let caps = LITERAL_PREFIX.captures(line)?;
    let indent = caps.get(1)?.as_str();
    let backslashes = caps.get(2)?.as_str();
    let rest = &line[indent.len() + backslashes.len()..];
    let bare = format!("{indent}{rest}");
    match DirectiveLine::classify(&bare) {
        DirectiveLine::Other => None,
        _ => Some((indent, backslashes, rest)),
    }
}

/// `:::::name{attrs}`. `attributes` is copied verbatim; empty text adds no braces.
pub fn container_open(strength: FenceStrength, name: &str, attributes: &str) -> String {
    let mut line = format!("{}{name}", strength.fence());
    push_attribute_text(&mut line, attributes);
    line
}

/// `::name[label]{attrs}` with the label escaped.
pub fn leaf(name: &str, label: Option<&str>, attributes: &str) -> String {
    let mut line = format!("::{name}");
    if let Some(label) = label {
        line.push('[');
        line.push_str(&escape_label(label));
        line.push(']');
    }
    push_attribute_text(&mut line, attributes);
    line
}

/// `::name{key="value"}` for a single, quoted attribute.
pub fn leaf_with_value(name: &str, key: &str, value: &str) -> String {
    format!("::{name}{{{key}={}}}", quote_value(value))
}

/// Generic leaf rendering used when no dedicated handler knows the directive.
pub fn render_leaf(name: &str, label: Option<&str>, attributes: &Attributes) -> String {
    leaf(name, label, &attributes.render(DirectiveAttributeOrder))
}

fn push_attribute_text(line: &mut String, attributes: &str) {
    let attributes = attributes.trim();
    if !attributes.is_empty() {
        line.push('{');
        line.push_str(attributes);
        line.push('}');
    }
}

/// Escape `[` and `]`, doubling backslashes only where they would be misread.
pub fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' => out.push_str("\\["),
            ']' => out.push_str("\\]"),
            '\\' if matches!(chars.peek(), None | Some('[' | ']' | '\\')) => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}

pub fn unescape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('[' | ']' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
