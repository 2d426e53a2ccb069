//! Opaque region detection
//!
//! Neither pass may rewrite text that the markdown tokenizer treats as literal: fenced and
//! indented code, HTML comments and the YAML front matter. Instead of tracking fences by hand,
//! both passes ask comrak where those regions are and skip the affected lines.
//!
//! Fenced code blocks that sit directly under the document are additionally reported as
//! [`FencedCode`] spans so the directive reader can lift them into code nodes.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// HTML block type assigned by CommonMark to `<!-- ... -->` comments.
const HTML_COMMENT_BLOCK: u8 = 2;

/// A fenced code block that is a direct child of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode {
    /// First line (the opening fence), 0-based.
    pub start: usize,
    /// One past the last line of the block.
    pub end: usize,
    /// Whether the block ends with a closing fence (otherwise it runs to end of input).
    pub closed: bool,
    /// A fence that would close the block.
    pub fence: String,
}

/// Line-level map of the regions both passes must leave alone.
#[derive(Debug, Clone, Default)]
pub struct Regions {
    opaque: Vec<bool>,
    fenced: Vec<FencedCode>,
    front_matter: Option<usize>,
}

impl Regions {
    /// Whether line `index` (0-based) lies inside code, a comment or front matter.
    pub fn is_opaque(&self, index: usize) -> bool {
        self.opaque.get(index).copied().unwrap_or(false)
    }

    /// Top-level fenced code block starting at line `index`, if any.
    pub fn fenced_at(&self, index: usize) -> Option<&FencedCode> {
        self.fenced.iter().find(|code| code.start == index)
    }

    /// The top-level fenced code block that runs to end of input, if any.
    pub fn unclosed_fence(&self) -> Option<&FencedCode> {
        self.fenced.iter().find(|code| !code.closed)
    }

    /// One past the last front matter line, when the document starts with front matter.
    pub fn front_matter_end(&self) -> Option<usize> {
        self.front_matter
    }

    fn mark(&mut self, start: usize, end: usize) {
        let end = end.min(self.opaque.len());
        for flag in self.opaque.iter_mut().take(end).skip(start) {
            *flag = true;
        }
    }
}

/// Locate the opaque regions of `text`.
pub fn scan(text: &str, front_matter: bool) -> Regions {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut regions = Regions {
        opaque: vec![false; lines.len()],
        ..Regions::default()
    };

    if front_matter {
        if let Some(end) = detect_front_matter(&lines) {
            regions.front_matter = Some(end);
            regions.mark(0, end);
        }
    }

    let arena = Arena::new();
    let options = ComrakOptions::default();
    let root = parse_document(&arena, text, &options);

    for node in root.descendants() {
        let ast = node.data.borrow();
        let start = ast.sourcepos.start.line.saturating_sub(1);
        let last = ast.sourcepos.end.line.saturating_sub(1);
        match &ast.value {
            NodeValue::CodeBlock(block) if block.fenced && is_top_level(node) => {
                let fence_char = char::from(block.fence_char);
                let closing = lines
                    .iter()
                    .enumerate()
                    .skip(start + 1)
                    .find(|(_, line)| is_closing_fence(line, fence_char, block.fence_length))
                    .map(|(index, _)| index);
                let code = FencedCode {
                    start,
                    end: closing.map_or(lines.len(), |index| index + 1),
                    closed: closing.is_some(),
                    fence: fence_char.to_string().repeat(block.fence_length),
                };
                regions.mark(code.start, code.end);
                regions.fenced.push(code);
            }
            NodeValue::CodeBlock(_) => regions.mark(start, last + 1),
            NodeValue::HtmlBlock(html) if html.block_type == HTML_COMMENT_BLOCK => {
                regions.mark(start, last + 1)
            }
            _ => {}
        }
    }

    tracing::trace!(
        fenced = regions.fenced.len(),
        front_matter = regions.front_matter.is_some(),
        "scanned opaque regions"
    );
    regions
}

fn is_top_level<'a>(node: &'a AstNode<'a>) -> bool {
    node.parent()
        .is_some_and(|parent| matches!(parent.data.borrow().value, NodeValue::Document))
}

/// YAML front matter: `---`, a non-blank line, and a closing `---` or `...`.
fn detect_front_matter(lines: &[&str]) -> Option<usize> {
    if lines.first()?.trim_end() != "---" || lines.get(1)?.trim().is_empty() {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| matches!(line.trim_end(), "---" | "..."))
        .map(|(index, _)| index + 1)
}

/// A CommonMark closing fence: up to three spaces, at least `length` fence characters, nothing
/// but whitespace after.
pub fn is_closing_fence(line: &str, fence_char: char, length: usize) -> bool {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return false;
    }
    let rest = &line[indent..];
    let run = rest.len() - rest.trim_start_matches(fence_char).len();
    run >= length && rest[run..].trim().is_empty()
}
