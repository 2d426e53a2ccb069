//! Reads directive text into a [`Document`]
//!
//! # The Algorithm
//!
//! The reader is a single forward pass over lines with a stack of open containers, in the same
//! spirit as a flat-to-nested event converter:
//!
//! 1. Front matter, when enabled and present, becomes the first block.
//! 2. While the innermost container has a raw body (math), every line is appended verbatim until
//!    a closer at least as long as its opener arrives.
//! 3. Top-level fenced code blocks, located by comrak, become code nodes. Lines of any other
//!    opaque region are plain text and are never matched against the directive grammar.
//! 4. An opener pushes a container. A closer pops the innermost container when it is at least as
//!    long as that container's opener; shorter or unmatched closers are plain text.
//! 5. Leaf directives become leaf nodes. Every other line extends the current markdown run.
//!
//! Text lines and raw body lines lose the backslash the pre-processor put in front of directive
//! markup that has to stay literal.
//!
//! Containers still open at end of input, and attribute groups that do not parse, are fatal.

use super::{Block, CodeBlock, ContainerBody, ContainerDirective, Document, LeafDirective};
use crate::attributes::Attributes;
use crate::error::ParseError;
use crate::fence::FenceStrength;
use crate::options::GrammarExtensions;
use crate::scan::scan;
use crate::syntax::{unescape_literal, DirectiveLine};
use std::borrow::Cow;

/// Name of the container whose body is kept verbatim when math is enabled.
pub const MATH: &str = "math";

/// Read directive text into a tree.
pub fn parse(text: &str, extensions: &GrammarExtensions) -> Result<Document, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let regions = scan(text, extensions.front_matter);
    let mut reader = Reader::default();
    let mut index = 0;

    if let Some(end) = regions.front_matter_end() {
        reader.push_block(Block::FrontMatter(lines[..end].join("\n")));
        index = end;
    }

    while index < lines.len() {
        let line = lines[index];

        if let Some(raw_strength) = reader.raw_strength() {
            match DirectiveLine::classify(line) {
                DirectiveLine::Close { strength } if strength >= raw_strength => reader.close(),
                _ => reader.push_raw(line),
            }
            index += 1;
            continue;
        }

        if let Some(code) = regions.fenced_at(index) {
            let mut body_end = if code.closed { code.end - 1 } else { code.end };
            if !code.closed {
                // blank lines after an unclosed fence belong to the document, not the code
                while body_end > code.start + 1 && lines[body_end - 1].trim().is_empty() {
                    body_end -= 1;
                }
            }
            let block = CodeBlock {
                opening: line.to_string(),
                lines: lines[code.start + 1..body_end]
                    .iter()
                    .map(|line| line.to_string())
                    .collect(),
                closing: code.closed.then(|| lines[code.end - 1].to_string()),
            };
            reader.push_block(Block::Code(block));
            index = code.end;
            continue;
        }

        if regions.is_opaque(index) {
            reader.push_text(Cow::Borrowed(line));
            index += 1;
            continue;
        }

        match DirectiveLine::classify(line) {
            DirectiveLine::Close { strength } => match reader.open_strength() {
                Some(open) if strength >= open => reader.close(),
                _ => reader.push_text(Cow::Borrowed(line)),
            },
            DirectiveLine::Open {
                strength,
                name,
                attributes,
            } => {
                let attributes = parse_attributes(attributes, index)?;
                let raw = extensions.math && name == MATH;
                reader.open(name, attributes, strength, index + 1, raw);
            }
            DirectiveLine::Leaf {
                name,
                label,
                attributes,
            } => {
                let attributes = parse_attributes(attributes, index)?;
                reader.push_block(Block::Leaf(LeafDirective {
                    name: name.to_string(),
                    label,
                    attributes,
                }));
            }
            DirectiveLine::Other => reader.push_text(unescape_literal(line)),
        }
        index += 1;
    }

    if let Some(open) = reader.stack.last() {
        return Err(ParseError::UnclosedDirective {
            name: open.name.clone(),
            line: open.line,
        });
    }

    let document = reader.finish();
    tracing::debug!(blocks = document.blocks.len(), "read directive tree");
    Ok(document)
}

fn parse_attributes(
    attributes: Option<(&str, usize)>,
    index: usize,
) -> Result<Attributes, ParseError> {
    let Some((text, offset)) = attributes else {
        return Ok(Attributes::new());
    };
    Attributes::parse(text).map_err(|err| ParseError::InvalidAttributes {
        line: index + 1,
        column: offset + err.offset + 1,
        message: err.message,
    })
}

/// Blocks of one nesting level plus the markdown lines not yet turned into a block.
#[derive(Debug, Default)]
struct Frame<'t> {
    blocks: Vec<Block>,
    run: Vec<Cow<'t, str>>,
}

impl Frame<'_> {
    fn flush(&mut self) {
        let first = self.run.iter().position(|line| !line.trim().is_empty());
        let last = self.run.iter().rposition(|line| !line.trim().is_empty());
        if let (Some(first), Some(last)) = (first, last) {
            self.blocks
                .push(Block::Markdown(self.run[first..=last].join("\n")));
        }
        self.run.clear();
    }

    fn into_blocks(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

#[derive(Debug)]
enum OpenBody<'t> {
    Blocks(Frame<'t>),
    Raw(Vec<String>),
}

#[derive(Debug)]
struct OpenContainer<'t> {
    name: String,
    attributes: Attributes,
    strength: FenceStrength,
    /// 1-based line of the opener.
    line: usize,
    body: OpenBody<'t>,
}

#[derive(Debug, Default)]
struct Reader<'t> {
    root: Frame<'t>,
    stack: Vec<OpenContainer<'t>>,
}

impl<'t> Reader<'t> {
    fn open_strength(&self) -> Option<FenceStrength> {
        self.stack.last().map(|open| open.strength)
    }

    fn raw_strength(&self) -> Option<FenceStrength> {
        match self.stack.last() {
            Some(OpenContainer {
                strength,
                body: OpenBody::Raw(_),
                ..
            }) => Some(*strength),
            _ => None,
        }
    }

    fn frame(&mut self) -> &mut Frame<'t> {
        match self.stack.last_mut() {
            Some(OpenContainer {
                body: OpenBody::Blocks(frame),
                ..
            }) => frame,
            _ => &mut self.root,
        }
    }

    fn push_text(&mut self, line: Cow<'t, str>) {
        self.frame().run.push(line);
    }

    fn push_raw(&mut self, line: &str) {
        if let Some(OpenContainer {
            body: OpenBody::Raw(lines),
            ..
        }) = self.stack.last_mut()
        {
            lines.push(unescape_literal(line).into_owned());
        }
    }

    fn push_block(&mut self, block: Block) {
        let frame = self.frame();
        frame.flush();
        frame.blocks.push(block);
    }

    fn open(
        &mut self,
        name: &str,
        attributes: Attributes,
        strength: FenceStrength,
        line: usize,
        raw: bool,
    ) {
        self.frame().flush();
        let body = if raw {
            OpenBody::Raw(Vec::new())
        } else {
            OpenBody::Blocks(Frame::default())
        };
        self.stack.push(OpenContainer {
            name: name.to_string(),
            attributes,
            strength,
            line,
            body,
        });
    }

    fn close(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        let body = match open.body {
            OpenBody::Blocks(frame) => ContainerBody::Blocks(frame.into_blocks()),
            OpenBody::Raw(lines) => ContainerBody::Raw(lines),
        };
        self.push_block(Block::Container(ContainerDirective {
            name: open.name,
            attributes: open.attributes,
            body,
        }));
    }

    fn finish(self) -> Document {
        Document::new(self.root.into_blocks())
    }
}
