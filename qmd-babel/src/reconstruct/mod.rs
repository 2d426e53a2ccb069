//! Directive tree → Pandoc text
//!
//! The [`Renderer`] walks the tree and writes each block. Directive nodes are dispatched through a
//! [`HandlerTable`]; everything else has one default rendering:
//!
//! - front matter and markdown runs are copied (runs optionally normalized through comrak);
//! - fenced code is copied, or re-formatted by a registered embedded formatter. Leading `#|`
//!   cell options are never handed to the formatter.
//!
//! Blocks are separated by one blank line and a non-empty document ends with a newline. Fence
//! strengths from the pre-processor do not survive: nesting is carried by the tree, and every
//! Pandoc div is closed with a bare `:::`.

pub mod handlers;
pub mod markdown;

pub use handlers::{ContainerHandler, HandlerTable, LeafHandler};

use crate::embedded::EmbeddedFormatters;
use crate::options::FormatOptions;
use crate::tree::{Block, CodeBlock, Document};

/// Separator between sibling blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Serializes a directive tree with a handler table.
pub struct Renderer<'a> {
    handlers: &'a HandlerTable,
    options: &'a FormatOptions,
    embedded: &'a EmbeddedFormatters,
}

impl<'a> Renderer<'a> {
    pub fn new(
        handlers: &'a HandlerTable,
        options: &'a FormatOptions,
        embedded: &'a EmbeddedFormatters,
    ) -> Self {
        Self {
            handlers,
            options,
            embedded,
        }
    }

    pub fn handlers(&self) -> &HandlerTable {
        self.handlers
    }

    pub fn options(&self) -> &FormatOptions {
        self.options
    }

    pub fn render_document(&self, doc: &Document) -> String {
        let mut text = self.render_blocks(&doc.blocks);
        if !text.is_empty() {
            text.push('\n');
        }
        tracing::debug!(
            blocks = doc.blocks.len(),
            bytes = text.len(),
            "reconstructed document"
        );
        text
    }

    /// Render sibling blocks separated by blank lines.
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        blocks
            .iter()
            .map(|block| self.render_block(block))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    pub fn render_block(&self, block: &Block) -> String {
        match block {
            Block::FrontMatter(text) => text.clone(),
            Block::Container(node) => self.handlers.container(&node.name).render(node, self),
            Block::Leaf(node) => self.handlers.leaf(&node.name).render(node, self),
            Block::Code(code) => self.render_code(code),
            Block::Markdown(text) => self.render_markdown(text),
        }
    }

    fn render_markdown(&self, text: &str) -> String {
        if self.options.normalize_markdown {
            if let Some(normalized) = markdown::normalize(text, &self.options.extensions) {
                return normalized;
            }
        }
        text.to_string()
    }

    fn render_code(&self, code: &CodeBlock) -> String {
        let (cell_options, source) = code.split_cell_options();
        let formatted = code
            .language()
            .filter(|_| self.options.embedded && !source.is_empty())
            .and_then(|language| self.embedded.apply(&source.join("\n"), language));

        let mut lines = vec![code.opening.clone()];
        match formatted {
            Some(body) => {
                lines.extend(cell_options.iter().cloned());
                let body = body.trim_end_matches('\n');
                if !body.is_empty() {
                    lines.extend(body.split('\n').map(str::to_string));
                }
            }
            None => lines.extend(code.lines.iter().cloned()),
        }
        lines.extend(code.closing.iter().cloned());
        lines.join("\n")
    }
}

/// Render `doc` with the default Pandoc handlers.
pub fn serialize(doc: &Document, options: &FormatOptions) -> String {
    let handlers = HandlerTable::pandoc();
    let embedded = EmbeddedFormatters::new();
    Renderer::new(&handlers, options, &embedded).render_document(doc)
}
