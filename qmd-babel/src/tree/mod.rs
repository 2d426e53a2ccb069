//! Directive tree
//!
//! The tree produced by reading directive text. Directive nodes stay generic (a name plus
//! attributes) so the reconstructor can decide per name how each one is written back; everything
//! the directive grammar does not own is kept as verbatim markdown runs or code blocks.

pub mod reader;

use crate::attributes::Attributes;
use serde::Serialize;

pub use reader::parse;

/// Prefix of a Quarto cell option line inside executable code.
const CELL_OPTION_PREFIX: &str = "#|";

/// Root of a directive tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Pretty JSON dump of the tree, for inspecting what the reader produced.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// YAML front matter including its delimiters.
    FrontMatter(String),
    Container(ContainerDirective),
    Leaf(LeafDirective),
    /// A fenced code block directly under the document.
    Code(CodeBlock),
    /// Any other run of lines, trimmed of surrounding blank lines.
    Markdown(String),
}

/// A fenced block with children, e.g. `:::::div{.note}` ... `:::::`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerDirective {
    pub name: String,
    pub attributes: Attributes,
    pub body: ContainerBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ContainerBody {
    Blocks(Vec<Block>),
    /// Lines kept verbatim, used for math.
    Raw(Vec<String>),
}

/// A single-line directive without children, e.g. `::shortcode{raw="meta title"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafDirective {
    pub name: String,
    pub label: Option<String>,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    /// The opening fence line as written.
    pub opening: String,
    pub lines: Vec<String>,
    /// The closing fence line, absent when the block runs to the end of input.
    pub closing: Option<String>,
}

impl CodeBlock {
    /// Info string after the opening fence.
    pub fn info(&self) -> &str {
        self.opening
            .trim_start()
            .trim_start_matches(['`', '~'])
            .trim()
    }

    /// Language tag: the first word of the info string, accepting `{python}` and `{.python}`.
    pub fn language(&self) -> Option<&str> {
        let tag = self
            .info()
            .trim_start_matches('{')
            .split(|c: char| c.is_whitespace() || c == '}' || c == ',')
            .next()?
            .trim_start_matches('.');
        (!tag.is_empty()).then_some(tag)
    }

    pub fn body(&self) -> String {
        self.lines.join("\n")
    }

    /// Leading `#| key: value` cell option lines, and the code after them.
    pub fn split_cell_options(&self) -> (&[String], &[String]) {
        let count = self
            .lines
            .iter()
            .take_while(|line| line.trim_start().starts_with(CELL_OPTION_PREFIX))
            .count();
        self.lines.split_at(count)
    }
}
