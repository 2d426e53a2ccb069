//! Typed views of the directive nodes the reconstructor knows
//!
//! The tree keeps every directive generic. These views pull the pieces a handler needs out of a
//! node, so rendering code works with `MathBlock::content` instead of matching on body variants.

use crate::attributes::Attributes;
use crate::preprocess::DEFAULT_DIV_NAME;
use crate::tree::{Block, ContainerBody, ContainerDirective, LeafDirective};

const CALLOUT_CLASS_PREFIX: &str = "callout-";

/// Display math, either a `$$` block or a single `$$ ... $$` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathBlock {
    pub content: Vec<String>,
    pub label: Attributes,
    pub inline: bool,
}

impl MathBlock {
    /// View a `math` container. Bodies read without the math extension are flattened to text.
    pub fn from_container(node: &ContainerDirective) -> Self {
        let content = match &node.body {
            ContainerBody::Raw(lines) => lines.clone(),
            ContainerBody::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    Block::Markdown(text) => Some(text.clone()),
                    _ => None,
                })
                .collect(),
        };
        Self {
            content,
            label: node.attributes.clone(),
            inline: false,
        }
    }

    /// View a `::math[content]{label}` leaf. `None` without a label holding the content.
    pub fn from_leaf(node: &LeafDirective) -> Option<Self> {
        let content = node.label.as_ref()?;
        Some(Self {
            content: vec![content.clone()],
            label: node.attributes.clone(),
            inline: true,
        })
    }

    /// Content lines joined and trimmed.
    pub fn text(&self) -> String {
        self.content.join("\n").trim().to_string()
    }
}

/// A `{{< ... >}}` template placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode {
    pub raw: String,
}

impl Shortcode {
    /// View a `::shortcode{raw="..."}` leaf. `None` when `raw` is missing or blank.
    pub fn from_leaf(node: &LeafDirective) -> Option<Self> {
        let raw = node.attributes.get("raw")?.trim();
        (!raw.is_empty()).then(|| Self {
            raw: raw.to_string(),
        })
    }
}

/// A Pandoc fenced div.
#[derive(Debug, Clone, PartialEq)]
pub struct DivBlock<'a> {
    /// Directive name, `None` for a generic div.
    pub name: Option<&'a str>,
    pub attributes: &'a Attributes,
    pub children: &'a [Block],
}

impl<'a> DivBlock<'a> {
    pub fn from_container(node: &'a ContainerDirective) -> Self {
        let children = match &node.body {
            ContainerBody::Blocks(blocks) => blocks.as_slice(),
            ContainerBody::Raw(_) => &[],
        };
        Self {
            name: (node.name != DEFAULT_DIV_NAME).then_some(node.name.as_str()),
            attributes: &node.attributes,
            children,
        }
    }

    /// Callout kind for Quarto's `.callout-*` divs (`note` for `.callout-note`).
    pub fn callout(&self) -> Option<&'a str> {
        self.attributes
            .classes
            .iter()
            .find_map(|class| class.strip_prefix(CALLOUT_CLASS_PREFIX))
            .filter(|kind| !kind.is_empty())
    }
}
