//! Directive handlers and the table that dispatches to them
//!
//! Containers and leaves are looked up by directive name. A name without a handler goes to the
//! table's fallback entry: Pandoc fenced div syntax for containers, generic `::name[label]{attrs}`
//! syntax for leaves.

use super::Renderer;
use crate::attributes::{DivAttributeOrder, MathAttributeOrder};
use crate::constructs::{DivBlock, MathBlock, Shortcode};
use crate::syntax;
use crate::tree::{ContainerDirective, LeafDirective};
use std::collections::HashMap;

/// Renders one kind of container directive.
pub trait ContainerHandler: Send + Sync {
    fn render(&self, node: &ContainerDirective, renderer: &Renderer<'_>) -> String;
}

/// Renders one kind of leaf directive.
pub trait LeafHandler: Send + Sync {
    fn render(&self, node: &LeafDirective, renderer: &Renderer<'_>) -> String;
}

/// Directive handlers keyed by name, with one fallback per directive kind.
pub struct HandlerTable {
    containers: HashMap<String, Box<dyn ContainerHandler>>,
    container_fallback: Box<dyn ContainerHandler>,
    leaves: HashMap<String, Box<dyn LeafHandler>>,
    leaf_fallback: Box<dyn LeafHandler>,
}

impl HandlerTable {
    /// An empty table that sends every directive to the given fallbacks.
    pub fn new(
        container_fallback: Box<dyn ContainerHandler>,
        leaf_fallback: Box<dyn LeafHandler>,
    ) -> Self {
        Self {
            containers: HashMap::new(),
            container_fallback,
            leaves: HashMap::new(),
            leaf_fallback,
        }
    }

    /// The handlers that write Pandoc syntax: math blocks, inline math, shortcodes and fenced
    /// divs.
    pub fn pandoc() -> Self {
        let mut table = Self::new(Box::new(PandocDivHandler), Box::new(GenericLeafHandler));
        table.register_container("math", Box::new(MathBlockHandler));
        table.register_leaf("math", Box::new(InlineMathHandler));
        table.register_leaf("shortcode", Box::new(ShortcodeHandler));
        table
    }

    pub fn register_container(&mut self, name: &str, handler: Box<dyn ContainerHandler>) {
        self.containers.insert(name.to_string(), handler);
    }

    pub fn register_leaf(&mut self, name: &str, handler: Box<dyn LeafHandler>) {
        self.leaves.insert(name.to_string(), handler);
    }

    pub fn container(&self, name: &str) -> &dyn ContainerHandler {
        self.containers
            .get(name)
            .map_or(self.container_fallback.as_ref(), |handler| handler.as_ref())
    }

    pub fn leaf(&self, name: &str) -> &dyn LeafHandler {
        self.leaves
            .get(name)
            .map_or(self.leaf_fallback.as_ref(), |handler| handler.as_ref())
    }

    pub fn leaf_fallback(&self) -> &dyn LeafHandler {
        self.leaf_fallback.as_ref()
    }

    pub fn container_fallback(&self) -> &dyn ContainerHandler {
        self.container_fallback.as_ref()
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::pandoc()
    }
}

/// `$$`, the trimmed content, `$$` and the label in math order.
pub struct MathBlockHandler;

impl ContainerHandler for MathBlockHandler {
    fn render(&self, node: &ContainerDirective, _renderer: &Renderer<'_>) -> String {
        let math = MathBlock::from_container(node);
        format!("$$\n{}\n$${}", math.text(), label_suffix(&math))
    }
}

/// `$$ content $$` and the label in math order.
pub struct InlineMathHandler;

impl LeafHandler for InlineMathHandler {
    fn render(&self, node: &LeafDirective, renderer: &Renderer<'_>) -> String {
        match MathBlock::from_leaf(node) {
            Some(math) => format!("$$ {} $${}", math.text(), label_suffix(&math)),
            None => renderer.handlers().leaf_fallback().render(node, renderer),
        }
    }
}

fn label_suffix(math: &MathBlock) -> String {
    math.label
        .braced(MathAttributeOrder)
        .map(|braced| format!(" {braced}"))
        .unwrap_or_default()
}

/// `{{< raw >}}`.
pub struct ShortcodeHandler;

impl LeafHandler for ShortcodeHandler {
    fn render(&self, node: &LeafDirective, renderer: &Renderer<'_>) -> String {
        match Shortcode::from_leaf(node) {
            Some(shortcode) => format!("{{{{< {} >}}}}", shortcode.raw),
            None => renderer.handlers().leaf_fallback().render(node, renderer),
        }
    }
}

/// Pandoc fenced div: `:::`/`::: {attrs}`/`::: name {attrs}`, the children, and a bare `:::`.
pub struct PandocDivHandler;

impl ContainerHandler for PandocDivHandler {
    fn render(&self, node: &ContainerDirective, renderer: &Renderer<'_>) -> String {
        let div = DivBlock::from_container(node);
        let attributes = div.attributes.braced(DivAttributeOrder);
        let header = match (div.name, attributes) {
            (Some(name), Some(attributes)) => format!("::: {name} {attributes}"),
            (Some(name), None) => format!("::: {name}"),
            (None, Some(attributes)) => format!("::: {attributes}"),
            (None, None) => ":::".to_string(),
        };

        let body = renderer.render_blocks(div.children);
        let body = body.trim_matches('\n');
        if body.trim().is_empty() {
            format!("{header}\n:::")
        } else {
            format!("{header}\n{body}\n:::")
        }
    }
}

/// `::name[label]{attrs}`, the directive syntax itself.
pub struct GenericLeafHandler;

impl LeafHandler for GenericLeafHandler {
    fn render(&self, node: &LeafDirective, _renderer: &Renderer<'_>) -> String {
        syntax::render_leaf(&node.name, node.label.as_deref(), &node.attributes)
    }
}
