//! Options shared by the pre-processor, the directive reader and the reconstructor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source dialect of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Pandoc markdown: fenced divs, math and labels.
    Pandoc,
    /// Quarto markdown: Pandoc plus `{{< ... >}}` shortcodes.
    #[default]
    Quarto,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Pandoc => "pandoc",
            Dialect::Quarto => "quarto",
        }
    }

    /// Whether standalone shortcode lines are recognized.
    pub fn shortcodes(self) -> bool {
        matches!(self, Dialect::Quarto)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Grammar extensions enabled when reading the directive text.
///
/// `math` and `front_matter` change how the reader builds the tree. The remaining flags are only
/// consulted when markdown runs are normalized through comrak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarExtensions {
    pub math: bool,
    pub front_matter: bool,
    pub table: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub description_lists: bool,
}

impl Default for GrammarExtensions {
    fn default() -> Self {
        Self {
            math: true,
            front_matter: true,
            table: true,
            strikethrough: true,
            footnotes: true,
            description_lists: true,
        }
    }
}

/// Everything a format needs to transcode one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub dialect: Dialect,
    pub extensions: GrammarExtensions,
    /// Re-render plain markdown runs through comrak instead of copying them.
    pub normalize_markdown: bool,
    /// Run registered embedded formatters over fenced code blocks.
    pub embedded: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            extensions: GrammarExtensions::default(),
            normalize_markdown: false,
            embedded: true,
        }
    }
}

impl FormatOptions {
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }
}
