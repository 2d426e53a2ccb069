//! Pandoc markdown
//!
//! Fenced divs, `$$` math blocks with trailing labels and single-line labeled math. Shortcodes are
//! not part of Pandoc and stay paragraph text.

use crate::embedded::EmbeddedFormatters;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{Dialect, FormatOptions};
use crate::reconstruct::HandlerTable;
use crate::transcoder::Transcoder;
use crate::tree::Document;

/// Format implementation for Pandoc markdown
#[derive(Debug)]
pub struct PandocFormat {
    transcoder: Transcoder,
}

impl Default for PandocFormat {
    fn default() -> Self {
        Self {
            transcoder: Transcoder::new(FormatOptions::for_dialect(Dialect::Pandoc)),
        }
    }
}

impl PandocFormat {
    /// Use `options`; the dialect is always Pandoc.
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.transcoder.set_options(FormatOptions {
            dialect: Dialect::Pandoc,
            ..options
        });
        self
    }

    pub fn with_embedded(mut self, embedded: EmbeddedFormatters) -> Self {
        self.transcoder.set_embedded(embedded);
        self
    }

    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.transcoder.set_handlers(handlers);
        self
    }

    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }
}

impl Format for PandocFormat {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn description(&self) -> &str {
        "Pandoc markdown with fenced divs and labeled math"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        self.transcoder.parse(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.transcoder.serialize(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metadata() {
        let format = PandocFormat::default();
        assert_eq!(format.name(), "pandoc");
        assert_eq!(format.file_extensions(), &["md", "markdown"]);
        assert!(format.supports_parsing());
        assert!(format.supports_serialization());
    }

    #[test]
    fn test_options_keep_dialect() {
        let format = PandocFormat::default().with_options(FormatOptions::for_dialect(Dialect::Quarto));
        assert_eq!(format.transcoder().options().dialect, Dialect::Pandoc);
    }

    #[test]
    fn test_shortcodes_are_text() {
        let format = PandocFormat::default();
        assert_eq!(
            format.format("{{< meta title >}}").unwrap(),
            "{{< meta title >}}\n"
        );
        let doc = format.parse("{{< meta title >}}").unwrap();
        assert!(matches!(doc.blocks.as_slice(), [crate::tree::Block::Markdown(_)]));
    }
}
