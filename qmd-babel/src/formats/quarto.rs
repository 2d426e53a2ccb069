//! Quarto markdown
//!
//! Pandoc markdown plus `{{< ... >}}` shortcodes on lines of their own.

use crate::embedded::EmbeddedFormatters;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{Dialect, FormatOptions};
use crate::reconstruct::HandlerTable;
use crate::transcoder::Transcoder;
use crate::tree::Document;

/// Format implementation for Quarto markdown
#[derive(Debug)]
pub struct QuartoFormat {
    transcoder: Transcoder,
}

impl Default for QuartoFormat {
    fn default() -> Self {
        Self {
            transcoder: Transcoder::new(FormatOptions::for_dialect(Dialect::Quarto)),
        }
    }
}

impl QuartoFormat {
    /// Use `options`; the dialect is always Quarto.
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.transcoder.set_options(FormatOptions {
            dialect: Dialect::Quarto,
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

impl Format for QuartoFormat {
    fn name(&self) -> &str {
        "quarto"
    }

    fn description(&self) -> &str {
        "Quarto markdown: Pandoc markdown with shortcodes"
    }

    fn file_extensions(&self) -> &[&str] {
        &["qmd"]
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
