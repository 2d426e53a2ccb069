//! The full pipeline behind every dialect format
//!
//! ```text
//! source ──preprocess──▶ directive text ──tree::parse──▶ Document ──Renderer──▶ Pandoc text
//! ```
//!
//! The pre-processor maps every source line to exactly one directive line (divs still open at end
//! of input only append closers), so line numbers in a [`ParseError`](crate::error::ParseError)
//! point at the source document.

use crate::embedded::EmbeddedFormatters;
use crate::error::FormatError;
use crate::options::FormatOptions;
use crate::preprocess::{preprocess, PreprocessWarning};
use crate::reconstruct::{HandlerTable, Renderer};
use crate::tree::{self, Document};

/// Options, handlers and embedded formatters for one dialect.
#[derive(Default)]
pub struct Transcoder {
    options: FormatOptions,
    handlers: HandlerTable,
    embedded: EmbeddedFormatters,
}

impl Transcoder {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FormatOptions) {
        self.options = options;
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerTable {
        &mut self.handlers
    }

    pub fn set_handlers(&mut self, handlers: HandlerTable) {
        self.handlers = handlers;
    }

    pub fn embedded_mut(&mut self) -> &mut EmbeddedFormatters {
        &mut self.embedded
    }

    pub fn set_embedded(&mut self, embedded: EmbeddedFormatters) {
        self.embedded = embedded;
    }

    /// Read `source` into a tree, returning the pre-processor's warnings alongside.
    pub fn parse_with_warnings(
        &self,
        source: &str,
    ) -> Result<(Document, Vec<PreprocessWarning>), FormatError> {
        let preprocessed = preprocess(source, &self.options);
        let doc = tree::parse(&preprocessed.text, &self.options.extensions)?;
        Ok((doc, preprocessed.warnings))
    }

    pub fn parse(&self, source: &str) -> Result<Document, FormatError> {
        self.parse_with_warnings(source).map(|(doc, _)| doc)
    }

    pub fn serialize(&self, doc: &Document) -> String {
        Renderer::new(&self.handlers, &self.options, &self.embedded).render_document(doc)
    }

    pub fn format(&self, source: &str) -> Result<String, FormatError> {
        let doc = self.parse(source)?;
        Ok(self.serialize(&doc))
    }
}

impl std::fmt::Debug for Transcoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcoder")
            .field("options", &self.options)
            .field("embedded", &self.embedded)
            .finish_non_exhaustive()
    }
}
