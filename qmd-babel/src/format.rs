//! Format trait definition
//!
//! This module defines the core Format trait that every dialect implements. The trait provides a
//! uniform interface for reading a document into the directive tree and writing it back.

use crate::error::FormatError;
use crate::tree::Document;

/// Trait for document formats
///
/// Implementors provide bidirectional conversion between source text and the directive tree.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, FormatError> {
///         // Parse source to Document
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "pandoc", "quarto")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"], ["qmd"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Parse and serialize again, producing the normalized form of `source`.
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let doc = self.parse(source)?;
        self.serialize(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl Format for ReadOnly {
        fn name(&self) -> &str {
            "read-only"
        }
        fn supports_parsing(&self) -> bool {
            true
        }
        fn parse(&self, _source: &str) -> Result<Document, FormatError> {
            Ok(Document::default())
        }
    }

    #[test]
    fn serialization_defaults_to_not_supported() {
        let format = ReadOnly;
        assert!(!format.supports_serialization());
        match format.format("text") {
            Err(FormatError::NotSupported(message)) => assert!(message.contains("read-only")),
            other => panic!("expected NotSupported, got {other:?}"),
        }
    }
}
