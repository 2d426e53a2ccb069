//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The directive reader rejected the pre-processed text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// A fatal problem found while reading directive text into a tree.
///
/// Lines and columns are 1-based and refer to the text handed to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: container directive '{name}' is never closed")]
    UnclosedDirective { name: String, line: usize },
    #[error("line {line}, column {column}: {message}")]
    InvalidAttributes {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// The 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnclosedDirective { line, .. } => *line,
            ParseError::InvalidAttributes { line, .. } => *line,
        }
    }
}

/// Failure reported by an embedded code formatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{language} formatter failed: {message}")]
pub struct EmbedError {
    pub language: String,
    pub message: String,
}

impl EmbedError {
    pub fn new(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            message: message.into(),
        }
    }
}
