//! Embedded code formatters
//!
//! Fenced code blocks carry a language tag (` ```rust `, ` ```{python} `). When a formatter is
//! registered for that tag, the reconstructor hands it the block body and writes back whatever it
//! returns. Formatting embedded code is best effort: an unknown language or a failing formatter
//! leaves the block exactly as it was.
//!
//! ```rust,ignore
//! let mut formatters = EmbeddedFormatters::new();
//! formatters.register("json", Box::new(JsonFormatter));
//!
//! let format = QuartoFormat::default().with_embedded(formatters);
//! ```

use crate::error::EmbedError;
use std::collections::HashMap;

/// Formats the body of a fenced code block.
pub trait EmbeddedFormatter: Send + Sync {
    /// Return the formatted body of `code`, written in `language`.
    fn format(&self, code: &str, language: &str) -> Result<String, EmbedError>;
}

impl<F> EmbeddedFormatter for F
where
    F: Fn(&str, &str) -> Result<String, EmbedError> + Send + Sync,
{
    fn format(&self, code: &str, language: &str) -> Result<String, EmbedError> {
        self(code, language)
    }
}

/// Formatters keyed by language tag. Tags are matched case-insensitively.
#[derive(Default)]
pub struct EmbeddedFormatters {
    formatters: HashMap<String, Box<dyn EmbeddedFormatter>>,
}

impl EmbeddedFormatters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `formatter` for `language`, replacing any previous one.
    pub fn register(&mut self, language: &str, formatter: Box<dyn EmbeddedFormatter>) {
        self.formatters
            .insert(language.to_ascii_lowercase(), formatter);
    }

    pub fn get(&self, language: &str) -> Option<&dyn EmbeddedFormatter> {
        self.formatters
            .get(&language.to_ascii_lowercase())
            .map(|formatter| formatter.as_ref())
    }

    pub fn has(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    /// Registered language tags (sorted).
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<_> = self.formatters.keys().cloned().collect();
        languages.sort();
        languages
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Format `code` when a formatter for `language` exists.
    ///
    /// `None` means the caller should keep the code unchanged: no formatter is registered, or the
    /// formatter failed (the failure is logged).
    pub fn apply(&self, code: &str, language: &str) -> Option<String> {
        let formatter = self.get(language)?;
        match formatter.format(code, language) {
            Ok(formatted) => Some(formatted),
            Err(err) => {
                tracing::warn!(language, error = %err, "embedded formatter failed, keeping code");
                None
            }
        }
    }
}

impl std::fmt::Debug for EmbeddedFormatters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFormatters")
            .field("languages", &self.languages())
            .finish()
    }
}
