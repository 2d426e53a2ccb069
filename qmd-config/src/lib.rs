//! Shared configuration loader for the qmd formatter.
//!
//! `defaults/qmd.default.toml` is embedded so that docs and runtime behavior stay in sync.
//! Applications layer user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`QmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use qmd_babel::options::{Dialect, FormatOptions, GrammarExtensions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/qmd.default.toml");

/// Top-level configuration consumed by qmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QmdConfig {
    pub formatting: FormattingConfig,
    pub embedded: EmbeddedConfig,
}

/// Formatting-related configuration groups.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub dialect: Dialect,
    pub normalize_markdown: bool,
    pub extensions: ExtensionsConfig,
}

/// Grammar extensions enabled when reading directive text.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionsConfig {
    pub math: bool,
    pub front_matter: bool,
    pub table: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub description_lists: bool,
}

impl From<&ExtensionsConfig> for GrammarExtensions {
    fn from(config: &ExtensionsConfig) -> Self {
        GrammarExtensions {
            math: config.math,
            front_matter: config.front_matter,
            table: config.table,
            strikethrough: config.strikethrough,
            footnotes: config.footnotes,
            description_lists: config.description_lists,
        }
    }
}

/// Embedded code formatting.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedConfig {
    pub enabled: bool,
}

impl From<&QmdConfig> for FormatOptions {
    fn from(config: &QmdConfig) -> Self {
        FormatOptions {
            dialect: config.formatting.dialect,
            extensions: (&config.formatting.extensions).into(),
            normalize_markdown: config.formatting.normalize_markdown,
            embedded: config.embedded.enabled,
        }
    }
}

impl From<QmdConfig> for FormatOptions {
    fn from(config: QmdConfig) -> Self {
        (&config).into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (e.g. `formatting.dialect = "pandoc"`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<QmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QmdConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.formatting.dialect, Dialect::Quarto);
        assert!(!config.formatting.normalize_markdown);
        assert!(config.formatting.extensions.math);
        assert!(config.embedded.enabled);
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        let options: FormatOptions = config.into();
        assert_eq!(options, FormatOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("formatting.dialect", "pandoc")
            .expect("override to apply")
            .set_override("formatting.extensions.math", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = FormatOptions::from(&config);
        assert_eq!(options.dialect, Dialect::Pandoc);
        assert!(!options.extensions.math);
        assert!(options.extensions.table);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/qmd.toml")
            .build()
            .expect("config to build");
        assert!(config.embedded.enabled);
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("/nonexistent/qmd.toml").build().is_err());
    }

    #[test]
    fn rejects_unknown_dialect() {
        let result = Loader::new()
            .set_override("formatting.dialect", "commonmark")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
