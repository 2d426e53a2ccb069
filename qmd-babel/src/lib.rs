//! Pandoc and Quarto markdown formatting through a directive grammar
//!
//!     This crate normalizes Pandoc-flavored markdown (fenced divs, labeled math, Quarto
//!     shortcodes) by translating it into a generic directive grammar, reading that into a tree,
//!     and writing idiomatic Pandoc syntax back out. Formatting is idempotent: formatting the
//!     output again yields the same text.
//!
//!     This is a pure lib: no code here assumes a shell environment, prints, or reads env vars.
//!     Logging goes through `tracing`; installing a subscriber is the caller's business.
//!
//! Architecture
//!
//!     source ──preprocess──▶ directive text ──tree::parse──▶ Document ──reconstruct──▶ Pandoc text
//!
//!     The file structure :
//!     .
//!     ├── attributes.rs           # {#id .class key="value"} model and ordering policies
//!     ├── fence.rs                # Fence strengths for nested containers
//!     ├── scan.rs                 # Code / comment / front matter regions (comrak)
//!     ├── syntax.rs               # Directive line grammar, both directions
//!     ├── preprocess              # Pandoc → directive text
//!     ├── tree                    # Directive text → Document
//!     ├── constructs.rs           # Typed views: MathBlock, Shortcode, DivBlock
//!     ├── reconstruct             # Document → Pandoc text, handler table
//!     ├── embedded.rs             # Formatters for fenced code
//!     ├── transcoder.rs           # The pipeline
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats
//!         ├── pandoc.rs
//!         └── quarto.rs
//!
//! Testing
//!     tests
//!     └── <dialect>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod (see tests/lib.rs).
//!
//! Core Algorithms
//!
//!     The pre-processor is a single forward line scan with two states (normal, inside a `$$`
//!     block) and a fence tracker stack. Divs nested inside divs get shorter fences (5, 4, then 3)
//!     so the reader pairs every closer with the right opener. The reader is a stack-based
//!     flat-to-nested pass over the directive lines. Both passes ask comrak where code blocks,
//!     HTML comments and front matter are, and never rewrite lines inside them.

pub mod attributes;
pub mod constructs;
pub mod embedded;
pub mod error;
pub mod fence;
pub mod format;
pub mod formats;
pub mod options;
pub mod preprocess;
pub mod reconstruct;
pub mod registry;
pub mod scan;
pub mod syntax;
pub mod transcoder;
pub mod tree;

pub use attributes::{Attributes, DivAttributeOrder, MathAttributeOrder};
pub use embedded::{EmbeddedFormatter, EmbeddedFormatters};
pub use error::{EmbedError, FormatError, ParseError};
pub use format::Format;
pub use formats::{PandocFormat, QuartoFormat};
pub use options::{Dialect, FormatOptions, GrammarExtensions};
pub use preprocess::{preprocess, Preprocessed, PreprocessWarning};
pub use reconstruct::HandlerTable;
pub use registry::FormatRegistry;
pub use transcoder::Transcoder;
pub use tree::Document;

/// Format `source` as the given dialect with default options.
pub fn format_source(source: &str, dialect: Dialect) -> Result<String, FormatError> {
    Transcoder::new(FormatOptions::for_dialect(dialect)).format(source)
}
