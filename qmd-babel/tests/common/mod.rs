//! Helpers shared by the dialect tests.

use qmd_babel::format::Format;
use qmd_babel::formats::{PandocFormat, QuartoFormat};

pub fn pandoc(source: &str) -> String {
    PandocFormat::default()
        .format(source)
        .expect("pandoc source to format")
}

pub fn quarto(source: &str) -> String {
    QuartoFormat::default()
        .format(source)
        .expect("quarto source to format")
}

/// Format once, check that formatting the result changes nothing, and return it.
pub fn stable(format: &dyn Format, source: &str) -> String {
    let first = format.format(source).expect("first pass to format");
    let second = format.format(&first).expect("second pass to format");
    assert_eq!(first, second, "formatting is not idempotent for {source:?}");
    first
}
