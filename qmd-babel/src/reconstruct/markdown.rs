//! Default serialization of plain markdown runs
//!
//! Runs are copied as read unless normalization is requested, in which case comrak parses the run
//! and writes it back with its CommonMark writer.

use crate::options::GrammarExtensions;
use comrak::{format_commonmark, parse_document, Arena, ComrakOptions};

/// Re-render `text` through comrak. `None` if the writer fails.
pub fn normalize(text: &str, extensions: &GrammarExtensions) -> Option<String> {
    let arena = Arena::new();
    let options = comrak_options(extensions);
    let root = parse_document(&arena, text, &options);

    let mut output = Vec::new();
    if let Err(err) = format_commonmark(root, &options, &mut output) {
        tracing::warn!(error = %err, "comrak could not write markdown run, keeping it verbatim");
        return None;
    }
    match String::from_utf8(output) {
        Ok(markdown) => Some(markdown.trim_end_matches('\n').to_string()),
        Err(err) => {
            tracing::warn!(error = %err, "comrak wrote invalid UTF-8, keeping run verbatim");
            None
        }
    }
}

fn comrak_options(extensions: &GrammarExtensions) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = extensions.table;
    options.extension.strikethrough = extensions.strikethrough;
    options.extension.footnotes = extensions.footnotes;
    options.extension.description_lists = extensions.description_lists;
    options.extension.math_dollars = extensions.math;
    options
}
