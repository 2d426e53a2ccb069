//! Pandoc → directive pre-processor
//!
//! A single forward pass that rewrites the Pandoc constructs the directive reader cannot see
//! into directive lines:
//!
//! | Pandoc source                      | Directive text                         |
//! |------------------------------------|----------------------------------------|
//! | `::: {.note}` ... `:::`            | `:::::div{.note}` ... `:::::`          |
//! | `::: warning {#w}` ... `:::`       | `:::::warning{#w}` ... `:::::`         |
//! | `$$` ... `$$ {#eq:a}`              | `:::::math{#eq:a}` ... `:::::`         |
//! | `$$ E=mc^2 $$ {#eq:b}`             | `::math[E=mc^2]{#eq:b}`                |
//! | `{{< meta title >}}` (Quarto only) | `::shortcode{raw="meta title"}`        |
//!
//! Fence strengths come from a [`FenceTracker`], so a block opened inside another gets a shorter
//! fence and the reader can never pair an outer closer with an inner opener.
//!
//! # States
//!
//! The scanner is either in `Normal` state or buffering a multi-line math block. While buffering,
//! lines are collected verbatim until the closing `$$`; nothing else is recognized. In `Normal`
//! state, lines that comrak places inside code, HTML comments or front matter are copied
//! untouched.
//!
//! Lines that must stay text but would read as directive markup (a colon-only line inside a math
//! body, a `::name` line in the source) are written with a leading backslash, which the reader
//! removes again. See [`syntax::escape_literal`].
//!
//! # Degraded input
//!
//! Nothing here fails. Unusual input is copied through and reported as a
//! [`PreprocessWarning`]:
//!
//! - a closer with no open div is copied unchanged;
//! - a math block still open at end of input is flushed verbatim with its opening `$$`, and its
//!   lines are scanned again as ordinary lines;
//! - a fenced code block running to end of input inside an open div is closed before the div;
//! - divs still open at end of input are closed there;
//! - nesting deeper than three levels reuses the minimum fence strength.

pub mod line;

use crate::attributes::{Attributes, DirectiveAttributeOrder};
use crate::fence::{FenceStrength, FenceTracker};
use crate::options::FormatOptions;
use crate::scan::{scan, Regions};
use crate::syntax;
use line::SourceLine;
use std::fmt;

/// Directive name given to fenced divs written without one.
pub const DEFAULT_DIV_NAME: &str = "div";

/// Result of pre-processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub text: String,
    pub warnings: Vec<PreprocessWarning>,
}

/// A boundary condition met while pre-processing. Lines are 1-based source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreprocessWarning {
    /// A colon-only line with no open div; copied unchanged.
    UnbalancedCloser { line: usize },
    /// A `$$` block never closed; flushed verbatim.
    UnclosedMath { line: usize },
    /// A div never closed; closed at end of input.
    UnclosedDiv { line: usize },
    /// A fenced code block inside a div runs to end of input; closed before the div.
    UnclosedCode { line: usize },
    /// A block opened at `depth` reuses the minimum fence strength of its parent.
    SharedFenceStrength { line: usize, depth: usize },
}

impl fmt::Display for PreprocessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessWarning::UnbalancedCloser { line } => {
                write!(f, "line {line}: closing fence without an open div")
            }
            PreprocessWarning::UnclosedMath { line } => {
                write!(f, "line {line}: math block is never closed")
            }
            PreprocessWarning::UnclosedDiv { line } => {
                write!(f, "line {line}: div is never closed")
            }
            PreprocessWarning::UnclosedCode { line } => {
                write!(f, "line {line}: code block inside a div is never closed")
            }
            PreprocessWarning::SharedFenceStrength { line, depth } => write!(
                f,
                "line {line}: block nested {depth} levels deep shares its parent's fence strength"
            ),
        }
    }
}

/// Rewrite Pandoc source into directive text.
pub fn preprocess(text: &str, options: &FormatOptions) -> Preprocessed {
    let mut scanner = Scanner::new(options, scan(text, options.extensions.front_matter));
    for (index, line) in text.split('\n').enumerate() {
        scanner.feed(index + 1, line);
    }

    let result = scanner.finish();
    tracing::debug!(
        dialect = %options.dialect,
        warnings = result.warnings.len(),
        "pre-processed document"
    );
    result
}

/// Lines of a `$$` block seen so far.
struct MathBuffer<'t> {
    opener: &'t str,
    line: usize,
    lines: Vec<&'t str>,
}

struct Scanner<'t> {
    regions: Regions,
    math_enabled: bool,
    shortcodes: bool,
    tracker: FenceTracker,
    /// Source lines of the currently open divs, innermost last.
    openers: Vec<usize>,
    math: Option<MathBuffer<'t>>,
    output: Vec<String>,
    warnings: Vec<PreprocessWarning>,
}

impl<'t> Scanner<'t> {
    fn new(options: &FormatOptions, regions: Regions) -> Self {
        Self {
            regions,
            math_enabled: options.extensions.math,
            shortcodes: options.dialect.shortcodes(),
            tracker: FenceTracker::new(),
            openers: Vec::new(),
            math: None,
            output: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Handle 1-based source line `number`.
    fn feed(&mut self, number: usize, line: &'t str) {
        if self.math.is_none() && self.regions.is_opaque(number - 1) {
            self.output.push(line.to_string());
            return;
        }
        self.line(number, line);
    }

    fn line(&mut self, number: usize, line: &'t str) {
        let classified = SourceLine::classify(line, self.math_enabled, self.shortcodes);

        if self.math.is_some() {
            match classified {
                SourceLine::MathFence { attributes } => {
                    if let Some(math) = self.math.take() {
                        self.emit_math(math, attributes.unwrap_or(""));
                    }
                }
                _ => {
                    if let Some(math) = self.math.as_mut() {
                        math.lines.push(line);
                    }
                }
            }
            return;
        }

        match classified {
            SourceLine::MathFence { attributes: None } => {
                self.math = Some(MathBuffer {
                    opener: line,
                    line: number,
                    lines: Vec::new(),
                });
            }
            SourceLine::MathFence { attributes: Some(_) } | SourceLine::Other => {
                self.output.push(syntax::escape_literal(line).into_owned())
            }
            SourceLine::InlineMath {
                content,
                attributes,
            } => {
                tracing::trace!(line = number, "single-line math");
                self.output.push(syntax::leaf(
                    "math",
                    Some(content),
                    &normalize_attributes(attributes.unwrap_or("")),
                ));
            }
            SourceLine::Shortcode {
                indent,
                raw,
                trailing,
            } => {
                tracing::trace!(line = number, raw, "shortcode");
                self.output.push(format!(
                    "{indent}{}{trailing}",
                    syntax::leaf_with_value("shortcode", "raw", raw)
                ));
            }
            SourceLine::DivOpen { name, attributes } => {
                let strength = self.open(number);
                self.openers.push(number);
                let name = name.unwrap_or(DEFAULT_DIV_NAME);
                tracing::trace!(line = number, name, strength = strength.colons(), "div opened");
                self.output.push(syntax::container_open(
                    strength,
                    name,
                    &normalize_attributes(attributes.unwrap_or("")),
                ));
            }
            SourceLine::DivClose => match self.tracker.close() {
                Ok(strength) => {
                    self.openers.pop();
                    self.output.push(strength.fence());
                }
                Err(_) => {
                    self.warn(PreprocessWarning::UnbalancedCloser { line: number });
                    self.output.push(line.to_string());
                }
            },
        }
    }

    /// Open a block through the tracker, reporting when its strength stops being distinct.
    fn open(&mut self, number: usize) -> FenceStrength {
        if self.tracker.shares_strength() {
            self.warn(PreprocessWarning::SharedFenceStrength {
                line: number,
                depth: self.tracker.depth() + 1,
            });
        }
        self.tracker.open()
    }

    fn emit_math(&mut self, math: MathBuffer<'t>, attributes: &str) {
        let strength = self.open(math.line);
        tracing::trace!(
            line = math.line,
            lines = math.lines.len(),
            strength = strength.colons(),
            "math block"
        );
        self.output.push(syntax::container_open(
            strength,
            "math",
            &normalize_attributes(attributes),
        ));
        self.output.extend(
            math.lines
                .iter()
                .map(|line| syntax::escape_literal(line).into_owned()),
        );
        let closing = self.tracker.close().unwrap_or(strength);
        self.output.push(closing.fence());
    }

    fn warn(&mut self, warning: PreprocessWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    fn finish(mut self) -> Preprocessed {
        while let Some(math) = self.math.take() {
            self.warn(PreprocessWarning::UnclosedMath { line: math.line });
            self.output.push(math.opener.to_string());
            for (offset, line) in math.lines.into_iter().enumerate() {
                self.feed(math.line + 1 + offset, line);
            }
        }

        if !self.tracker.is_empty() {
            if let Some(code) = self.regions.unclosed_fence() {
                let (line, fence) = (code.start + 1, code.fence.clone());
                self.warn(PreprocessWarning::UnclosedCode { line });
                self.output.push(fence);
            }
        }

        while let Ok(strength) = self.tracker.close() {
            if let Some(line) = self.openers.pop() {
                self.warn(PreprocessWarning::UnclosedDiv { line });
            }
            self.output.push(strength.fence());
        }

        Preprocessed {
            text: self.output.join("\n"),
            warnings: self.warnings,
        }
    }
}

/// Attribute text as the directive reader expects it.
///
/// Groups that parse are re-rendered in directive order, which also drops Pandoc's `-` shorthand
/// in favour of `.unnumbered`. Groups that do not parse are passed on untouched so the reader
/// reports them with a position.
fn normalize_attributes(attributes: &str) -> String {
    match Attributes::parse(attributes) {
        Ok(parsed) => parsed.render(DirectiveAttributeOrder),
        Err(_) => attributes.trim().to_string(),
    }
}
