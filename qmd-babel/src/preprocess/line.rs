//! Recognition of Pandoc source lines
//!
//! Each line is classified once, in the order the pre-processor tries the constructs: math
//! fences, single-line math, shortcodes, then fenced divs. The patterns are anchored at both ends
//! so a construct only matches when it owns the whole line.

use once_cell::sync::Lazy;
use regex::Regex;

static MATH_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\$[ \t]*(?:\{([^}]*)\})?[ \t]*$").expect("valid math fence regex")
});

static INLINE_MATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\$(.+?)\$\$[ \t]*(?:\{([^}]*)\})?[ \t]*$").expect("valid inline math regex")
});

static SHORTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([ \t]*)\{\{<[ \t]*(.+?)[ \t]*>\}\}([ \t]*)$").expect("valid shortcode regex")
});

static DIV_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:{3,}[ \t]*([A-Za-z][\w-]*)?[ \t]*(?:\{([^}]*)\})?[ \t]*:*[ \t]*$")
        .expect("valid div opener regex")
});

static DIV_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:{3,}[ \t]*$").expect("valid div closer regex"));

/// Indentation at which a line becomes indented code.
const CODE_INDENT: usize = 4;

/// A Pandoc source line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLine<'a> {
    /// `$$`, optionally carrying a label group (only meaningful when closing).
    MathFence { attributes: Option<&'a str> },
    /// `$$ content $$ {attrs}` on one line.
    InlineMath {
        content: &'a str,
        attributes: Option<&'a str>,
    },
    /// A line holding only `{{< raw >}}`.
    Shortcode {
        indent: &'a str,
        raw: &'a str,
        trailing: &'a str,
    },
    /// `::: name {attrs}`; at least one of the two is present.
    DivOpen {
        name: Option<&'a str>,
        attributes: Option<&'a str>,
    },
    /// A colon-only line.
    DivClose,
    Other,
}

impl<'a> SourceLine<'a> {
    /// Classify `line`. Math lines are only recognized with `math`, shortcodes with `shortcodes`.
    pub fn classify(line: &'a str, math: bool, shortcodes: bool) -> Self {
        if math {
            if let Some(caps) = MATH_FENCE.captures(line) {
                return SourceLine::MathFence {
                    attributes: caps.get(1).map(|m| m.as_str()),
                };
            }
            if let Some(caps) = INLINE_MATH.captures(line) {
                if let Some(content) = caps.get(1).filter(|m| !m.as_str().trim().is_empty()) {
                    return SourceLine::InlineMath {
                        content: content.as_str().trim(),
                        attributes: caps.get(2).map(|m| m.as_str()),
                    };
                }
            }
        }

        if shortcodes {
            if let Some(shortcode) = classify_shortcode(line) {
                return shortcode;
            }
        }

        if DIV_CLOSE.is_match(line) {
            return SourceLine::DivClose;
        }
        if let Some(caps) = DIV_OPEN.captures(line) {
            let name = caps.get(1).map(|m| m.as_str());
            let attributes = caps.get(2).map(|m| m.as_str());
            if name.is_some() || attributes.is_some() {
                return SourceLine::DivOpen { name, attributes };
            }
        }

        SourceLine::Other
    }
}

fn classify_shortcode(line: &str) -> Option<SourceLine<'_>> {
    let caps = SHORTCODE.captures(line)?;
    let indent = caps.get(1)?.as_str();
    let raw = caps.get(2)?.as_str();
    let trailing = caps.get(3)?.as_str();
    if indent.contains('\t')
        || indent.len() >= CODE_INDENT
        || raw.trim().is_empty()
        || raw.contains(">}}")
    {
        return None;
    }
    Some(SourceLine::Shortcode {
        indent,
        raw,
        trailing,
    })
}
