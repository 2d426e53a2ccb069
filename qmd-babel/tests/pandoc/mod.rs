//! Pandoc dialect tests
//!
//! Fenced divs, math and code opacity through the full pipeline.

mod code;
mod divs;
mod math;
