//! Quarto dialect tests
//!
//! Shortcodes, and whole documents mixing every construct.

mod documents;
mod shortcodes;
