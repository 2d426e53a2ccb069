//! Format implementations
//!
//! One format per source dialect. Both run the same pipeline (see [`crate::transcoder`]) and
//! differ in the constructs the pre-processor recognizes.

pub mod pandoc;
pub mod quarto;

pub use pandoc::PandocFormat;
pub use quarto::QuartoFormat;
