//! Fence depth tracking for nested container directives
//!
//! The directive grammar pairs an opener with the first colon-only line at least as long as the
//! opener. Nested blocks therefore get shorter fences than their parents: the outermost block
//! opens with five colons, the next with four, and everything deeper with the grammar's minimum
//! of three.
//!
//! Three nesting levels get distinct strengths. From the fourth level on, a block shares
//! strength 3 with its parent and correct pairing relies on the reader matching closers against
//! a stack. [`FenceTracker::shares_strength`] reports that boundary so callers can surface it.

/// Fence length of the outermost block.
pub const BASE_STRENGTH: usize = 5;

/// Shortest fence the directive grammar accepts.
pub const MIN_STRENGTH: usize = 3;

/// Number of nesting levels that receive a strength of their own.
pub const DISTINCT_LEVELS: usize = BASE_STRENGTH - MIN_STRENGTH + 1;

/// The colon count of a directive fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FenceStrength(usize);

impl FenceStrength {
    /// Strength assigned to a block opened at `depth` (0 = top level).
    pub fn for_depth(depth: usize) -> Self {
        FenceStrength(BASE_STRENGTH.saturating_sub(depth).max(MIN_STRENGTH))
    }

    pub fn new(colons: usize) -> Self {
        FenceStrength(colons)
    }

    pub fn colons(self) -> usize {
        self.0
    }

    /// The fence itself, e.g. `:::::`.
    pub fn fence(self) -> String {
        ":".repeat(self.0)
    }
}

/// Closing fence seen while no block was open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underflow;

/// Stack of currently open fence strengths.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Vec<FenceStrength>,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Whether the next opened block would reuse its parent's strength.
    pub fn shares_strength(&self) -> bool {
        self.depth() >= DISTINCT_LEVELS
    }

    /// Open a block at the current depth and return the strength its fences must use.
    pub fn open(&mut self) -> FenceStrength {
        let strength = FenceStrength::for_depth(self.depth());
        self.open.push(strength);
        strength
    }

    /// Close the innermost block, returning the strength its opener used.
    pub fn close(&mut self) -> Result<FenceStrength, Underflow> {
        self.open.pop().ok_or(Underflow)
    }
}
