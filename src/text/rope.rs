//! Rope wrapper using the ropey crate.
//!
//! All offsets are character offsets. Out-of-range requests are clamped
//! instead of panicking, since offsets come straight from user selections.

use ropey::{Rope, RopeSlice};
use std::ops::Range;

/// Wrapper around ropey::Rope with clamping convenience methods.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create an empty rope.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Character at `idx`, if in bounds.
    #[must_use]
    pub fn char(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    /// Get a slice of the rope, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> RopeSlice<'_> {
        let len = self.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end)
    }

    /// Insert text at a character position. Positions past the end append.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Remove a range of characters, clamped to the buffer.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.remove(start..end);
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Get access to the underlying rope.
    #[must_use]
    pub fn inner(&self) -> &Rope {
        &self.rope
    }
}
