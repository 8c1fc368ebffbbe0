//! Typed spans over a text buffer.

use crate::style::{Payload, StyleKind};
use std::ops::Range;

/// A payload-carrying annotation over a `[start, end)` character range.
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    /// Character range in the buffer.
    pub range: Range<usize>,
    /// Kind-specific data; also determines the span's kind.
    pub payload: Payload,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub fn new(range: Range<usize>, payload: Payload) -> Self {
        Self { range, payload }
    }

    #[must_use]
    pub const fn kind(&self) -> StyleKind {
        self.payload.kind()
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.range.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.range.end
    }

    /// Check if this span overlaps a range (touching ends do not count).
    ///
    /// An empty range overlaps nothing, even strictly inside the span.
    #[must_use]
    pub const fn overlaps(&self, range: &Range<usize>) -> bool {
        range.start < range.end && self.range.start < range.end && range.start < self.range.end
    }

    /// Get the length in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }
}
