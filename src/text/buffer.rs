//! Attributed text buffer.
//!
//! This module provides [`SpannedText`], a rope-backed character buffer that
//! owns an unordered collection of typed [`Span`]s. The buffer is the text
//! editing collaborator of the span engines: it shifts span offsets when text
//! is inserted or deleted, so spans always reference live positions.
//!
//! Offsets are character offsets. Spans are exclusive at both ends: text
//! inserted at a span's start lands before it, text inserted at its end lands
//! after it, and only text inserted strictly inside grows it. Spans that
//! collapse to nothing after a deletion are dropped.

use crate::style::{Payload, StyleKind};
use crate::text::interval::Interval;
use crate::text::rope::RopeWrapper;
use crate::text::span::Span;
use std::ops::Range;

/// Text plus the spans annotating it.
///
/// Equality compares the text and the spans as a multiset, so two buffers
/// holding the same spans in a different order are equal.
#[derive(Clone, Debug, Default)]
pub struct SpannedText {
    rope: RopeWrapper,
    spans: Vec<Span>,
    revision: u64,
}

impl SpannedText {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text and no spans.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            spans: Vec::new(),
            revision: 0,
        }
    }

    /// Builder-style span insertion, for constructing fixtures and parser output.
    #[must_use]
    pub fn with_span(mut self, range: Range<usize>, payload: Payload) -> Self {
        self.add_span(range, payload);
        self
    }

    /// Get the full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Character at `idx`, if in bounds.
    #[must_use]
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.rope.char(idx)
    }

    /// Text of a character range, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(range).to_string()
    }

    /// Get the underlying rope.
    #[must_use]
    pub fn rope(&self) -> &RopeWrapper {
        &self.rope
    }

    /// Get the buffer revision (increments on every text or span change).
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All spans, in no particular order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Spans overlapping a range. Spans merely touching it are excluded.
    pub fn spans_in_range(&self, range: Range<usize>) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.overlaps(&range))
    }

    /// Spans of one kind.
    pub fn spans_of_kind(&self, kind: StyleKind) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.kind() == kind)
    }

    /// Attach a span. The range is clamped to the text; empty results are ignored.
    ///
    /// Returns whether a span was added.
    pub fn add_span(&mut self, range: Range<usize>, payload: Payload) -> bool {
        let end = range.end.min(self.len_chars());
        if range.start >= end {
            return false;
        }
        self.spans.push(Span::new(range.start..end, payload));
        self.bump_revision();
        true
    }

    /// Detach every span matching `pred`, returning them.
    pub fn take_spans_where<F>(&mut self, mut pred: F) -> Vec<Span>
    where
        F: FnMut(&Span) -> bool,
    {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if pred(&span) {
                taken.push(span);
            } else {
                kept.push(span);
            }
        }
        self.spans = kept;
        if !taken.is_empty() {
            self.bump_revision();
        }
        taken
    }

    /// Drop every span, keeping the text.
    pub fn clear_spans(&mut self) {
        if !self.spans.is_empty() {
            self.spans.clear();
            self.bump_revision();
        }
    }

    /// Replace the text, clearing all spans.
    pub fn set_text(&mut self, text: &str) {
        self.rope.replace(text);
        self.spans.clear();
        self.bump_revision();
    }

    /// Insert text at a character offset, shifting spans.
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.len_chars());
        let inserted = text.chars().count();
        if inserted == 0 {
            return;
        }
        self.rope.insert(offset, text);

        for span in &mut self.spans {
            if offset <= span.range.start {
                span.range.start += inserted;
                span.range.end += inserted;
            } else if offset < span.range.end {
                span.range.end += inserted;
            }
        }
        self.bump_revision();
    }

    /// Insert another spanned text at `offset`, carrying its spans along.
    pub fn insert_spanned(&mut self, offset: usize, other: &Self) {
        let offset = offset.min(self.len_chars());
        self.insert(offset, &other.text());
        for span in &other.spans {
            self.spans.push(Span::new(
                span.range.start + offset..span.range.end + offset,
                span.payload.clone(),
            ));
        }
    }

    /// Delete a character range, collapsing spans and dropping empty ones.
    pub fn delete(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        if start == end {
            return;
        }
        self.rope.remove(start..end);

        let removed = end - start;
        let map = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= end {
                pos - removed
            } else {
                start
            }
        };
        for span in &mut self.spans {
            span.range = map(span.range.start)..map(span.range.end);
        }
        self.spans.retain(|span| !span.is_empty());
        self.bump_revision();
    }

    /// Replace a character range with new text.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let start = range.start.min(self.len_chars());
        self.delete(start..range.end);
        self.insert(start, text);
    }

    /// Partition the text on `\n` into line intervals.
    ///
    /// Line `i` spans from the end of the previous newline to the next one (or
    /// the buffer bounds); the newline itself belongs to no line. A trailing
    /// newline yields a final empty line.
    #[must_use]
    pub fn line_intervals(&self) -> Vec<Interval> {
        let mut lines = Vec::new();
        let mut line_start = 0;
        for (idx, ch) in self.rope.inner().chars().enumerate() {
            if ch == '\n' {
                lines.push(Interval::bare(line_start, idx));
                line_start = idx + 1;
            }
        }
        lines.push(Interval::bare(line_start, self.len_chars()));
        lines
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl PartialEq for SpannedText {
    fn eq(&self, other: &Self) -> bool {
        if self.spans.len() != other.spans.len() || self.rope != other.rope {
            return false;
        }

        let mut matched = vec![false; other.spans.len()];
        self.spans.iter().all(|span| {
            let found = other
                .spans
                .iter()
                .enumerate()
                .position(|(idx, candidate)| !matched[idx] && candidate == span);
            found.is_some_and(|idx| {
                matched[idx] = true;
                true
            })
        })
    }
}

impl From<&str> for SpannedText {
    fn from(text: &str) -> Self {
        Self::with_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::style::Emphasis;

    const BOLD: Payload = Payload::Emphasis(Emphasis::Bold);

    #[test]
    fn test_buffer_basic() {
        let buffer = SpannedText::with_text("Hello, world!");
        assert_eq!(buffer.len_chars(), 13);
        assert_eq!(buffer.slice(7..12), "world");
        assert_eq!(buffer.char_at(0), Some('H'));
    }

    #[test]
    fn test_add_span_clamps_and_rejects_empty() {
        let mut buffer = SpannedText::with_text("abc");
        assert!(!buffer.add_span(2..2, BOLD));
        assert!(!buffer.add_span(3..1, BOLD));
        assert!(buffer.add_span(1..10, BOLD));
        assert_eq!(buffer.spans()[0].range, 1..3);
    }

    #[test]
    fn test_empty_range_matches_no_span() {
        let buffer = SpannedText::with_text("0123456789").with_span(0..10, BOLD);
        assert_eq!(buffer.spans_in_range(3..3).count(), 0);
        assert_eq!(buffer.spans_in_range(0..0).count(), 0);
        assert_eq!(buffer.spans_in_range(3..4).count(), 1);
    }

    #[test]
    fn test_insert_is_exclusive_at_both_ends() {
        let mut buffer = SpannedText::with_text("abcdef").with_span(2..4, BOLD);

        buffer.insert(2, "X"); // at start: span moves right
        assert_eq!(buffer.spans()[0].range, 3..5);

        buffer.insert(5, "Y"); // at end: span unchanged
        assert_eq!(buffer.spans()[0].range, 3..5);

        buffer.insert(4, "Z"); // inside: span grows
        assert_eq!(buffer.spans()[0].range, 3..6);
        assert_eq!(buffer.text(), "abXcZdYef");
    }

    #[test]
    fn test_delete_collapses_and_drops() {
        let mut buffer = SpannedText::with_text("0123456789")
            .with_span(2..5, BOLD)
            .with_span(6..8, Payload::Underline);

        buffer.delete(4..7);
        assert_eq!(buffer.text(), "0123789");
        let ranges: Vec<_> = buffer.spans().iter().map(|s| s.range.clone()).collect();
        assert_eq!(ranges, vec![2..4, 4..5]);

        buffer.delete(1..6);
        assert_eq!(buffer.text(), "09");
        assert!(buffer.spans().is_empty());
    }

    #[test]
    fn test_replace_range() {
        let mut buffer = SpannedText::with_text("hello world").with_span(6..11, BOLD);
        buffer.replace_range(0..5, "bye");
        assert_eq!(buffer.text(), "bye world");
        assert_eq!(buffer.spans()[0].range, 4..9);
    }

    #[test]
    fn test_line_intervals() {
        let buffer = SpannedText::with_text("ab\n\ncde\n");
        let lines: Vec<_> = buffer
            .line_intervals()
            .iter()
            .map(Interval::range)
            .collect();
        assert_eq!(lines, vec![0..2, 3..3, 4..7, 8..8]);
    }

    #[test]
    fn test_equality_ignores_span_order() {
        let a = SpannedText::with_text("abc")
            .with_span(0..1, BOLD)
            .with_span(1..2, Payload::Color(Rgba::RED));
        let b = SpannedText::with_text("abc")
            .with_span(1..2, Payload::Color(Rgba::RED))
            .with_span(0..1, BOLD);
        let c = SpannedText::with_text("abc")
            .with_span(1..2, Payload::Color(Rgba::BLUE))
            .with_span(0..1, BOLD);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, SpannedText::with_text("abc"));
    }

    #[test]
    fn test_take_spans_where() {
        let mut buffer = SpannedText::with_text("abcdef")
            .with_span(0..2, BOLD)
            .with_span(2..4, Payload::Underline);
        let taken = buffer.take_spans_where(|s| s.kind() == StyleKind::Underline);
        assert_eq!(taken.len(), 1);
        assert_eq!(buffer.spans().len(), 1);
        assert_eq!(buffer.spans_of_kind(StyleKind::Emphasis).count(), 1);
    }

    #[test]
    fn test_insert_spanned_offsets_spans() {
        let mut buffer = SpannedText::with_text("ab");
        let piece = SpannedText::with_text("XY").with_span(0..1, BOLD);
        buffer.insert_spanned(1, &piece);
        assert_eq!(buffer.text(), "aXYb");
        assert_eq!(buffer.spans()[0].range, 1..2);
    }
}
