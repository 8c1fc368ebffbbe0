//! Block span engine: bullet and quote styles over whole lines.
//!
//! Block kinds never cover part of a line. The text is partitioned on `\n`
//! and each line is styled, unstyled or queried as a unit. A line takes part
//! in an operation only when the selection lies inside it or it lies inside
//! the selection; a line the selection only partially overlaps is skipped.
//! Empty lines are never styled.

use crate::style::{Payload, StyleKind};
use crate::text::buffer::SpannedText;
use crate::text::interval::Interval;
use std::ops::Range;

impl SpannedText {
    /// Give every eligible line a block span, skipping lines that already have one.
    pub fn apply_block(&mut self, payload: Payload, selection: Range<usize>) {
        let kind = payload.kind();
        debug_assert!(kind.is_block(), "apply_block called with {kind:?}");

        for line in self.eligible_lines(&selection) {
            if self.line_has_block(kind, &line) {
                continue;
            }
            tracing::trace!(?kind, start = line.start, end = line.end, "apply block");
            self.add_span(line.range(), payload.clone());
        }
    }

    /// Strip block spans of `kind` from every eligible line that has one.
    pub fn remove_block(&mut self, kind: StyleKind, selection: Range<usize>) {
        for line in self.eligible_lines(&selection) {
            if !self.line_has_block(kind, &line) {
                continue;
            }
            let range = line.range();
            let removed = self.take_spans_where(|span| span.kind() == kind && span.overlaps(&range));
            tracing::trace!(?kind, start = line.start, end = line.end, removed = removed.len(), "remove block");
        }
    }

    /// Check whether every eligible line carries a block span of `kind`.
    ///
    /// A selection touching lines with mixed styling answers `false`. With no
    /// eligible line at all the answer is vacuously `true`.
    #[must_use]
    pub fn contains_block(&self, kind: StyleKind, selection: Range<usize>) -> bool {
        self.eligible_lines(&selection)
            .iter()
            .all(|line| self.line_has_block(kind, line))
    }

    /// Check whether line `index` carries a block span of `kind`.
    #[must_use]
    pub fn line_index_has_block(&self, kind: StyleKind, index: usize) -> bool {
        self.line_intervals()
            .get(index)
            .is_some_and(|line| self.line_has_block(kind, line))
    }

    fn line_has_block(&self, kind: StyleKind, line: &Interval) -> bool {
        line.is_valid() && self.spans_in_range(line.range()).any(|span| span.kind() == kind)
    }

    fn eligible_lines(&self, selection: &Range<usize>) -> Vec<Interval> {
        self.line_intervals()
            .into_iter()
            .filter(|line| line.is_valid() && (line.encloses(selection) || line.within(selection)))
            .collect()
    }
}
