//! Style toggle engine: apply, remove and query inline styles.
//!
//! One algorithm serves every inline kind (emphasis, underline, strikethrough,
//! color, heading size, alignment, link). What differs per kind is captured by
//! [`StyleTarget`] (which spans an operation matches) and
//! [`StyleKind::preserves_remainder`] (whether a partial removal restores the
//! untouched ends).
//!
//! # Examples
//!
//! ```
//! use quillspan::{Emphasis, Payload, SpannedText, StyleTarget};
//!
//! let mut text = SpannedText::with_text("0123456789");
//! let bold = StyleTarget::Emphasis(Emphasis::Bold);
//!
//! text.apply_style(Payload::Emphasis(Emphasis::Bold), 0..10);
//! text.remove_style(bold, 3..7);
//!
//! assert!(text.contains_style(bold, 0..3));
//! assert!(!text.contains_style(bold, 3..7));
//! assert!(text.contains_style(bold, 7..10));
//! ```

use crate::style::{Emphasis, Payload, StyleKind};
use crate::text::buffer::SpannedText;
use crate::text::interval::Interval;
use crate::text::span::Span;
use std::ops::Range;

/// Which spans a toggle operation acts on.
///
/// Emphasis is value-specific: removing bold leaves italic alone. Every other
/// kind is payload-blind, so removing color strips any color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// Emphasis spans carrying exactly this value.
    Emphasis(Emphasis),
    /// Any span of this kind.
    Kind(StyleKind),
}

impl StyleTarget {
    /// Target matching spans like `payload` under the per-kind policy.
    #[must_use]
    pub const fn for_payload(payload: &Payload) -> Self {
        match payload {
            Payload::Emphasis(e) => Self::Emphasis(*e),
            other => Self::Kind(other.kind()),
        }
    }

    #[must_use]
    pub const fn kind(self) -> StyleKind {
        match self {
            Self::Emphasis(_) => StyleKind::Emphasis,
            Self::Kind(kind) => kind,
        }
    }

    /// Check whether a span is affected by this target.
    #[must_use]
    pub fn matches(self, span: &Span) -> bool {
        match self {
            Self::Emphasis(e) => span.payload.emphasis() == Some(e),
            Self::Kind(kind) => span.kind() == kind,
        }
    }
}

impl From<StyleKind> for StyleTarget {
    fn from(kind: StyleKind) -> Self {
        Self::Kind(kind)
    }
}

impl SpannedText {
    /// Style `range` with `payload`.
    ///
    /// Empty or inverted ranges are ignored. Adjacent or overlapping spans with
    /// the same payload are not merged; queries treat any covered character as
    /// styled.
    pub fn apply_style(&mut self, payload: Payload, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        tracing::trace!(kind = ?payload.kind(), start = range.start, end = range.end, "apply style");
        self.add_span(range, payload);
    }

    /// Remove `target` from `range`, punching a hole in partially covered spans.
    ///
    /// Every matching span that intersects `range` is detached. For kinds that
    /// preserve remainders, the parts of each detached span lying before and
    /// after `range` are re-applied with that span's own payload. Links are
    /// removed whole.
    pub fn remove_style(&mut self, target: StyleTarget, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }

        let removed: Vec<Interval<Payload>> = self
            .take_spans_where(|span| target.matches(span) && span.overlaps(&range))
            .into_iter()
            .map(|span| Interval::new(span.range.start, span.range.end, span.payload))
            .collect();
        tracing::trace!(
            kind = ?target.kind(),
            start = range.start,
            end = range.end,
            removed = removed.len(),
            "remove style"
        );

        if !target.kind().preserves_remainder() {
            return;
        }

        for part in removed {
            if !part.is_valid() {
                continue;
            }
            if part.start < range.start {
                self.apply_style(part.value.clone(), part.start..range.start);
            }
            if part.end > range.end {
                self.apply_style(part.value, range.end..part.end);
            }
        }
    }

    /// Check whether every character of `range` carries `target`.
    ///
    /// An empty range is a cursor: it counts as styled only when the characters
    /// on both sides of it are styled, so a cursor at either end of the text is
    /// never styled. Ranges reaching past the text are never styled.
    #[must_use]
    pub fn contains_style(&self, target: StyleTarget, range: Range<usize>) -> bool {
        let len = self.len_chars();
        if range.start > range.end || range.end > len {
            return false;
        }

        if range.start == range.end {
            let cursor = range.start;
            if cursor == 0 || cursor + 1 > len {
                return false;
            }
            return self.is_styled_at(target, cursor - 1) && self.is_styled_at(target, cursor);
        }

        let covered: String = self
            .rope()
            .slice(range.clone())
            .chars()
            .enumerate()
            .filter(|&(i, _)| self.is_styled_at(target, range.start + i))
            .map(|(_, ch)| ch)
            .collect();

        covered == self.slice(range)
    }

    fn is_styled_at(&self, target: StyleTarget, pos: usize) -> bool {
        self.spans_in_range(pos..pos + 1)
            .any(|span| target.matches(span))
    }
}
