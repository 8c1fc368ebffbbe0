//! Half-open offset intervals with an attached value.

use std::ops::Range;

/// A `[start, end)` character interval carrying a value.
///
/// Construction does not check ordering; [`Interval::is_valid`] does. The span
/// engines record removed spans as intervals (value = original payload) and
/// line bounds as intervals with no value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval<V = ()> {
    pub start: usize,
    pub end: usize,
    pub value: V,
}

impl Interval<()> {
    /// Create an interval without a value.
    #[must_use]
    pub const fn bare(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            value: (),
        }
    }
}

impl<V> Interval<V> {
    #[must_use]
    pub const fn new(start: usize, end: usize, value: V) -> Self {
        Self { start, end, value }
    }

    /// Non-empty and correctly ordered.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.start < self.end
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// `range` lies entirely inside this interval.
    #[must_use]
    pub const fn encloses(&self, range: &Range<usize>) -> bool {
        self.start <= range.start && range.end <= self.end
    }

    /// This interval lies entirely inside `range`.
    #[must_use]
    pub const fn within(&self, range: &Range<usize>) -> bool {
        range.start <= self.start && self.end <= range.end
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}
