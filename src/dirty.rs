/// A half-open index interval `[start, end)` touched by mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirtyRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl DirtyRange {
    /// Number of indexes covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Returns `true` if this interval shares at least one index with `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < end && self.start < end && start < self.end
    }

    fn union(self, other: DirtyRange) -> DirtyRange {
        DirtyRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Accumulates the smallest single interval covering every mutation since the last
/// [`DirtyTracker::consume`].
///
/// Marking is `O(1)` regardless of how many indexes were touched; the price is that the
/// interval may cover untouched indexes between two distant mutations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    range: Option<DirtyRange>,
}

impl DirtyTracker {
    /// Creates a clean tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a single index.
    pub fn mark(&mut self, index: usize) {
        self.mark_range(index, index.saturating_add(1));
    }

    /// Unions `[start, end)` into the tracked interval. Empty spans are ignored.
    pub fn mark_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let span = DirtyRange { start, end };
        self.range = Some(match self.range {
            Some(cur) => cur.union(span),
            None => span,
        });
    }

    /// The accumulated interval, left in place.
    pub fn peek(&self) -> Option<DirtyRange> {
        self.range
    }

    /// Returns and clears the accumulated interval.
    pub fn consume(&mut self) -> Option<DirtyRange> {
        self.range.take()
    }

    /// Returns `true` if any index in `[start, end)` was touched. Empty spans are never dirty.
    pub fn is_dirty_in_range(&self, start: usize, end: usize) -> bool {
        self.range.is_some_and(|r| r.overlaps(start, end))
    }

    pub fn is_clean(&self) -> bool {
        self.range.is_none()
    }
}
