use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::{DEFAULT_NOISE_THRESHOLD, DirtyRange, DirtyTracker, MeasuredSize};

/// An owned array of item sizes with `O(log n)` point update, prefix sum and offset lookup.
///
/// Every committed mutation bumps [`SizeTree::version`] exactly once, which makes the version a
/// cheap invalidation token for anything derived from the sizes. Mutations also widen the
/// tree's dirty interval (see [`DirtyTracker`]).
///
/// Reads never fail: out-of-range indexes read as `0` and offsets are clamped.
#[derive(Clone, Debug)]
pub struct SizeTree {
    sizes: Vec<f64>,
    sums: Fenwick,
    measured: BTreeSet<usize>,
    default_size: f64,
    noise_threshold: f64,
    version: u64,
    dirty: DirtyTracker,
}

impl SizeTree {
    /// Creates a tree of `count` items, all sized `default_size`.
    ///
    /// A negative or non-finite `default_size` is treated as `0`.
    pub fn new(count: usize, default_size: f64) -> Self {
        let default_size = sanitize_size(default_size);
        let sizes = alloc::vec![default_size; count];
        Self {
            sums: Fenwick::from_sizes(&sizes),
            sizes,
            measured: BTreeSet::new(),
            default_size,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            version: 0,
            dirty: DirtyTracker::new(),
        }
    }

    /// Sets the minimum size delta that [`SizeTree::update`] will commit.
    ///
    /// Negative or non-finite thresholds disable suppression (only exact repeats are ignored).
    pub fn with_noise_threshold(mut self, noise_threshold: f64) -> Self {
        self.noise_threshold = sanitize_size(noise_threshold);
        self
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Size given to items that were never measured (and to items appended by a resize).
    pub fn default_size(&self) -> f64 {
        self.default_size
    }

    pub fn noise_threshold(&self) -> f64 {
        self.noise_threshold
    }

    /// Incremented once per committed mutation. Never decreases.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sum of all item sizes, `O(1)`.
    pub fn total(&self) -> f64 {
        self.sums.total()
    }

    /// Size of one item; `0` when `index` is out of range.
    pub fn get(&self, index: usize) -> f64 {
        self.sizes.get(index).copied().unwrap_or(0.0)
    }

    /// Cumulative size of items `[0, index)`; `index` is clamped to `len()`.
    pub fn prefix_sum(&self, index: usize) -> f64 {
        if index == 0 {
            return 0.0;
        }
        self.sums.prefix_sum(index)
    }

    /// Cumulative size of items `[start, end)`; never negative.
    pub fn range_sum(&self, start: usize, end: usize) -> f64 {
        (self.prefix_sum(end) - self.prefix_sum(start)).max(0.0)
    }

    /// Returns the index `i` with `prefix_sum(i) <= offset < prefix_sum(i + 1)`.
    ///
    /// Offsets `<= 0` (and NaN) map to `0`; offsets `>= total()` map to `len()`.
    pub fn find_index_by_offset(&self, offset: f64) -> usize {
        let count = self.len();
        if offset.is_nan() || offset <= 0.0 || count == 0 {
            return 0;
        }
        if offset >= self.total() {
            return count;
        }
        self.sums.lower_bound(offset).min(count - 1)
    }

    /// Returns `true` if the size of `index` differs from the default estimate.
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.contains(&index)
    }

    pub fn measured_len(&self) -> usize {
        self.measured.len()
    }

    /// Entries whose size differs from the default, in index order.
    pub fn measured_entries(&self) -> impl Iterator<Item = MeasuredSize> + '_ {
        self.measured.iter().map(|&index| MeasuredSize {
            index,
            size: self.sizes[index],
        })
    }

    /// Sets the size of one item.
    ///
    /// Returns `false` without touching the version when the index is out of range, the size is
    /// negative or non-finite, or the change is below the noise threshold.
    pub fn update(&mut self, index: usize, size: f64) -> bool {
        if !self.apply(index, size, self.noise_threshold) {
            return false;
        }
        self.version += 1;
        true
    }

    /// Applies many size changes under one version bump.
    ///
    /// Returns how many entries were committed.
    pub fn update_batch(&mut self, changes: impl IntoIterator<Item = (usize, f64)>) -> usize {
        self.commit_batch(changes, self.noise_threshold)
    }

    /// Like [`SizeTree::update_batch`], but writes every valid size exactly, ignoring the noise
    /// threshold. Used to replay previously exported measurements.
    pub fn restore_batch(&mut self, entries: impl IntoIterator<Item = (usize, f64)>) -> usize {
        self.commit_batch(entries, 0.0)
    }

    /// Grows by appending `default_size` items or shrinks by truncating.
    ///
    /// Retained sizes are kept as-is; when `default_size` changes, retained items left at the
    /// old default become measured entries. The version is bumped even when the count is
    /// unchanged.
    pub fn resize(&mut self, new_count: usize, default_size: f64) {
        let cur = self.len();
        let default_size = sanitize_size(default_size);
        if default_size != self.default_size {
            let retained = cur.min(new_count);
            for (index, &size) in self.sizes[..retained].iter().enumerate() {
                if size != default_size {
                    self.measured.insert(index);
                } else {
                    self.measured.remove(&index);
                }
            }
        }
        if new_count < cur {
            self.sizes.truncate(new_count);
            self.sums.truncate(new_count);
            self.measured.retain(|&index| index < new_count);
            self.dirty.mark_range(new_count, cur);
        } else if new_count > cur {
            let added = new_count - cur;
            self.sizes.resize(new_count, default_size);
            if added > cur {
                self.sums = Fenwick::from_sizes(&self.sizes);
            } else {
                for _ in 0..added {
                    self.sums.push_value(default_size);
                }
            }
            self.dirty.mark_range(cur, new_count);
        }
        self.default_size = default_size;
        self.version += 1;
        vdebug!(from = cur, to = new_count, version = self.version, "SizeTree::resize");
    }

    /// Builds a new tree of `new_count` items that carries forward only the measured entries
    /// below `new_count`; every other item gets `default_size`.
    ///
    /// The new tree continues this tree's version sequence and inherits its dirty interval
    /// (widened by the resized span).
    pub fn resized(&self, new_count: usize, default_size: f64) -> Self {
        let default_size = sanitize_size(default_size);
        let mut sizes = alloc::vec![default_size; new_count];
        let mut measured = BTreeSet::new();
        for &index in self.measured.range(..new_count) {
            sizes[index] = self.sizes[index];
            measured.insert(index);
        }

        let mut dirty = self.dirty;
        let cur = self.len();
        dirty.mark_range(cur.min(new_count), cur.max(new_count));

        Self {
            sums: Fenwick::from_sizes(&sizes),
            sizes,
            measured,
            default_size,
            noise_threshold: self.noise_threshold,
            version: self.version + 1,
            dirty,
        }
    }

    /// Returns every item to the default size under one version bump.
    ///
    /// Returns `false` if nothing was measured.
    pub fn reset_measurements(&mut self) -> bool {
        if self.measured.is_empty() {
            return false;
        }
        let first = self.measured.first().copied().unwrap_or(0);
        let last = self.measured.last().copied().unwrap_or(0);
        self.measured.clear();
        self.sizes.fill(self.default_size);
        self.sums = Fenwick::from_sizes(&self.sizes);
        self.dirty.mark_range(first, last + 1);
        self.version += 1;
        true
    }

    /// The interval touched since the last [`SizeTree::consume_dirty_range`], without clearing
    /// it.
    pub fn dirty_range(&self) -> Option<DirtyRange> {
        self.dirty.peek()
    }

    /// Returns and clears the interval of indexes touched since the last call.
    pub fn consume_dirty_range(&mut self) -> Option<DirtyRange> {
        self.dirty.consume()
    }

    pub fn is_dirty_in_range(&self, start: usize, end: usize) -> bool {
        self.dirty.is_dirty_in_range(start, end)
    }

    fn commit_batch(
        &mut self,
        changes: impl IntoIterator<Item = (usize, f64)>,
        noise_threshold: f64,
    ) -> usize {
        let mut applied = 0usize;
        for (index, size) in changes {
            if self.apply(index, size, noise_threshold) {
                applied += 1;
            }
        }
        if applied > 0 {
            self.version += 1;
            vtrace!(applied, version = self.version, "SizeTree::commit_batch");
        }
        applied
    }

    fn apply(&mut self, index: usize, size: f64, noise_threshold: f64) -> bool {
        if index >= self.len() {
            vwarn!(index, count = self.len(), "SizeTree: out-of-range index");
            return false;
        }
        if !size.is_finite() || size < 0.0 {
            vwarn!(index, size, "SizeTree: rejected negative or non-finite size");
            return false;
        }
        let cur = self.sizes[index];
        let delta = size - cur;
        if is_noise(delta, noise_threshold) {
            return false;
        }
        self.sizes[index] = size;
        self.sums.add(index, delta);
        if size == self.default_size {
            self.measured.remove(&index);
        } else {
            self.measured.insert(index);
        }
        self.dirty.mark(index);
        true
    }
}

fn is_noise(delta: f64, threshold: f64) -> bool {
    delta == 0.0 || (delta < threshold && delta > -threshold)
}

pub(crate) fn sanitize_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}
