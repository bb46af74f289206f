use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::cache::{RangeCache, quantize};
use crate::tree::sanitize_size;
use crate::window::{axis_range, clamp_extent, clamp_offset, scroll_target};
use crate::{
    Align, DirtyRange, ListRange, ListVirtualizerOptions, MeasuredSize, SizeTree, VirtualItem,
    VirtualRange,
};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ListCacheKey {
    version: u64,
    offset: i64,
    extent: i64,
}

/// A headless windowing engine for a list of variably-sized items (rows, text lines).
///
/// This type does not hold any UI objects:
/// - Your adapter passes the scroll offset and container size to each query.
/// - Measured sizes are fed back with [`ListVirtualizer::measure_item`] /
///   [`ListVirtualizer::measure_items`].
///
/// Query results are memoized by `(version, rounded offset, rounded container size)`. Any
/// committed measurement bumps the version, so stale results are never served.
#[derive(Clone, Debug)]
pub struct ListVirtualizer {
    options: ListVirtualizerOptions,
    tree: SizeTree,
    cache: RefCell<RangeCache<ListCacheKey, Arc<ListRange>>>,
}

impl ListVirtualizer {
    pub fn new(options: ListVirtualizerOptions) -> Self {
        let options = ListVirtualizerOptions {
            estimated_size: sanitize_size(options.estimated_size),
            ..options
        };
        vdebug!(
            count = options.count,
            estimated_size = options.estimated_size,
            overscan = options.overscan,
            "ListVirtualizer::new"
        );
        let tree = SizeTree::new(options.count, options.estimated_size)
            .with_noise_threshold(options.noise_threshold);
        Self::from_tree(options, tree)
    }

    fn from_tree(options: ListVirtualizerOptions, tree: SizeTree) -> Self {
        Self {
            cache: RefCell::new(RangeCache::new(options.cache_capacity)),
            options,
            tree,
        }
    }

    pub fn options(&self) -> &ListVirtualizerOptions {
        &self.options
    }

    /// Read-only access to the underlying size aggregation.
    pub fn tree(&self) -> &SizeTree {
        &self.tree
    }

    pub fn count(&self) -> usize {
        self.tree.len()
    }

    pub fn total_size(&self) -> f64 {
        self.tree.total()
    }

    pub fn version(&self) -> u64 {
        self.tree.version()
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        (index < self.count()).then(|| self.item_unchecked(index))
    }

    /// Maps an offset to the item covering it, or `None` past the end.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let index = self.tree.find_index_by_offset(offset);
        (index < self.count()).then_some(index)
    }

    /// Returns the overscanned window for a viewport `[scroll_offset, scroll_offset +
    /// container_size)`.
    ///
    /// Repeated calls with the same (rounded) arguments and no intervening mutation return the
    /// same shared snapshot.
    pub fn visible_range(&self, scroll_offset: f64, container_size: f64) -> Arc<ListRange> {
        let total = self.tree.total();
        let offset = clamp_offset(scroll_offset, total);
        let extent = clamp_extent(container_size);
        let granularity = self.options.cache_granularity;
        let key = ListCacheKey {
            version: self.tree.version(),
            offset: quantize(offset, granularity),
            extent: quantize(extent, granularity),
        };

        if let Some(hit) = self.cache.borrow().get(&key) {
            vtrace!(version = key.version, offset, extent, "visible_range: cache hit");
            return hit;
        }

        let range = axis_range(&self.tree, offset, extent, self.options.overscan);
        let mut items = Vec::with_capacity(range.len());
        self.for_each_in(range, |it| items.push(it));
        let result = Arc::new(ListRange {
            start_index: range.start_index,
            end_index: range.end_index,
            items,
            total_size: total,
        });
        self.cache.borrow_mut().insert(key, Arc::clone(&result));
        result
    }

    /// Returns only the overscanned index range, bypassing the cache.
    pub fn virtual_range_for(&self, scroll_offset: f64, container_size: f64) -> VirtualRange {
        let offset = clamp_offset(scroll_offset, self.tree.total());
        axis_range(
            &self.tree,
            offset,
            clamp_extent(container_size),
            self.options.overscan,
        )
    }

    /// Visits the items [`Self::visible_range`] would return, without allocating.
    pub fn for_each_visible_item(
        &self,
        scroll_offset: f64,
        container_size: f64,
        f: impl FnMut(VirtualItem),
    ) {
        let range = self.virtual_range_for(scroll_offset, container_size);
        self.for_each_in(range, f);
    }

    /// Collects the visible items into `out` (clears `out` first).
    pub fn collect_visible_items(
        &self,
        scroll_offset: f64,
        container_size: f64,
        out: &mut Vec<VirtualItem>,
    ) {
        out.clear();
        self.for_each_visible_item(scroll_offset, container_size, |it| out.push(it));
    }

    /// Records a measured size. Returns `true` if the size was committed.
    pub fn measure_item(&mut self, index: usize, size: f64) -> bool {
        self.tree.update(index, size)
    }

    /// Records many measured sizes under a single version bump.
    ///
    /// Prefer this over repeated [`Self::measure_item`] calls when a whole frame's worth of
    /// items was measured: every committed version invalidates memoized ranges.
    pub fn measure_items(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, f64)>,
    ) -> usize {
        self.tree.update_batch(measurements)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.tree.is_measured(index)
    }

    /// Returns every item to the estimated size.
    pub fn reset_measurements(&mut self) -> bool {
        self.tree.reset_measurements()
    }

    /// Exports measured sizes (useful for persistence).
    pub fn export_measurements(&self) -> Vec<MeasuredSize> {
        self.tree.measured_entries().collect()
    }

    /// Replays previously exported sizes as one batch. Sizes are restored exactly, even when
    /// they sit within the noise threshold of the estimate. Entries past the current count are
    /// skipped.
    pub fn import_measurements(
        &mut self,
        entries: impl IntoIterator<Item = MeasuredSize>,
    ) -> usize {
        let applied = self
            .tree
            .restore_batch(entries.into_iter().map(|m| (m.index, m.size)));
        vdebug!(applied, "ListVirtualizer::import_measurements");
        applied
    }

    /// Scroll offset that aligns `index` with the start, center or end of the container.
    pub fn scroll_target(&self, index: usize, container_size: f64, align: Align) -> f64 {
        scroll_target(&self.tree, index, container_size, align)
    }

    /// Returns and clears the interval of indexes touched since the last call.
    pub fn consume_dirty_range(&mut self) -> Option<DirtyRange> {
        self.tree.consume_dirty_range()
    }

    pub fn dirty_range(&self) -> Option<DirtyRange> {
        self.tree.dirty_range()
    }

    pub fn is_dirty_in_range(&self, start: usize, end: usize) -> bool {
        self.tree.is_dirty_in_range(start, end)
    }

    /// Builds a virtualizer for `new_count` items.
    ///
    /// The returned value carries forward measured sizes below `new_count` and the pending dirty
    /// interval; `self` is left untouched, so snapshots taken from it stay coherent.
    pub fn resize(&self, new_count: usize) -> Self {
        vdebug!(
            from = self.count(),
            to = new_count,
            measured = self.tree.measured_len(),
            "ListVirtualizer::resize"
        );
        let options = ListVirtualizerOptions {
            count: new_count,
            ..self.options
        };
        let tree = self.tree.resized(new_count, options.estimated_size);
        Self::from_tree(options, tree)
    }

    pub fn clear_cache(&self) {
        vdebug!(entries = self.cache_len(), "ListVirtualizer::clear_cache");
        self.cache.borrow_mut().clear();
    }

    /// Number of memoized ranges currently held.
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    fn for_each_in(&self, range: VirtualRange, mut f: impl FnMut(VirtualItem)) {
        if range.is_empty() {
            return;
        }
        let mut offset = self.tree.prefix_sum(range.start_index);
        for index in range.start_index..range.end_index {
            let size = self.tree.get(index);
            f(VirtualItem {
                index,
                offset,
                size,
            });
            offset += size;
        }
    }

    fn item_unchecked(&self, index: usize) -> VirtualItem {
        VirtualItem {
            index,
            offset: self.tree.prefix_sum(index),
            size: self.tree.get(index),
        }
    }
}
