use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::cache::{RangeCache, quantize};
use crate::tree::sanitize_size;
use crate::window::{axis_range, clamp_extent, clamp_offset, scroll_target};
use crate::{
    Align, DirtyRange, GridRange, GridVirtualizerOptions, ScrollPosition, SizeTree, VirtualCell,
    VirtualRange,
};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct GridCacheKey {
    version: u64,
    scroll_y: i64,
    scroll_x: i64,
    height: i64,
    width: i64,
}

/// A headless windowing engine for a grid: one size tree for row heights, one for column
/// widths.
///
/// The axes are independent, but share one version counter so any row or column mutation
/// invalidates memoized windows.
#[derive(Clone, Debug)]
pub struct GridVirtualizer {
    options: GridVirtualizerOptions,
    rows: SizeTree,
    columns: SizeTree,
    version: u64,
    cache: RefCell<RangeCache<GridCacheKey, Arc<GridRange>>>,
}

impl GridVirtualizer {
    pub fn new(options: GridVirtualizerOptions) -> Self {
        let options = GridVirtualizerOptions {
            estimated_row_height: sanitize_size(options.estimated_row_height),
            estimated_column_width: sanitize_size(options.estimated_column_width),
            ..options
        };
        vdebug!(
            rows = options.row_count,
            columns = options.column_count,
            "GridVirtualizer::new"
        );
        let rows = SizeTree::new(options.row_count, options.estimated_row_height)
            .with_noise_threshold(options.noise_threshold);
        let columns = SizeTree::new(options.column_count, options.estimated_column_width)
            .with_noise_threshold(options.noise_threshold);
        Self::from_trees(options, rows, columns, 0)
    }

    fn from_trees(
        options: GridVirtualizerOptions,
        rows: SizeTree,
        columns: SizeTree,
        version: u64,
    ) -> Self {
        Self {
            cache: RefCell::new(RangeCache::new(options.cache_capacity)),
            options,
            rows,
            columns,
            version,
        }
    }

    pub fn options(&self) -> &GridVirtualizerOptions {
        &self.options
    }

    pub fn rows(&self) -> &SizeTree {
        &self.rows
    }

    pub fn columns(&self) -> &SizeTree {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn total_height(&self) -> f64 {
        self.rows.total()
    }

    pub fn total_width(&self) -> f64 {
        self.columns.total()
    }

    /// Incremented once per committed mutation on either axis.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<VirtualCell> {
        if row >= self.row_count() || col >= self.column_count() {
            return None;
        }
        Some(VirtualCell {
            row_index: row,
            col_index: col,
            x: self.columns.prefix_sum(col),
            y: self.rows.prefix_sum(row),
            width: self.columns.get(col),
            height: self.rows.get(row),
        })
    }

    /// Returns the cells to render for a viewport, row-major.
    ///
    /// Rows and columns are windowed independently; the result is their cross product.
    pub fn visible_range(
        &self,
        scroll_y: f64,
        scroll_x: f64,
        container_height: f64,
        container_width: f64,
    ) -> Arc<GridRange> {
        let total_height = self.rows.total();
        let total_width = self.columns.total();
        let scroll_y = clamp_offset(scroll_y, total_height);
        let scroll_x = clamp_offset(scroll_x, total_width);
        let height = clamp_extent(container_height);
        let width = clamp_extent(container_width);
        let g = self.options.cache_granularity;
        let key = GridCacheKey {
            version: self.version,
            scroll_y: quantize(scroll_y, g),
            scroll_x: quantize(scroll_x, g),
            height: quantize(height, g),
            width: quantize(width, g),
        };

        if let Some(hit) = self.cache.borrow().get(&key) {
            vtrace!(version = key.version, "GridVirtualizer::visible_range: cache hit");
            return hit;
        }

        let rows = axis_range(&self.rows, scroll_y, height, self.options.overscan_rows);
        let columns = axis_range(&self.columns, scroll_x, width, self.options.overscan_columns);
        let mut items = Vec::with_capacity(rows.len().saturating_mul(columns.len()));
        self.for_each_in(rows, columns, |cell| items.push(cell));

        let result = Arc::new(GridRange {
            rows,
            columns,
            items,
            total_height,
            total_width,
        });
        self.cache.borrow_mut().insert(key, Arc::clone(&result));
        result
    }

    /// Returns the overscanned `(rows, columns)` ranges, bypassing the cache.
    pub fn virtual_ranges_for(
        &self,
        scroll_y: f64,
        scroll_x: f64,
        container_height: f64,
        container_width: f64,
    ) -> (VirtualRange, VirtualRange) {
        let rows = axis_range(
            &self.rows,
            clamp_offset(scroll_y, self.rows.total()),
            clamp_extent(container_height),
            self.options.overscan_rows,
        );
        let columns = axis_range(
            &self.columns,
            clamp_offset(scroll_x, self.columns.total()),
            clamp_extent(container_width),
            self.options.overscan_columns,
        );
        (rows, columns)
    }

    /// Visits the cells [`Self::visible_range`] would return, without allocating.
    pub fn for_each_visible_cell(
        &self,
        scroll_y: f64,
        scroll_x: f64,
        container_height: f64,
        container_width: f64,
        f: impl FnMut(VirtualCell),
    ) {
        let (rows, columns) =
            self.virtual_ranges_for(scroll_y, scroll_x, container_height, container_width);
        self.for_each_in(rows, columns, f);
    }

    pub fn update_row_height(&mut self, row: usize, height: f64) -> bool {
        let changed = self.rows.update(row, height);
        self.commit(changed as usize)
    }

    pub fn update_column_width(&mut self, col: usize, width: f64) -> bool {
        let changed = self.columns.update(col, width);
        self.commit(changed as usize)
    }

    /// Records many row heights under a single version bump.
    pub fn measure_rows(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, f64)>,
    ) -> usize {
        let applied = self.rows.update_batch(measurements);
        self.commit(applied);
        applied
    }

    /// Records many column widths under a single version bump.
    pub fn measure_columns(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, f64)>,
    ) -> usize {
        let applied = self.columns.update_batch(measurements);
        self.commit(applied);
        applied
    }

    pub fn scroll_target_row(&self, row: usize, container_height: f64, align: Align) -> f64 {
        scroll_target(&self.rows, row, container_height, align)
    }

    pub fn scroll_target_column(&self, col: usize, container_width: f64, align: Align) -> f64 {
        scroll_target(&self.columns, col, container_width, align)
    }

    /// Scroll position that brings a cell into view with the same alignment on both axes.
    pub fn scroll_to_cell(
        &self,
        row: usize,
        col: usize,
        container_height: f64,
        container_width: f64,
        align: Align,
    ) -> ScrollPosition {
        ScrollPosition {
            x: self.scroll_target_column(col, container_width, align),
            y: self.scroll_target_row(row, container_height, align),
        }
    }

    pub fn consume_dirty_rows(&mut self) -> Option<DirtyRange> {
        self.rows.consume_dirty_range()
    }

    pub fn consume_dirty_columns(&mut self) -> Option<DirtyRange> {
        self.columns.consume_dirty_range()
    }

    pub fn is_row_range_dirty(&self, start: usize, end: usize) -> bool {
        self.rows.is_dirty_in_range(start, end)
    }

    pub fn is_column_range_dirty(&self, start: usize, end: usize) -> bool {
        self.columns.is_dirty_in_range(start, end)
    }

    /// Builds a grid of `new_row_count` x `new_column_count`.
    ///
    /// Measured row heights and column widths are carried forward independently for retained
    /// indexes; `self` is left untouched.
    pub fn resize(&self, new_row_count: usize, new_column_count: usize) -> Self {
        vdebug!(
            rows = new_row_count,
            columns = new_column_count,
            "GridVirtualizer::resize"
        );
        let options = GridVirtualizerOptions {
            row_count: new_row_count,
            column_count: new_column_count,
            ..self.options
        };
        let rows = self
            .rows
            .resized(new_row_count, options.estimated_row_height);
        let columns = self
            .columns
            .resized(new_column_count, options.estimated_column_width);
        Self::from_trees(options, rows, columns, self.version + 1)
    }

    pub fn clear_cache(&self) {
        vdebug!(entries = self.cache_len(), "GridVirtualizer::clear_cache");
        self.cache.borrow_mut().clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    fn commit(&mut self, applied: usize) -> bool {
        if applied == 0 {
            return false;
        }
        self.version += 1;
        true
    }

    fn for_each_in(
        &self,
        rows: VirtualRange,
        columns: VirtualRange,
        mut f: impl FnMut(VirtualCell),
    ) {
        if rows.is_empty() || columns.is_empty() {
            return;
        }
        let x0 = self.columns.prefix_sum(columns.start_index);
        let mut y = self.rows.prefix_sum(rows.start_index);
        for row_index in rows.start_index..rows.end_index {
            let height = self.rows.get(row_index);
            let mut x = x0;
            for col_index in columns.start_index..columns.end_index {
                let width = self.columns.get(col_index);
                f(VirtualCell {
                    row_index,
                    col_index,
                    x,
                    y,
                    width,
                    height,
                });
                x += width;
            }
            y += height;
        }
    }
}
