use core::cmp;

use crate::{Align, SizeTree, VirtualRange};

/// Clamps a caller-supplied scroll offset into `[0, total]`. NaN reads as `0`.
pub(crate) fn clamp_offset(offset: f64, total: f64) -> f64 {
    if offset.is_nan() || offset <= 0.0 {
        return 0.0;
    }
    offset.min(total)
}

/// Clamps a caller-supplied container size to be non-negative. NaN reads as `0`.
pub(crate) fn clamp_extent(extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 {
        return 0.0;
    }
    extent
}

/// Computes the overscanned index range of one axis for a viewport
/// `[offset, offset + extent)`.
///
/// `offset` and `extent` must already be clamped.
pub(crate) fn axis_range(
    tree: &SizeTree,
    offset: f64,
    extent: f64,
    overscan: usize,
) -> VirtualRange {
    let count = tree.len();
    if count == 0 || extent <= 0.0 {
        return VirtualRange::default();
    }

    let raw_start = tree.find_index_by_offset(offset);
    let end_offset = offset + extent;
    let mut raw_end = tree.find_index_by_offset(end_offset);
    // The item at `raw_end` is partially visible when it starts before the viewport's end.
    if raw_end < count && tree.prefix_sum(raw_end) < end_offset {
        raw_end += 1;
    }

    let end_index = cmp::min(raw_end.saturating_add(overscan), count);
    let start_index = cmp::min(raw_start.saturating_sub(overscan), end_index);
    debug_assert!(start_index <= end_index);
    vtrace!(
        offset,
        extent,
        raw_start,
        raw_end,
        start_index,
        end_index,
        "axis_range"
    );
    VirtualRange {
        start_index,
        end_index,
    }
}

/// Computes the scroll offset that brings `index` to the requested edge of a container.
///
/// Out-of-range indexes clamp to the last item; an empty axis scrolls to `0`.
pub(crate) fn scroll_target(tree: &SizeTree, index: usize, extent: f64, align: Align) -> f64 {
    let count = tree.len();
    if count == 0 {
        return 0.0;
    }
    let index = index.min(count - 1);
    let start = tree.prefix_sum(index);
    let size = tree.get(index);
    let extent = clamp_extent(extent);

    match align {
        Align::Start => start,
        Align::Center => (start - extent / 2.0 + size / 2.0).max(0.0),
        Align::End => (start - extent + size).max(0.0),
    }
}
