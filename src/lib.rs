//! A headless size-aggregation and viewport-windowing engine for virtualized lists and grids.
//!
//! This crate focuses on the core algorithms needed to render hundreds of thousands of
//! variably-sized rows, cells or text lines at interactive frame rates: prefix sums over item
//! sizes, fast offset → index lookup, overscanned visible ranges, and incremental remeasurement.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size(s) and scroll offset(s) for each query
//! - an estimated item size, and measured sizes once items are rendered
//!
//! In return it gets back which items to draw and where ([`ListVirtualizer::visible_range`],
//! [`GridVirtualizer::visible_range`]), the scrollable extent, scroll-to targets, and a dirty
//! interval ([`DirtyRange`]) telling dependent layout caches what to recompute.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod dirty;
mod fenwick;
mod grid;
mod list;
mod options;
mod tree;
mod types;
mod window;


pub use dirty::{DirtyRange, DirtyTracker};
pub use grid::GridVirtualizer;
pub use list::ListVirtualizer;
pub use options::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_GRANULARITY, DEFAULT_NOISE_THRESHOLD,
    GridVirtualizerOptions, ListVirtualizerOptions,
};
pub use tree::SizeTree;
pub use types::{
    Align, GridRange, ListRange, MeasuredSize, ScrollPosition, VirtualCell, VirtualItem,
    VirtualRange,
};
