/// Size changes smaller than this are ignored by default (sub-pixel measurement jitter).
pub const DEFAULT_NOISE_THRESHOLD: f64 = 0.5;

/// Default number of memoized viewport results per virtualizer.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Default bucket width used when rounding scroll offsets and container sizes into cache keys.
pub const DEFAULT_CACHE_GRANULARITY: f64 = 1.0;

/// Configuration for [`crate::ListVirtualizer`].
///
/// All fields are fixed once the virtualizer is built; `resize` carries them forward.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListVirtualizerOptions {
    pub count: usize,
    /// Size used for every item until it is measured.
    pub estimated_size: f64,
    /// Items rendered on each side of the visible range.
    pub overscan: usize,
    /// Measurements closer than this to the current size are dropped.
    pub noise_threshold: f64,
    /// Maximum memoized `visible_range` results; `0` disables memoization.
    pub cache_capacity: usize,
    /// Scroll offsets and container sizes are rounded to multiples of this for cache keys.
    pub cache_granularity: f64,
}

impl ListVirtualizerOptions {
    pub fn new(count: usize, estimated_size: f64) -> Self {
        Self {
            count,
            estimated_size,
            overscan: 1,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_granularity: DEFAULT_CACHE_GRANULARITY,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_noise_threshold(mut self, noise_threshold: f64) -> Self {
        self.noise_threshold = noise_threshold;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_cache_granularity(mut self, cache_granularity: f64) -> Self {
        self.cache_granularity = cache_granularity;
        self
    }
}

/// Configuration for [`crate::GridVirtualizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridVirtualizerOptions {
    pub row_count: usize,
    pub column_count: usize,
    pub estimated_row_height: f64,
    pub estimated_column_width: f64,
    pub overscan_rows: usize,
    pub overscan_columns: usize,
    pub noise_threshold: f64,
    pub cache_capacity: usize,
    pub cache_granularity: f64,
}

impl GridVirtualizerOptions {
    pub fn new(
        row_count: usize,
        column_count: usize,
        estimated_row_height: f64,
        estimated_column_width: f64,
    ) -> Self {
        Self {
            row_count,
            column_count,
            estimated_row_height,
            estimated_column_width,
            overscan_rows: 1,
            overscan_columns: 1,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_granularity: DEFAULT_CACHE_GRANULARITY,
        }
    }

    pub fn with_overscan(mut self, overscan_rows: usize, overscan_columns: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self.overscan_columns = overscan_columns;
        self
    }

    pub fn with_overscan_rows(mut self, overscan_rows: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self
    }

    pub fn with_overscan_columns(mut self, overscan_columns: usize) -> Self {
        self.overscan_columns = overscan_columns;
        self
    }

    pub fn with_noise_threshold(mut self, noise_threshold: f64) -> Self {
        self.noise_threshold = noise_threshold;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_cache_granularity(mut self, cache_granularity: f64) -> Self {
        self.cache_granularity = cache_granularity;
        self
    }
}
