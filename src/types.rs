use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// One item of a list window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Start offset along the scroll axis.
    pub offset: f64,
    pub size: f64,
}

impl VirtualItem {
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }
}

/// One cell of a grid window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualCell {
    pub row_index: usize,
    pub col_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A size observation for one index, as fed back by a measurement layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredSize {
    pub index: usize,
    pub size: f64,
}

impl From<(usize, f64)> for MeasuredSize {
    fn from((index, size): (usize, f64)) -> Self {
        Self { index, size }
    }
}

/// The items of a list that should be rendered for one viewport.
///
/// This is a snapshot: it is stale after any mutating call on the virtualizer that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive, includes overscan
    pub items: Vec<VirtualItem>,
    pub total_size: f64,
}

impl ListRange {
    pub fn range(&self) -> VirtualRange {
        VirtualRange {
            start_index: self.start_index,
            end_index: self.end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The cells of a grid that should be rendered for one viewport.
///
/// `items` holds the cross product of `rows` and `columns`, row-major.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRange {
    pub rows: VirtualRange,
    pub columns: VirtualRange,
    pub items: Vec<VirtualCell>,
    pub total_height: f64,
    pub total_width: f64,
}

impl GridRange {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A two-axis scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}
