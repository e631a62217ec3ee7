//! Plain data types flowing through the pipeline.

use core::fmt;

/// The axis along which the grid fills.
///
/// `Row` grows downward (new rows appended), `Column` grows rightward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flow {
    Row,
    Column,
}

/// A viewport-relative bounding rectangle of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Size of a representative grid item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRect {
    pub width: f64,
    pub height: f64,
}

/// Inner size of the window (or whatever viewport the grid scrolls in).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

/// Non-negative amount by which the container's top-left is scrolled past
/// the viewport's top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceBehindWindow {
    pub width: f64,
    pub height: f64,
}

/// Grid track/gap/flow facts derived from the container's resolved styles.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMeasurement {
    pub col_gap: f64,
    pub row_gap: f64,
    pub flow: Flow,
    pub columns: usize,
    pub rows: usize,
}

/// [`GridMeasurement`] plus the representative item size, gap included.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeMeasurement {
    pub col_gap: f64,
    pub row_gap: f64,
    pub flow: Flow,
    pub columns: usize,
    pub rows: usize,
    pub item_height_with_gap: f64,
    pub item_width_with_gap: f64,
}

impl ResizeMeasurement {
    /// Number of tracks perpendicular to flow.
    pub fn crosswise_lines(&self) -> usize {
        match self.flow {
            Flow::Row => self.columns,
            Flow::Column => self.rows,
        }
    }

    /// Gap along the scroll axis.
    pub fn flow_gap(&self) -> f64 {
        match self.flow {
            Flow::Row => self.row_gap,
            Flow::Column => self.col_gap,
        }
    }

    /// Item extent (gap included) along the scroll axis.
    pub fn item_size_with_gap(&self) -> f64 {
        match self.flow {
            Flow::Row => self.item_height_with_gap,
            Flow::Column => self.item_width_with_gap,
        }
    }
}

/// Absolute index range to materialize: start index and count.
///
/// `buffered_offset + buffered_length` may exceed the sequence length;
/// slicing clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferMeta {
    pub buffered_offset: usize,
    pub buffered_length: usize,
}

/// Pixel offset of an item inside the grid container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemOffset {
    pub x: f64,
    pub y: f64,
}

/// A cell of the master array: the page holding it may not have resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot<T> {
    #[default]
    Unknown,
    Known(T),
}

impl<T> Slot<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Slot::Known(_))
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Slot::Known(v) => Some(v),
            Slot::Unknown => None,
        }
    }
}

/// Positioning style for one materialized item.
///
/// Every item is pinned to the grid's first cell and placed by translation,
/// so all materialized children share a single track.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStyle {
    pub grid_area: String,
    pub transform: String,
}

impl ItemStyle {
    pub fn translated(offset: ItemOffset) -> Self {
        Self {
            grid_area: String::from("1/1"),
            transform: format!("translate({}px, {}px)", offset.x, offset.y),
        }
    }
}

/// One entry of the render buffer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferItem<T> {
    /// Absolute position in the logical sequence.
    pub index: usize,
    pub value: Slot<T>,
    pub style: ItemStyle,
}

/// Extent the scroll ancestor should reserve for the logical content.
///
/// Only the flow axis is reported; the cross axis is sized by the grid
/// template itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// The provider's reply for one page.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemsByPage<T> {
    pub page_number: usize,
    pub items: Vec<T>,
}

/// A released page demand, tagged with the provider epoch it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    pub epoch: u64,
    pub page_number: usize,
    pub page_size: usize,
}

/// A resolved page, tagged with the epoch of the request that produced it.
///
/// Responses carrying a stale epoch are dropped by the pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageResponse<T> {
    pub epoch: u64,
    pub page: ItemsByPage<T>,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Row => f.write_str("row"),
            Flow::Column => f.write_str("column"),
        }
    }
}
