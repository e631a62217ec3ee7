//! Buffer-window planning and item placement.
//!
//! Everything here is a pure function of the latest measurements; the
//! pipeline wires them together and applies the deduplication floors.

use crate::{
    BufferItem, BufferMeta, ContentSize, Flow, ItemOffset, ItemStyle, ResizeMeasurement, Slot,
    SpaceBehindWindow, WindowSize,
};

/// Plans the absolute index range to materialize.
///
/// The buffer covers the visible lines plus symmetric overscan: twice the
/// in-view length, started half a window before the first visible line.
/// Before layout (`item_size_with_gap == 0`) the plan is empty.
pub fn buffer_meta(
    window: &WindowSize,
    space: &SpaceBehindWindow,
    m: &ResizeMeasurement,
) -> BufferMeta {
    let crosswise_lines = m.crosswise_lines();
    let gap = m.flow_gap();
    let item_size_with_gap = m.item_size_with_gap();
    let (window_inner_size, space_behind_window) = match m.flow {
        Flow::Row => (window.height, space.height),
        Flow::Column => (window.width, space.width),
    };

    if item_size_with_gap <= 0.0 {
        return BufferMeta::default();
    }

    let lines_in_view = ((window_inner_size + gap) / item_size_with_gap).ceil() as usize + 1;
    let length = lines_in_view * crosswise_lines;

    let lines_before_view = ((space_behind_window + gap) / item_size_with_gap).floor() as usize;
    let offset = lines_before_view * crosswise_lines;

    BufferMeta {
        buffered_offset: offset.saturating_sub(length / 2),
        buffered_length: length * 2,
    }
}

/// Page numbers intersecting the buffered range, in ascending order.
pub fn visible_page_range(
    meta: &BufferMeta,
    length: usize,
    page_size: usize,
) -> core::ops::Range<usize> {
    if page_size == 0 {
        return 0..0;
    }
    let start_page = meta.buffered_offset / page_size;
    let covered = (meta.buffered_offset + meta.buffered_length).min(length);
    let end_page = covered.div_ceil(page_size);
    start_page..end_page.max(start_page)
}

/// Pixel offset of an absolute index inside the grid container.
pub fn item_offset(index: usize, m: &ResizeMeasurement) -> ItemOffset {
    match m.flow {
        Flow::Row => {
            let columns = m.columns.max(1);
            ItemOffset {
                x: (index % columns) as f64 * m.item_width_with_gap,
                y: (index / columns) as f64 * m.item_height_with_gap,
            }
        }
        Flow::Column => {
            let rows = m.rows.max(1);
            ItemOffset {
                x: (index / rows) as f64 * m.item_width_with_gap,
                y: (index % rows) as f64 * m.item_height_with_gap,
            }
        }
    }
}

/// Slices the master array to the buffer window and tags each cell with its
/// absolute index and placement style.
pub fn visible_items<T: Clone>(
    meta: &BufferMeta,
    m: &ResizeMeasurement,
    all_items: &[Slot<T>],
) -> Vec<BufferItem<T>> {
    let start = meta.buffered_offset.min(all_items.len());
    let end = (meta.buffered_offset + meta.buffered_length).min(all_items.len());

    all_items[start..end]
        .iter()
        .enumerate()
        .map(|(local, value)| {
            let index = start + local;
            BufferItem {
                index,
                value: value.clone(),
                style: ItemStyle::translated(item_offset(index, m)),
            }
        })
        .collect()
}

/// Flow-axis extent of the full logical content.
///
/// The trailing gap is subtracted; an empty sequence therefore reports a
/// negative extent, which scroll hosts clamp.
pub fn content_size(m: &ResizeMeasurement, length: usize) -> ContentSize {
    match m.flow {
        Flow::Row => ContentSize {
            width: None,
            height: Some(
                m.item_height_with_gap * length.div_ceil(m.columns.max(1)) as f64 - m.row_gap,
            ),
        },
        Flow::Column => ContentSize {
            width: Some(m.item_width_with_gap * length.div_ceil(m.rows.max(1)) as f64 - m.col_gap),
            height: None,
        },
    }
}
