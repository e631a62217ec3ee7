//! Geometry derivation from the container's resolved styles.
//!
//! The host view layer reads computed styles and bounding rects; the core
//! only sees the [`GridLayout`] snapshot it hands over. Unparseable style
//! values degrade silently: gaps fall back to `0`, track counts to `1`.

use crate::{ElementRect, Flow, GridMeasurement, ItemRect, ResizeMeasurement, SpaceBehindWindow};

/// Resolved style strings of the grid container, as the host read them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridStyles {
    pub row_gap: String,
    pub column_gap: String,
    pub grid_auto_flow: String,
    pub grid_template_columns: String,
    pub grid_template_rows: String,
    pub padding_top: String,
    pub padding_left: String,
    pub border_top: String,
    pub border_left: String,
}

/// A layout snapshot of the grid container: viewport-relative rect plus
/// resolved styles. Emitted by the host on (re)layout.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub rect: ElementRect,
    pub styles: GridStyles,
}

/// Parses the leading integer of a pixel value (`"10px"` → `10.0`).
///
/// Mirrors `parseInt` semantics: leading whitespace and an optional sign are
/// accepted, anything unparseable yields `0`.
pub fn parse_px(value: &str) -> f64 {
    let s = value.trim_start();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return 0.0;
    }
    let n: f64 = digits[..end].parse().unwrap_or(0.0);
    if neg { -n } else { n }
}

/// Number of explicit tracks in a template string.
///
/// A template is a whitespace-separated token list; an empty or unreadable
/// template counts as a single track.
pub fn track_count(template: &str) -> usize {
    template.split_whitespace().count().max(1)
}

/// How much of the container lies behind (above/left of) the viewport origin.
pub fn space_behind_window(rect: &ElementRect) -> SpaceBehindWindow {
    SpaceBehindWindow {
        width: (-rect.left).max(0.0),
        height: (-rect.top).max(0.0),
    }
}

/// Derives gaps, flow, and track counts from the container styles.
pub fn grid_measurement(styles: &GridStyles) -> GridMeasurement {
    // `column dense` flows column; `row`, `dense`, `row dense` all flow row.
    let flow = if styles.grid_auto_flow.trim_start().starts_with("column") {
        Flow::Column
    } else {
        Flow::Row
    };

    GridMeasurement {
        row_gap: parse_px(&styles.row_gap),
        col_gap: parse_px(&styles.column_gap),
        flow,
        columns: track_count(&styles.grid_template_columns),
        rows: track_count(&styles.grid_template_rows),
    }
}

/// [`grid_measurement`] extended with the representative item size, gaps
/// included.
pub fn resize_measurement(styles: &GridStyles, item: &ItemRect) -> ResizeMeasurement {
    let GridMeasurement {
        col_gap,
        row_gap,
        flow,
        columns,
        rows,
    } = grid_measurement(styles);

    ResizeMeasurement {
        col_gap,
        row_gap,
        flow,
        columns,
        rows,
        item_height_with_gap: item.height + row_gap,
        item_width_with_gap: item.width + col_gap,
    }
}
