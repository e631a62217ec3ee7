//! Scroll-ancestor resolution and scroll-to actions.
//!
//! The core never touches a real element tree. The host implements
//! [`ScrollHost`] over whatever it has (DOM, a retained layout tree, a test
//! fixture) and the walk below mirrors the usual browser rules: `fixed`
//! short-circuits to the body, `absolute` skips statically positioned
//! ancestors, `hidden` overflow only qualifies on opt-in, and the document
//! scrolling element is the fallback.

use crate::layout::item_offset;
use crate::measure::{GridLayout, parse_px};
use crate::types::ResizeMeasurement;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether this overflow value makes an ancestor a scroll container.
    pub fn scrolls(self, include_hidden: bool) -> bool {
        match self {
            Overflow::Auto | Overflow::Scroll => true,
            Overflow::Hidden => include_hidden,
            Overflow::Visible | Overflow::Clip => false,
        }
    }
}

/// Resolved style facts the walk needs from one ancestor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AncestorStyle {
    pub position: Position,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

/// Layout offsets of an element relative to its offset parent chain, as the
/// host reports them (`offsetTop`/`offsetLeft` in DOM terms).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementOffsets {
    pub top: f64,
    pub left: f64,
}

/// The host's view of the element tree around the grid container.
///
/// `parent` must step through assigned-slot parents when the chain crosses
/// shadow roots, so the walk sees the flattened tree.
pub trait ScrollHost {
    type Handle: Clone + PartialEq;

    fn parent(&self, el: &Self::Handle) -> Option<Self::Handle>;
    fn style(&self, el: &Self::Handle) -> AncestorStyle;
    fn offsets(&self, el: &Self::Handle) -> ElementOffsets;
    /// The document body (target for `position: fixed` elements).
    fn body(&self) -> Self::Handle;
    /// The document scrolling element (fallback when no ancestor scrolls).
    fn scrolling_element(&self) -> Self::Handle;
}

/// The nearest vertically and horizontally scrollable ancestors. They may be
/// the same node.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollParents<H> {
    pub vertical: H,
    pub horizontal: H,
}

/// A scroll command for the host: which ancestor, and to what offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollAction<H> {
    pub target: H,
    pub top: Option<f64>,
    pub left: Option<f64>,
}

#[derive(Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}

fn scroll_parent_on<H: ScrollHost>(
    host: &H,
    el: &H::Handle,
    axis: Axis,
    include_hidden: bool,
) -> H::Handle {
    let style = host.style(el);
    if style.position == Position::Fixed {
        return host.body();
    }
    let exclude_static = style.position == Position::Absolute;

    let mut current = el.clone();
    while let Some(parent) = host.parent(&current) {
        let parent_style = host.style(&parent);
        current = parent.clone();

        if exclude_static && parent_style.position == Position::Static {
            continue;
        }
        let overflow = match axis {
            Axis::Vertical => parent_style.overflow_y,
            Axis::Horizontal => parent_style.overflow_x,
        };
        if overflow.scrolls(include_hidden) {
            return parent;
        }
    }

    host.scrolling_element()
}

/// Locates the nearest vertical and horizontal scroll ancestors of `el`.
pub fn scroll_parents<H: ScrollHost>(
    host: &H,
    el: &H::Handle,
    include_hidden: bool,
) -> ScrollParents<H::Handle> {
    ScrollParents {
        vertical: scroll_parent_on(host, el, Axis::Vertical, include_hidden),
        horizontal: scroll_parent_on(host, el, Axis::Horizontal, include_hidden),
    }
}

/// Computes the scroll actions that bring `index` to the top-left of the
/// grid, offset by the container's padding and border.
///
/// One action is emitted when the vertical and horizontal ancestors
/// coincide, otherwise one per ancestor. Ancestors clamp out-of-range
/// offsets themselves; out-of-range indices are not an error.
pub fn scroll_to_actions<H: ScrollHost>(
    host: &H,
    root: &H::Handle,
    layout: &GridLayout,
    m: &ResizeMeasurement,
    index: usize,
    include_hidden: bool,
) -> Vec<ScrollAction<H::Handle>> {
    let parents = scroll_parents(host, root, include_hidden);
    let offset = item_offset(index, m);

    let root_offsets = host.offsets(root);
    let vertical_offsets = host.offsets(&parents.vertical);
    let horizontal_offsets = host.offsets(&parents.horizontal);

    let padding_top = parse_px(&layout.styles.padding_top);
    let border_top = parse_px(&layout.styles.border_top);
    let padding_left = parse_px(&layout.styles.padding_left);
    let border_left = parse_px(&layout.styles.border_left);

    let top = offset.y + (root_offsets.top - vertical_offsets.top) + padding_top + border_top;
    let left =
        offset.x + (root_offsets.left - horizontal_offsets.left) + padding_left + border_left;

    if parents.vertical == parents.horizontal {
        vec![ScrollAction {
            target: parents.vertical,
            top: Some(top),
            left: Some(left),
        }]
    } else {
        vec![
            ScrollAction {
                target: parents.vertical,
                top: Some(top),
                left: None,
            },
            ScrollAction {
                target: parents.horizontal,
                top: None,
                left: Some(left),
            },
        ]
    }
}
