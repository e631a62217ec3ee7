//! A headless measurement-and-buffering pipeline for virtual-scroll grids.
//!
//! For the async fetch loop that drives providers, see the
//! `scrollgrid-adapter` crate.
//!
//! This crate turns a huge logical item sequence into the small stable set
//! of positioned cells a CSS-grid-like view should actually render: it
//! measures the container, sizes the buffer window from scroll position,
//! plans deduplicated page fetches against a pluggable provider, folds the
//! responses into a sparse master array, and keeps buffer slots stable so
//! keyed views reuse their nodes across scroll ticks.
//!
//! It is UI- and IO-agnostic. A host layer is expected to provide:
//! - container layout snapshots (bounding rect plus resolved grid styles)
//! - scroll ticks as viewport-relative rects, stamped with a millisecond clock
//! - a representative item rect
//! - an executor that runs the planned page requests (see the adapter crate)
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod layout;
mod master;
mod measure;
mod pipeline;
mod provider;
mod scroll;
mod stable;
mod types;


pub use layout::{buffer_meta, content_size, item_offset, visible_items, visible_page_range};
pub use master::accumulate;
pub use measure::{
    GridLayout, GridStyles, grid_measurement, parse_px, resize_measurement, space_behind_window,
    track_count,
};
pub use pipeline::{GridPipeline, OnChangeCallback, PipelineOptions};
pub use provider::{PageError, PageFuture, PageProvider, provider_from_vec};
pub use scroll::{
    AncestorStyle, ElementOffsets, Overflow, Position, ScrollAction, ScrollHost, ScrollParents,
    scroll_parents, scroll_to_actions,
};
pub use stable::merge_buffer;
pub use types::{
    BufferItem, BufferMeta, ContentSize, ElementRect, Flow, GridMeasurement, ItemOffset, ItemRect,
    ItemStyle, ItemsByPage, PageRequest, PageResponse, ResizeMeasurement, Slot, SpaceBehindWindow,
    WindowSize,
};
