//! Adapter utilities for the `scrollgrid` crate.
//!
//! The `scrollgrid` crate plans page fetches but never awaits them. This
//! crate supplies the missing half:
//!
//! - [`PageFetcher`]: runs released page requests against the provider and
//!   yields epoch-tagged responses, in whatever order they resolve
//! - [`GridController`]: a framework-neutral wrapper bundling a
//!   [`GridPipeline`](scrollgrid::GridPipeline) with a fetcher, for hosts
//!   that want a single object to drive from their event handlers
//!
//! This crate is intentionally framework-agnostic (no DOM or UI bindings);
//! it only depends on the `futures` primitives, so it runs on any executor.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod fetcher;


pub use controller::GridController;
pub use fetcher::PageFetcher;
