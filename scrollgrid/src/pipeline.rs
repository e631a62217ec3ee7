//! The measurement-and-buffering pipeline.
//!
//! [`GridPipeline`] is the composition of every stage in this crate: the
//! host feeds it geometry and scroll events plus page responses, and reads
//! back the render buffer, the content size, page requests to run, and
//! scroll actions. It is intentionally UI- and IO-free:
//!
//! - No element tree: the host hands over [`GridLayout`] snapshots and a
//!   [`ScrollHost`] when resolving scroll-to.
//! - No clock: event entry points carry `now_ms`, and debounce is evaluated
//!   when the host polls [`GridPipeline::take_page_requests`].
//! - No awaiting: provider calls are planned here and run by an adapter.
//!
//! Internally each derived value is republished only when it deeply changed
//! (`SpaceBehindWindow`, `ResizeMeasurement`, `BufferMeta`), so a scroll
//! tick that lands in the same buffer window costs two comparisons and no
//! downstream work.

use core::cell::Cell;
use std::collections::{BTreeSet, HashSet};
use std::mem;
use std::sync::Arc;

use crate::layout::{self, buffer_meta, visible_items, visible_page_range};
use crate::master::accumulate;
use crate::measure::{GridLayout, resize_measurement, space_behind_window};
use crate::provider::PageProvider;
use crate::scroll::{ScrollAction, ScrollHost, scroll_to_actions};
use crate::stable::merge_buffer;
use crate::types::{
    BufferItem, BufferMeta, ContentSize, ElementRect, ItemRect, PageRequest, PageResponse,
    ResizeMeasurement, Slot, SpaceBehindWindow, WindowSize,
};

/// A callback fired when a pipeline state update occurs.
pub type OnChangeCallback<T> = Arc<dyn Fn(&GridPipeline<T>) + Send + Sync>;

/// Configuration for [`GridPipeline`].
///
/// Cheap to clone: the provider is `Arc`-held, so hosts can tweak a few
/// fields and call [`GridPipeline::set_options`] without reallocating.
pub struct PipelineOptions<T> {
    /// Total item count of the logical sequence. Live-updatable.
    pub length: usize,
    /// Items per provider call.
    pub page_size: usize,
    /// The paged data source. Identity (`Arc` pointer) is the cache epoch.
    pub page_provider: Option<Arc<dyn PageProvider<T>>>,
    /// Quiet period before demanded pages are released, in milliseconds.
    /// `0` releases synchronously.
    pub page_provider_debounce_ms: u64,
    /// Inner size of the window the grid scrolls in.
    pub window: WindowSize,
    /// When set, a pending scroll-to target is re-resolved whenever the
    /// geometry or layout changes, not only when the target changes.
    pub respect_scroll_to_on_resize: bool,
    /// Treat `overflow: hidden` ancestors as scroll containers.
    pub include_hidden_overflow: bool,
    /// A disabled pipeline reports an empty buffer, a zero content size,
    /// and no page demands.
    pub enabled: bool,
    /// Fired after every coalesced state update.
    pub on_change: Option<OnChangeCallback<T>>,
}

impl<T> PipelineOptions<T> {
    pub fn new(length: usize, page_size: usize) -> Self {
        Self {
            length,
            page_size,
            page_provider: None,
            page_provider_debounce_ms: 0,
            window: WindowSize::default(),
            respect_scroll_to_on_resize: false,
            include_hidden_overflow: false,
            enabled: true,
            on_change: None,
        }
    }

    pub fn with_page_provider(mut self, provider: Arc<dyn PageProvider<T>>) -> Self {
        self.page_provider = Some(provider);
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.page_provider_debounce_ms = debounce_ms;
        self
    }

    pub fn with_window(mut self, window: WindowSize) -> Self {
        self.window = window;
        self
    }

    pub fn with_respect_scroll_to_on_resize(mut self, respect: bool) -> Self {
        self.respect_scroll_to_on_resize = respect;
        self
    }

    pub fn with_include_hidden_overflow(mut self, include_hidden: bool) -> Self {
        self.include_hidden_overflow = include_hidden;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&GridPipeline<T>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }
}

impl<T> Clone for PipelineOptions<T> {
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            page_size: self.page_size,
            page_provider: self.page_provider.clone(),
            page_provider_debounce_ms: self.page_provider_debounce_ms,
            window: self.window,
            respect_scroll_to_on_resize: self.respect_scroll_to_on_resize,
            include_hidden_overflow: self.include_hidden_overflow,
            enabled: self.enabled,
            on_change: self.on_change.clone(),
        }
    }
}

impl<T> core::fmt::Debug for PipelineOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("length", &self.length)
            .field("page_size", &self.page_size)
            .field("has_page_provider", &self.page_provider.is_some())
            .field("page_provider_debounce_ms", &self.page_provider_debounce_ms)
            .field("window", &self.window)
            .field(
                "respect_scroll_to_on_resize",
                &self.respect_scroll_to_on_resize,
            )
            .field("include_hidden_overflow", &self.include_hidden_overflow)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// The headless grid pipeline.
///
/// Inputs arrive through setters and `apply_*` event methods; every entry
/// point runs one coalesced recompute pass and fires `on_change` at most
/// once (see [`GridPipeline::batch_update`]).
pub struct GridPipeline<T> {
    options: PipelineOptions<T>,

    layout: Option<GridLayout>,
    last_rect: Option<ElementRect>,
    item_rect: Option<ItemRect>,
    scroll_to: Option<usize>,

    space: SpaceBehindWindow,
    measurement: Option<ResizeMeasurement>,
    meta: Option<BufferMeta>,

    all_items: Vec<Slot<T>>,
    buffer: Vec<BufferItem<T>>,

    epoch: u64,
    /// `(page_number, page_size)` pairs released in the current epoch.
    requested: HashSet<(usize, usize)>,
    /// Pages demanded but still inside the debounce quiet period.
    pending: BTreeSet<usize>,
    ready: Vec<PageRequest>,
    demand_stamp: Option<u64>,
    demand_restamped: bool,
    demand_dirty: bool,
    items_dirty: bool,

    scroll_to_armed: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T: Clone + PartialEq> GridPipeline<T> {
    pub fn new(options: PipelineOptions<T>) -> Self {
        sgdebug!(
            length = options.length,
            page_size = options.page_size,
            enabled = options.enabled,
            "GridPipeline::new"
        );
        let mut pipeline = Self {
            options,
            layout: None,
            last_rect: None,
            item_rect: None,
            scroll_to: None,
            space: SpaceBehindWindow::default(),
            measurement: None,
            meta: None,
            all_items: Vec::new(),
            buffer: Vec::new(),
            epoch: 0,
            requested: HashSet::new(),
            pending: BTreeSet::new(),
            ready: Vec::new(),
            demand_stamp: None,
            demand_restamped: false,
            demand_dirty: true,
            items_dirty: false,
            scroll_to_armed: false,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        pipeline.refresh();
        pipeline
    }

    pub fn options(&self) -> &PipelineOptions<T> {
        &self.options
    }

    /// Replaces the whole option record, diffing what needs to be redone.
    ///
    /// A changed provider identity acts as an epoch barrier: memoized pages
    /// are abandoned, the master array is cleared, and the pages of the
    /// current buffer window are demanded again.
    pub fn set_options(&mut self, options: PipelineOptions<T>) {
        let provider_changed = !provider_identity_eq(
            self.options.page_provider.as_ref(),
            options.page_provider.as_ref(),
        );
        let demand_inputs_changed = self.options.length != options.length
            || self.options.page_size != options.page_size
            || self.options.window != options.window;
        self.options = options;
        sgtrace!(
            length = self.options.length,
            page_size = self.options.page_size,
            provider_changed,
            "GridPipeline::set_options"
        );

        if provider_changed {
            self.reset_epoch();
        } else if demand_inputs_changed {
            self.demand_dirty = true;
        }
        self.sync();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`GridPipeline::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut PipelineOptions<T>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&GridPipeline<T>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.demand_dirty = true;
        self.items_dirty = true;
        self.sync();
    }

    pub fn length(&self) -> usize {
        self.options.length
    }

    pub fn set_length(&mut self, length: usize) {
        if self.options.length == length {
            return;
        }
        self.options.length = length;
        self.demand_dirty = true;
        self.sync();
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if self.options.page_size == page_size {
            return;
        }
        self.options.page_size = page_size;
        self.demand_dirty = true;
        self.sync();
    }

    /// Replaces the page provider. Identity is compared by `Arc` pointer;
    /// handing over a clone of the current `Arc` is a no-op.
    pub fn set_page_provider(&mut self, provider: Option<Arc<dyn PageProvider<T>>>) {
        if provider_identity_eq(self.options.page_provider.as_ref(), provider.as_ref()) {
            return;
        }
        self.options.page_provider = provider;
        self.reset_epoch();
        self.sync();
    }

    pub fn set_debounce_ms(&mut self, debounce_ms: u64) {
        if self.options.page_provider_debounce_ms == debounce_ms {
            return;
        }
        self.options.page_provider_debounce_ms = debounce_ms;
        self.sync();
    }

    pub fn set_window_size(&mut self, window: WindowSize) {
        if self.options.window == window {
            return;
        }
        self.options.window = window;
        self.demand_dirty = true;
        self.sync();
    }

    pub fn set_respect_scroll_to_on_resize(&mut self, respect: bool) {
        self.options.respect_scroll_to_on_resize = respect;
        self.notify();
    }

    /// Sets (or clears) the scroll-to target. A new target arms resolution;
    /// the action is computed by [`GridPipeline::resolve_scroll_actions`]
    /// against the geometry current at that moment.
    pub fn set_scroll_to(&mut self, scroll_to: Option<usize>) {
        if self.scroll_to == scroll_to {
            return;
        }
        self.scroll_to = scroll_to;
        self.scroll_to_armed = scroll_to.is_some();
        self.sync();
    }

    pub fn scroll_to(&self) -> Option<usize> {
        self.scroll_to
    }

    /// Applies a container (re)layout: new bounding rect plus resolved
    /// styles. `now_ms` stamps the page-demand quiet period.
    pub fn apply_resize(&mut self, layout: GridLayout, now_ms: u64) {
        sgtrace!(
            left = layout.rect.left,
            top = layout.rect.top,
            now_ms,
            "apply_resize"
        );
        self.last_rect = Some(layout.rect);
        self.layout = Some(layout);
        // A relayout re-arms a pending target even when the derived
        // measurement comes out identical (the container may have moved).
        if self.options.respect_scroll_to_on_resize && self.scroll_to.is_some() {
            self.scroll_to_armed = true;
        }
        self.sync();
        self.stamp_demand(now_ms);
    }

    /// Applies a scroll tick: the container's latest viewport-relative rect.
    pub fn apply_scroll(&mut self, rect: ElementRect, now_ms: u64) {
        sgtrace!(left = rect.left, top = rect.top, now_ms, "apply_scroll");
        self.last_rect = Some(rect);
        self.sync();
        self.stamp_demand(now_ms);
    }

    /// Updates the representative item rect (as observed by the host).
    pub fn set_item_rect(&mut self, item_rect: ItemRect) {
        if self.item_rect == Some(item_rect) {
            return;
        }
        self.item_rect = Some(item_rect);
        self.sync();
    }

    /// Folds a resolved page into the master array.
    ///
    /// Responses tagged with a stale epoch are dropped: they originate from
    /// a provider that has since been replaced. In-flight resolutions are
    /// folded even while the pipeline is disabled; the buffer stays empty
    /// until it is enabled again.
    pub fn apply_page_response(&mut self, response: PageResponse<T>) {
        if response.epoch != self.epoch {
            sgwarn!(
                response_epoch = response.epoch,
                current_epoch = self.epoch,
                page_number = response.page.page_number,
                "dropping stale page response"
            );
            return;
        }
        sgtrace!(
            page_number = response.page.page_number,
            items = response.page.items.len(),
            "apply_page_response"
        );
        accumulate(
            &mut self.all_items,
            response.page,
            self.options.length,
            self.options.page_size,
        );
        self.items_dirty = true;
        self.sync();
    }

    /// Drains the released page requests, advancing the debounce clock to
    /// `now_ms` first. With a non-zero debounce, demands are released on the
    /// trailing edge of the quiet period; any demand change restarts it.
    pub fn take_page_requests(&mut self, now_ms: u64) -> Vec<PageRequest> {
        self.stamp_demand(now_ms);
        if !self.pending.is_empty() {
            if let Some(stamp) = self.demand_stamp {
                if now_ms.saturating_sub(stamp) >= self.options.page_provider_debounce_ms {
                    self.release_pending();
                }
            }
        }
        mem::take(&mut self.ready)
    }

    /// Whether a scroll-to target is waiting to be resolved.
    pub fn needs_scroll_resolution(&self) -> bool {
        self.scroll_to_armed
            && self.scroll_to.is_some()
            && self.layout.is_some()
            && self.measurement.is_some()
    }

    /// Resolves the armed scroll-to target into scroll actions, sampling the
    /// latest geometry. Emissions are coalesced: however many times the
    /// target (or, with `respect_scroll_to_on_resize`, the geometry) changed
    /// since the last call, at most one resolution comes out.
    pub fn resolve_scroll_actions<H: ScrollHost>(
        &mut self,
        host: &H,
        root: &H::Handle,
    ) -> Vec<ScrollAction<H::Handle>> {
        if !self.needs_scroll_resolution() {
            return Vec::new();
        }
        let index = match self.scroll_to {
            Some(index) => index,
            None => return Vec::new(),
        };
        let (layout, measurement) = match (&self.layout, &self.measurement) {
            (Some(layout), Some(measurement)) => (layout, measurement),
            _ => return Vec::new(),
        };
        self.scroll_to_armed = false;
        sgdebug!(index, "resolving scroll-to");
        scroll_to_actions(
            host,
            root,
            layout,
            measurement,
            index,
            self.options.include_hidden_overflow,
        )
    }

    // ---- outputs ----

    /// The stable render buffer.
    pub fn buffer(&self) -> &[BufferItem<T>] {
        &self.buffer
    }

    /// Flow-axis extent of the logical content, for the host's spacer.
    pub fn content_size(&self) -> ContentSize {
        if !self.options.enabled {
            return ContentSize::default();
        }
        match &self.measurement {
            Some(m) => layout::content_size(m, self.options.length),
            None => ContentSize::default(),
        }
    }

    // ---- intermediate snapshots ----

    pub fn space_behind_window(&self) -> SpaceBehindWindow {
        self.space
    }

    pub fn resize_measurement(&self) -> Option<ResizeMeasurement> {
        self.measurement
    }

    pub fn buffer_meta(&self) -> Option<BufferMeta> {
        self.meta
    }

    pub fn all_items(&self) -> &[Slot<T>] {
        &self.all_items
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn has_pending_demand(&self) -> bool {
        !self.pending.is_empty() || !self.ready.is_empty()
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    // ---- internals ----

    fn sync(&mut self) {
        self.refresh();
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    fn reset_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        sgdebug!(epoch = self.epoch, "provider changed, resetting epoch");
        self.requested.clear();
        self.pending.clear();
        self.ready.clear();
        self.demand_stamp = None;
        self.demand_restamped = false;
        self.all_items.clear();
        self.demand_dirty = true;
        // The buffer is left untouched: stale entries keep their slots and
        // are overwritten as the new epoch's pages fold in.
    }

    /// One recompute pass in topological order, republishing each derived
    /// value only when it deeply changed.
    fn refresh(&mut self) {
        if !self.options.enabled {
            self.meta = None;
            self.buffer.clear();
            self.pending.clear();
            // Released but undrained requests are dropped here, so their
            // pages must leave the memo set to be demanded again later.
            for request in mem::take(&mut self.ready) {
                self.requested.remove(&(request.page_number, request.page_size));
            }
            self.demand_stamp = None;
            self.demand_restamped = false;
            return;
        }

        if let Some(rect) = &self.last_rect {
            let space = space_behind_window(rect);
            if space != self.space {
                self.space = space;
            }
        }

        let measurement = match (&self.layout, &self.item_rect) {
            (Some(layout), Some(item)) => Some(resize_measurement(&layout.styles, item)),
            _ => None,
        };
        let measurement_changed = measurement != self.measurement;
        if measurement_changed {
            self.measurement = measurement;
            if self.options.respect_scroll_to_on_resize && self.scroll_to.is_some() {
                self.scroll_to_armed = true;
            }
        }

        let meta = self
            .measurement
            .as_ref()
            .map(|m| buffer_meta(&self.options.window, &self.space, m));
        let meta_changed = meta != self.meta;
        if meta_changed {
            self.meta = meta;
        }

        if meta_changed || self.demand_dirty {
            self.plan_demand();
            self.demand_dirty = false;
        }

        if meta_changed || measurement_changed || self.items_dirty {
            let visible = match (&self.meta, &self.measurement) {
                (Some(meta), Some(m)) => visible_items(meta, m, &self.all_items),
                _ => Vec::new(),
            };
            self.buffer = merge_buffer(mem::take(&mut self.buffer), visible);
            self.items_dirty = false;
        }
    }

    /// Recomputes the set of pages the current buffer window needs and has
    /// not been requested in this epoch. A change restarts the debounce
    /// quiet period; with a zero debounce the demand is released in place.
    fn plan_demand(&mut self) {
        let needed: BTreeSet<usize> = match (&self.meta, &self.options.page_provider) {
            (Some(meta), Some(_)) => {
                visible_page_range(meta, self.options.length, self.options.page_size)
                    .filter(|page| !self.requested.contains(&(*page, self.options.page_size)))
                    .collect()
            }
            _ => BTreeSet::new(),
        };

        if needed != self.pending {
            sgtrace!(pages = needed.len(), "page demand changed");
            self.pending = needed;
            self.demand_restamped = true;
        }

        if self.options.page_provider_debounce_ms == 0 {
            self.release_pending();
        }
    }

    fn release_pending(&mut self) {
        if self.pending.is_empty() {
            self.demand_stamp = None;
            self.demand_restamped = false;
            return;
        }
        let page_size = self.options.page_size;
        for page_number in mem::take(&mut self.pending) {
            self.requested.insert((page_number, page_size));
            self.ready.push(PageRequest {
                epoch: self.epoch,
                page_number,
                page_size,
            });
        }
        sgdebug!(released = self.ready.len(), "released page demand");
        self.demand_stamp = None;
        self.demand_restamped = false;
    }

    fn stamp_demand(&mut self, now_ms: u64) {
        if self.demand_restamped {
            self.demand_stamp = Some(now_ms);
            self.demand_restamped = false;
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for GridPipeline<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridPipeline")
            .field("options", &self.options)
            .field("space", &self.space)
            .field("measurement", &self.measurement)
            .field("meta", &self.meta)
            .field("all_items_len", &self.all_items.len())
            .field("buffer_len", &self.buffer.len())
            .field("epoch", &self.epoch)
            .field("pending_pages", &self.pending.len())
            .finish_non_exhaustive()
    }
}

fn provider_identity_eq<T>(
    a: Option<&Arc<dyn PageProvider<T>>>,
    b: Option<&Arc<dyn PageProvider<T>>>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}
