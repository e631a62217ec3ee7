use scrollgrid::{
    BufferItem, ContentSize, ElementRect, GridLayout, GridPipeline, ItemRect, PipelineOptions,
    ScrollAction, ScrollHost,
};

use crate::PageFetcher;

/// A framework-neutral controller bundling a [`GridPipeline`] with a
/// [`PageFetcher`].
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `on_resize` / `on_scroll` / `on_item_rect` when UI events occur
/// - `pump(now_ms)` each frame or timer tick, to move released page
///   requests into the fetcher
/// - `settle().await` (or one `apply_next_response().await` per turn) to
///   fold resolved pages back in
///
/// Provider calls started before a provider swap are left running; their
/// resolutions carry a stale epoch and are dropped by the pipeline.
pub struct GridController<T> {
    pipeline: GridPipeline<T>,
    fetcher: PageFetcher<T>,
}

impl<T: Clone + PartialEq + Send + 'static> GridController<T> {
    pub fn new(options: PipelineOptions<T>) -> Self {
        Self {
            pipeline: GridPipeline::new(options),
            fetcher: PageFetcher::new(),
        }
    }

    pub fn from_pipeline(pipeline: GridPipeline<T>) -> Self {
        Self {
            pipeline,
            fetcher: PageFetcher::new(),
        }
    }

    pub fn pipeline(&self) -> &GridPipeline<T> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut GridPipeline<T> {
        &mut self.pipeline
    }

    pub fn into_pipeline(self) -> GridPipeline<T> {
        self.pipeline
    }

    /// Call this when the container (re)lays out.
    pub fn on_resize(&mut self, layout: GridLayout, now_ms: u64) {
        self.pipeline.apply_resize(layout, now_ms);
    }

    /// Call this on each scroll tick of any scroll ancestor.
    pub fn on_scroll(&mut self, rect: ElementRect, now_ms: u64) {
        self.pipeline.apply_scroll(rect, now_ms);
    }

    /// Call this when the representative item's measured size changes.
    pub fn on_item_rect(&mut self, item_rect: ItemRect) {
        self.pipeline.set_item_rect(item_rect);
    }

    /// Moves released page requests into the fetcher. Returns the number of
    /// provider calls started.
    pub fn pump(&mut self, now_ms: u64) -> usize {
        let requests = self.pipeline.take_page_requests(now_ms);
        let provider = match &self.pipeline.options().page_provider {
            Some(provider) => provider.clone(),
            None => return 0,
        };
        let started = requests.len();
        for request in requests {
            self.fetcher.submit(provider.clone(), request);
        }
        started
    }

    /// Awaits one resolution and folds it in. Returns `false` when nothing
    /// is in flight.
    pub async fn apply_next_response(&mut self) -> bool {
        match self.fetcher.next_response().await {
            Some(response) => {
                self.pipeline.apply_page_response(response);
                true
            }
            None => false,
        }
    }

    /// Folds in every in-flight resolution.
    pub async fn settle(&mut self) {
        while self.apply_next_response().await {}
    }

    pub fn in_flight(&self) -> usize {
        self.fetcher.in_flight()
    }

    pub fn buffer(&self) -> &[BufferItem<T>] {
        self.pipeline.buffer()
    }

    pub fn content_size(&self) -> ContentSize {
        self.pipeline.content_size()
    }

    pub fn set_scroll_to(&mut self, scroll_to: Option<usize>) {
        self.pipeline.set_scroll_to(scroll_to);
    }

    pub fn resolve_scroll_actions<H: ScrollHost>(
        &mut self,
        host: &H,
        root: &H::Handle,
    ) -> Vec<ScrollAction<H::Handle>> {
        self.pipeline.resolve_scroll_actions(host, root)
    }
}
