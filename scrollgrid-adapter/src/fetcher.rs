//! The async half of the page pipeline.

use std::sync::Arc;

use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;

use scrollgrid::{ItemsByPage, PageError, PageProvider, PageRequest, PageResponse};

type InFlight<T> = BoxFuture<'static, (PageRequest, Result<Vec<T>, PageError>)>;

/// Runs released page requests against the provider and yields epoch-tagged
/// responses as they resolve.
///
/// Resolution order is unspecified; the pipeline's master-array fold
/// tolerates reordering, and its epoch check drops resolutions that outlive
/// their provider. Failed pages are logged and skipped: their cells stay
/// unknown for the current provider epoch.
pub struct PageFetcher<T> {
    in_flight: FuturesUnordered<InFlight<T>>,
}

impl<T: Send + 'static> PageFetcher<T> {
    pub fn new() -> Self {
        Self {
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Starts one provider call. The provider `Arc` is moved into the
    /// future, so a later provider swap does not cancel it; the stale
    /// epoch tag makes the eventual resolution a no-op downstream.
    pub fn submit(&mut self, provider: Arc<dyn PageProvider<T>>, request: PageRequest) {
        sgadebug!(
            page_number = request.page_number,
            page_size = request.page_size,
            epoch = request.epoch,
            "submitting page request"
        );
        self.in_flight.push(Box::pin(async move {
            let result = provider.load(request.page_number, request.page_size).await;
            (request, result)
        }));
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Waits for the next successful resolution, or `None` once every
    /// in-flight call has completed.
    pub async fn next_response(&mut self) -> Option<PageResponse<T>> {
        while let Some((request, result)) = self.in_flight.next().await {
            match result {
                Ok(items) => {
                    return Some(PageResponse {
                        epoch: request.epoch,
                        page: ItemsByPage {
                            page_number: request.page_number,
                            items,
                        },
                    });
                }
                // Terminal for this page in this epoch; a new provider
                // reference is the recovery path.
                #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
                Err(error) => {
                    sgawarn!(
                        page_number = request.page_number,
                        epoch = request.epoch,
                        %error,
                        "page request failed"
                    );
                }
            }
        }
        None
    }
}

impl<T: Send + 'static> Default for PageFetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}
