//! The paged data-provider contract.
//!
//! The core never awaits: it plans and deduplicates [`PageRequest`]s and
//! folds [`PageResponse`]s. Awaiting the provider happens in an adapter
//! (see the `scrollgrid-adapter` crate), which tags each resolution with
//! the epoch of the request that produced it.
//!
//! [`PageRequest`]: crate::PageRequest
//! [`PageResponse`]: crate::PageResponse

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Opaque provider failure. The pipeline drops failed pages; their cells
/// stay [`Unknown`](crate::Slot::Unknown) for the current provider epoch.
pub type PageError = Box<dyn std::error::Error + Send + Sync>;

/// The eventual result of one provider call.
pub type PageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Vec<T>, PageError>> + Send + 'a>>;

/// An asynchronous source of item pages.
///
/// Provider identity (the `Arc` pointer handed to the pipeline) acts as a
/// cache epoch: replacing it invalidates every memoized page and resets the
/// master array. Providers are never compared structurally.
pub trait PageProvider<T>: Send + Sync {
    /// Fetches one page. Called at most once per
    /// `(page_number, page_size, provider identity)` triple.
    fn load(&self, page_number: usize, page_size: usize) -> PageFuture<'_, T>;
}

impl<T, F> PageProvider<T> for F
where
    F: Fn(usize, usize) -> PageFuture<'static, T> + Send + Sync,
{
    fn load(&self, page_number: usize, page_size: usize) -> PageFuture<'_, T> {
        self(page_number, page_size)
    }
}

/// Convenience for providers backed by an in-memory slice of the full
/// dataset; mostly useful in examples and tests.
pub fn provider_from_vec<T: Clone + Send + Sync + 'static>(
    items: Vec<T>,
) -> Arc<dyn PageProvider<T>> {
    let items = Arc::new(items);
    Arc::new(move |page_number: usize, page_size: usize| {
        let items = Arc::clone(&items);
        Box::pin(async move {
            let start = (page_number * page_size).min(items.len());
            let end = (start + page_size).min(items.len());
            Ok(items[start..end].to_vec())
        }) as PageFuture<'static, T>
    })
}
