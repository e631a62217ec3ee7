//! The sparse master array: every page response folds into it.

use crate::{ItemsByPage, Slot};

/// Folds one page response into the master array.
///
/// The array is first extended with `Unknown` cells up to `length`, the page
/// payload is normalized to exactly `page_size` cells (short pages padded
/// with `Unknown`, long pages truncated), the page's span is replaced, and
/// the tail is trimmed back to `length`.
///
/// After the fold `all_items.len() == length`. Folding the same page twice
/// is a no-op the second time; folds of disjoint pages commute.
pub fn accumulate<T>(
    all_items: &mut Vec<Slot<T>>,
    page: ItemsByPage<T>,
    length: usize,
    page_size: usize,
) {
    let ItemsByPage { page_number, items } = page;

    if all_items.len() < length {
        all_items.resize_with(length, || Slot::Unknown);
    }

    let mut normalized: Vec<Slot<T>> = items
        .into_iter()
        .take(page_size)
        .map(Slot::Known)
        .collect();
    normalized.resize_with(page_size, || Slot::Unknown);

    let start = (page_number * page_size).min(all_items.len());
    let end = (start + page_size).min(all_items.len());
    all_items.splice(start..end, normalized);

    all_items.truncate(length);
}
