//! Stable render-buffer merge.
//!
//! The buffer keeps an item's sequence position for as long as that item is
//! required, so keyed views downstream reuse their materialized nodes
//! instead of recreating them on every scroll tick.

use crate::BufferItem;

/// Merges a newly computed visible set into the previous buffer.
///
/// Slots whose item is still visible stay put. Slots freed by items that
/// scrolled out are overwritten in place by incoming items; leftover free
/// slots are dropped and leftover incoming items are appended.
///
/// Equality is deep: the same index with a different transform counts as a
/// new item, because the geometry changed underneath it.
pub fn merge_buffer<T: Clone + PartialEq>(
    buffer: Vec<BufferItem<T>>,
    visible: Vec<BufferItem<T>>,
) -> Vec<BufferItem<T>> {
    let to_add: Vec<&BufferItem<T>> = visible.iter().filter(|v| !buffer.contains(v)).collect();

    let mut next_replacement = 0usize;
    let mut merged: Vec<BufferItem<T>> = Vec::with_capacity(buffer.len().max(visible.len()));
    for item in &buffer {
        if visible.contains(item) {
            merged.push(item.clone());
        } else if next_replacement < to_add.len() {
            // Free slot: reuse it for the next incoming item.
            merged.push(to_add[next_replacement].clone());
            next_replacement += 1;
        }
        // Free slot with nothing left to host: dropped.
    }

    for item in &to_add[next_replacement..] {
        merged.push((*item).clone());
    }

    merged
}
