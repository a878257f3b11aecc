//! Grid span lookup.
//!
//! Grid layouts ask how many cells each position occupies. The answer comes
//! straight from the live collection on every call: items and their order
//! change between layout passes, so nothing here is cached.

use super::store::ItemStore;

/// Position to span-size projection for grid layouts.
///
/// Only [`span_size`](Self::span_size) is required. The provided methods
/// compute where a position lands in a grid of `span_count` columns by
/// walking every earlier position, so they cost O(position).
pub trait SpanSizeLookup {
    /// Number of grid cells the item at `position` occupies.
    fn span_size(&self, position: usize) -> usize;

    /// The column the item at `position` starts at.
    ///
    /// Items that do not fit in the remainder of a row wrap to column 0 of
    /// the next row. Span sizes are clamped to `1..=span_count`.
    fn span_index(&self, position: usize, span_count: usize) -> usize {
        let span_count = span_count.max(1);
        let size = clamp_span(self.span_size(position), span_count);
        let mut span = 0;
        for i in 0..position {
            let item_size = clamp_span(self.span_size(i), span_count);
            span += item_size;
            if span == span_count {
                span = 0;
            } else if span > span_count {
                span = item_size;
            }
        }
        if span + size <= span_count { span } else { 0 }
    }

    /// The row the item at `position` lands in.
    fn span_group_index(&self, position: usize, span_count: usize) -> usize {
        let span_count = span_count.max(1);
        let size = clamp_span(self.span_size(position), span_count);
        let mut span = 0;
        let mut group = 0;
        for i in 0..position {
            let item_size = clamp_span(self.span_size(i), span_count);
            span += item_size;
            if span == span_count {
                span = 0;
                group += 1;
            } else if span > span_count {
                span = item_size;
                group += 1;
            }
        }
        if span + size > span_count {
            group += 1;
        }
        group
    }
}

impl SpanSizeLookup for ItemStore {
    /// The span declared by the item currently at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= count()`.
    fn span_size(&self, position: usize) -> usize {
        self.items()[position].span()
    }
}

fn clamp_span(size: usize, span_count: usize) -> usize {
    size.clamp(1, span_count)
}
