//! Change notifications emitted by the collection store.

use std::sync::Arc;

use horizon_recycler_core::logging::targets;
use horizon_recycler_core::{ConnectionId, Signal};

/// A single change notification.
///
/// Single-item changes are ranges with a `count` of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemChange {
    /// `count` items were inserted starting at `position`.
    RangeInserted {
        /// Position of the first inserted item.
        position: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// `count` items were removed starting at `position`.
    RangeRemoved {
        /// Former position of the first removed item.
        position: usize,
        /// Number of removed items.
        count: usize,
    },
    /// The item at `from` now lives at `to`.
    Moved {
        /// Position before the move.
        from: usize,
        /// Position after the move.
        to: usize,
    },
    /// `count` items starting at `position` were replaced in place.
    RangeChanged {
        /// Position of the first replaced item.
        position: usize,
        /// Number of replaced items.
        count: usize,
    },
    /// Anything may have changed; the surface should rebind everything.
    DataSetChanged,
}

impl ItemChange {
    /// A single-item insertion.
    pub fn inserted(position: usize) -> Self {
        Self::RangeInserted { position, count: 1 }
    }

    /// A single-item removal.
    pub fn removed(position: usize) -> Self {
        Self::RangeRemoved { position, count: 1 }
    }

    /// A single-item in-place change.
    pub fn changed(position: usize) -> Self {
        Self::RangeChanged { position, count: 1 }
    }
}

/// Collection of signals emitted by the collection store.
///
/// The rendering surface connects to these to stay synchronized with the
/// collection. Every notification is emitted synchronously, before the
/// mutating call returns.
#[derive(Debug, Default)]
pub struct AdapterSignals {
    /// Emitted after items have been inserted.
    /// Args: (position, count)
    pub item_range_inserted: Signal<(usize, usize)>,

    /// Emitted when items are removed.
    /// Args: (position, count)
    pub item_range_removed: Signal<(usize, usize)>,

    /// Emitted after an item has been moved.
    /// Args: (from, to)
    pub item_moved: Signal<(usize, usize)>,

    /// Emitted after items have been replaced in place.
    /// Args: (position, count)
    pub item_range_changed: Signal<(usize, usize)>,

    /// Emitted after a change too broad to describe positionally.
    pub data_set_changed: Signal<()>,
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches `change` to the signal for its kind.
    pub fn emit(&self, change: ItemChange) {
        tracing::trace!(target: targets::STORE, ?change, "notify");
        match change {
            ItemChange::RangeInserted { position, count } => {
                self.item_range_inserted.emit((position, count));
            }
            ItemChange::RangeRemoved { position, count } => {
                self.item_range_removed.emit((position, count));
            }
            ItemChange::Moved { from, to } => self.item_moved.emit((from, to)),
            ItemChange::RangeChanged { position, count } => {
                self.item_range_changed.emit((position, count));
            }
            ItemChange::DataSetChanged => self.data_set_changed.emit(()),
        }
    }

    /// Connects one closure to every signal, receiving each notification as
    /// an [`ItemChange`].
    pub fn observe<F>(&self, observer: F) -> SignalObserver
    where
        F: Fn(ItemChange) + Send + Sync + 'static,
    {
        let observer = Arc::new(observer);

        let f = observer.clone();
        let inserted = self
            .item_range_inserted
            .connect(move |&(position, count)| f(ItemChange::RangeInserted { position, count }));
        let f = observer.clone();
        let removed = self
            .item_range_removed
            .connect(move |&(position, count)| f(ItemChange::RangeRemoved { position, count }));
        let f = observer.clone();
        let moved = self
            .item_moved
            .connect(move |&(from, to)| f(ItemChange::Moved { from, to }));
        let f = observer.clone();
        let changed = self
            .item_range_changed
            .connect(move |&(position, count)| f(ItemChange::RangeChanged { position, count }));
        let f = observer;
        let reset = self.data_set_changed.connect(move |_| f(ItemChange::DataSetChanged));

        SignalObserver {
            ids: [inserted, removed, moved, changed, reset],
        }
    }
}

/// Connection ids created by [`AdapterSignals::observe`].
#[derive(Debug, Clone, Copy)]
pub struct SignalObserver {
    ids: [ConnectionId; 5],
}

impl SignalObserver {
    /// Disconnects the observer from every signal it was connected to.
    pub fn disconnect(self, signals: &AdapterSignals) {
        let [inserted, removed, moved, changed, reset] = self.ids;
        signals.item_range_inserted.disconnect(inserted);
        signals.item_range_removed.disconnect(removed);
        signals.item_moved.disconnect(moved);
        signals.item_range_changed.disconnect(changed);
        signals.data_set_changed.disconnect(reset);
    }
}
