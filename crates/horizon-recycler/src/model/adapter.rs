//! The adapter facade handed to the rendering surface.

use std::any::Any;

use horizon_recycler_core::logging::targets;

use super::config::AdapterConfig;
use super::item::{Directions, ItemRef, ItemType, ViewHolder};
use super::signals::AdapterSignals;
use super::span::SpanSizeLookup;
use super::store::ItemStore;
use super::touch::{DragSession, MovementFlags, TouchController};
use crate::error::Result;

/// What a surface needs to know to start delivering drag and swipe gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchOptions {
    /// Start drags on long press.
    pub long_press_drag_enabled: bool,
    /// Allow swipes to start anywhere on the item view.
    pub item_view_swipe_enabled: bool,
}

/// The view-recycling container that displays an adapter.
///
/// The surface owns gesture recognition. Once
/// [`attach_item_touch`](Self::attach_item_touch) has been called it is
/// expected to report gestures back through [`RecyclerAdapter::on_move`],
/// [`RecyclerAdapter::on_swiped`] and [`RecyclerAdapter::on_drag_end`], and
/// to query [`RecyclerAdapter::movement_flags`] before starting one.
pub trait RecyclerSurface {
    /// Starts routing drag and swipe gestures to the adapter.
    fn attach_item_touch(&mut self, options: TouchOptions);
}

/// Binds a mutable, heterogeneous item collection to a rendering surface.
///
/// `RecyclerAdapter` pairs an [`ItemStore`] with a [`TouchController`]. The
/// surface queries it for counts, types, views and spans, and reports user
/// gestures to it; the adapter mutates the store and the store notifies the
/// surface through [`signals`](Self::signals).
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use horizon_recycler::model::{AdapterConfig, BindingItem, Directions, RecyclerAdapter};
///
/// struct Task(&'static str);
///
/// impl BindingItem for Task {
///     type View = String;
///     fn create_view(_parent: &dyn Any) -> String { String::new() }
///     fn bind(&self, view: &mut String, _position: usize) { *view = self.0.into(); }
///     fn drag_dirs(&self) -> Directions { Directions::VERTICAL }
/// }
///
/// let mut adapter = RecyclerAdapter::new(AdapterConfig::default());
/// adapter.set_drag_listener(true, |_item, from, to| println!("dropped {from} -> {to}"));
/// adapter.add(Arc::new(Task("write")));
/// adapter.add(Arc::new(Task("review")));
///
/// assert!(adapter.on_move(0, 1));
/// adapter.on_drag_end(); // prints "dropped 0 -> 1"
///
/// let mut holder = adapter.create_view_for(adapter.item_type(0), &());
/// adapter.bind(&mut holder, 0);
/// assert_eq!(holder.downcast_ref::<String>().unwrap(), "review");
/// ```
#[derive(Debug)]
pub struct RecyclerAdapter {
    store: ItemStore,
    touch: TouchController,
    config: AdapterConfig,
}

impl Default for RecyclerAdapter {
    fn default() -> Self {
        Self::new(AdapterConfig::default())
    }
}

impl RecyclerAdapter {
    /// Creates an empty adapter.
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_items(config, Vec::new())
    }

    /// Creates an adapter holding `items`.
    pub fn with_items(config: AdapterConfig, items: Vec<ItemRef>) -> Self {
        Self {
            store: ItemStore::with_items(items),
            touch: TouchController::new(config.drop_only),
            config,
        }
    }

    /// The configuration this adapter was created with.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The underlying collection.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// The change notification signals.
    pub fn signals(&self) -> &AdapterSignals {
        self.store.signals()
    }

    // -------------------------------------------------------------------------
    // Surface interface
    // -------------------------------------------------------------------------

    /// Number of items.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// The view type of the item at `position`.
    pub fn item_type(&self, position: usize) -> ItemType {
        self.store.item_type(position)
    }

    /// Creates a view for `item_type`. Panics if the type was never registered.
    pub fn create_view_for(&self, item_type: ItemType, parent: &dyn Any) -> ViewHolder {
        self.store.create_view_for(item_type, parent)
    }

    /// Creates a view for `item_type`, failing if the type was never registered.
    pub fn try_create_view_for(&self, item_type: ItemType, parent: &dyn Any) -> Result<ViewHolder> {
        self.store.try_create_view_for(item_type, parent)
    }

    /// Binds the item at `position` into `holder`.
    pub fn bind(&self, holder: &mut ViewHolder, position: usize) {
        self.store.bind(holder, position);
    }

    /// Grid span of the item at `position`.
    pub fn span_at(&self, position: usize) -> usize {
        self.store.span_size(position)
    }

    /// Called when the adapter is attached to `surface`.
    ///
    /// With `auto_attach_touch` enabled, asks the surface to start delivering
    /// gestures and returns `true`.
    pub fn on_attached(&mut self, surface: &mut dyn RecyclerSurface) -> bool {
        if !self.config.auto_attach_touch {
            tracing::debug!(target: targets::ADAPTER, "attached without touch handling");
            return false;
        }
        let options = TouchOptions {
            long_press_drag_enabled: self.config.long_press_drag_enabled,
            item_view_swipe_enabled: self.config.item_view_swipe_enabled,
        };
        tracing::debug!(target: targets::ADAPTER, ?options, "attaching touch handling");
        surface.attach_item_touch(options);
        true
    }

    // -------------------------------------------------------------------------
    // Collection mutations
    // -------------------------------------------------------------------------

    /// Appends an item.
    pub fn add(&mut self, item: ItemRef) {
        self.store.add(item);
    }

    /// Appends items as one block.
    pub fn add_all(&mut self, items: Vec<ItemRef>) {
        self.store.add_all(items);
    }

    /// Inserts an item at `position`.
    pub fn insert(&mut self, position: usize, item: ItemRef) -> Result<()> {
        self.store.insert(position, item)
    }

    /// Removes and returns the item at `position`.
    pub fn remove_at(&mut self, position: usize) -> Result<ItemRef> {
        self.store.remove_at(position)
    }

    /// Removes the first occurrence of `item`, returning where it was.
    pub fn remove(&mut self, item: &ItemRef) -> Option<usize> {
        self.store.remove(item)
    }

    /// Moves the item at `from` to `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.store.move_item(from, to)
    }

    /// Replaces the item at `index`, returning the previous one.
    pub fn swap(&mut self, index: usize, item: ItemRef) -> Result<ItemRef> {
        self.store.swap(index, item)
    }

    /// Replaces the whole collection.
    pub fn reset_items(&mut self, items: Vec<ItemRef>) {
        self.store.reset(items);
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Position of `item`, compared by identity.
    pub fn index_of(&self, item: &ItemRef) -> Option<usize> {
        self.store.index_of(item)
    }

    /// Position of the first item matching `predicate`.
    pub fn index_of_first<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&ItemRef) -> bool,
    {
        self.store.index_of_first(predicate)
    }

    /// The first item matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<&ItemRef>
    where
        P: FnMut(&ItemRef) -> bool,
    {
        self.store.find(predicate)
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Installs the swipe listener.
    pub fn set_swipe_listener<F>(&mut self, listener: F)
    where
        F: Fn(&ItemRef) + Send + Sync + 'static,
    {
        self.touch.set_swipe_listener(listener);
    }

    /// Removes the swipe listener.
    pub fn clear_swipe_listener(&mut self) {
        self.touch.clear_swipe_listener();
    }

    /// Installs the drag listener and its notification policy.
    pub fn set_drag_listener<F>(&mut self, drop_only: bool, listener: F)
    where
        F: Fn(&ItemRef, usize, usize) + Send + Sync + 'static,
    {
        self.touch.set_drag_listener(drop_only, listener);
    }

    /// Removes the drag listener.
    pub fn clear_drag_listener(&mut self) {
        self.touch.clear_drag_listener();
    }

    /// The current drag session.
    pub fn drag_session(&self) -> DragSession {
        self.touch.session()
    }

    /// Drag and swipe directions for the item at `position`.
    pub fn movement_flags(&self, position: usize) -> MovementFlags {
        self.touch.movement_flags(&self.store, position)
    }

    /// The dragged item at `source` passes over `target`.
    pub fn on_move(&mut self, source: usize, target: usize) -> bool {
        self.touch.on_move(&mut self.store, source, target)
    }

    /// The item at `index` was swiped away.
    pub fn on_swiped(&mut self, index: usize, direction: Directions) {
        self.touch.on_swiped(&mut self.store, index, direction);
    }

    /// The dragged item was dropped.
    pub fn on_drag_end(&mut self) {
        self.touch.on_drag_end(&self.store);
    }

    /// Abandons the current drag without notifying.
    pub fn cancel_drag(&mut self) {
        self.touch.cancel_drag();
    }
}

impl SpanSizeLookup for RecyclerAdapter {
    fn span_size(&self, position: usize) -> usize {
        self.store.span_size(position)
    }
}
