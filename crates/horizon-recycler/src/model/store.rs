//! The authoritative ordered item collection.
//!
//! `ItemStore` owns the list of items shown by the rendering surface, keeps
//! the view type registry in step with it and turns every mutation into the
//! smallest change notification that describes it.
//!
//! # Threading
//!
//! The store is plain owned state with no internal locking. It is meant to
//! be driven from the rendering surface's UI thread only; notifications are
//! delivered synchronously on that thread before the mutating call returns.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use horizon_recycler_core::PerfSpan;
use horizon_recycler_core::logging::{span_names, targets};

use super::item::{ItemRef, ItemType, ViewHolder};
use super::registry::TypeRegistry;
use super::signals::{AdapterSignals, ItemChange};
use crate::error::{AdapterError, Result};

/// Ordered, index-addressable collection of heterogeneous items.
///
/// Items are compared by identity ([`Arc::ptr_eq`]), never by content. The
/// same reference may appear more than once; identity lookups return the
/// first match.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use horizon_recycler::model::{BindingItem, ItemRef, ItemStore};
///
/// struct Row(u32);
///
/// impl BindingItem for Row {
///     type View = u32;
///     fn create_view(_parent: &dyn Any) -> u32 { 0 }
///     fn bind(&self, view: &mut u32, _position: usize) { *view = self.0; }
/// }
///
/// let mut store = ItemStore::new();
/// store.signals().item_range_inserted.connect(|(position, count)| {
///     println!("{count} row(s) inserted at {position}");
/// });
///
/// let row: ItemRef = Arc::new(Row(7));
/// store.add(row.clone());
/// assert_eq!(store.index_of(&row), Some(0));
/// ```
pub struct ItemStore {
    items: Vec<ItemRef>,
    registry: TypeRegistry,
    signals: AdapterSignals,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            registry: TypeRegistry::new(),
            signals: AdapterSignals::new(),
        }
    }

    /// Creates a store holding `items`, registering their types.
    ///
    /// No notification is emitted; nothing can be connected yet.
    pub fn with_items(items: Vec<ItemRef>) -> Self {
        let mut store = Self::new();
        for item in &items {
            store.registry.record(item.as_ref());
        }
        store.items = items;
        store
    }

    /// The change notification signals of this store.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// Returns the number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items in display order.
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Iterates the items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ItemRef> {
        self.items.iter()
    }

    /// Returns the item at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&ItemRef> {
        self.items.get(position)
    }

    /// Whether a view factory is registered for `item_type`.
    pub fn is_registered(&self, item_type: ItemType) -> bool {
        self.registry.contains(item_type)
    }

    /// Number of distinct item types currently registered.
    pub fn registered_type_count(&self) -> usize {
        self.registry.len()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Appends an item to the end of the collection.
    pub fn add(&mut self, item: ItemRef) {
        self.registry.record(item.as_ref());
        self.items.push(item);
        let position = self.items.len() - 1;
        tracing::trace!(target: targets::STORE, position, "add");
        self.signals.emit(ItemChange::inserted(position));
    }

    /// Appends `items` as one contiguous block.
    ///
    /// Does nothing, and notifies nothing, when `items` is empty.
    pub fn add_all(&mut self, items: Vec<ItemRef>) {
        if items.is_empty() {
            return;
        }
        let _span = PerfSpan::new(span_names::BULK);
        for item in &items {
            self.registry.record(item.as_ref());
        }
        let position = self.items.len();
        let count = items.len();
        self.items.extend(items);
        tracing::trace!(target: targets::STORE, position, count, "add_all");
        self.signals.emit(ItemChange::RangeInserted { position, count });
    }

    /// Inserts an item at `position`, shifting later items back.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if `position > count()`.
    pub fn insert(&mut self, position: usize, item: ItemRef) -> Result<()> {
        if position > self.items.len() {
            return Err(AdapterError::out_of_range(position, self.items.len()));
        }
        self.registry.record(item.as_ref());
        self.items.insert(position, item);
        tracing::trace!(target: targets::STORE, position, "insert");
        self.signals.emit(ItemChange::inserted(position));
        Ok(())
    }

    /// Removes and returns the item at `position`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if `position >= count()`.
    pub fn remove_at(&mut self, position: usize) -> Result<ItemRef> {
        if position >= self.items.len() {
            return Err(AdapterError::out_of_range(position, self.items.len()));
        }
        let removed = self.items.remove(position);
        tracing::trace!(target: targets::STORE, position, "remove_at");
        self.signals.emit(ItemChange::removed(position));
        Ok(removed)
    }

    /// Removes the first occurrence of `item` (by identity).
    ///
    /// Returns the position it was removed from, or `None` (with no
    /// notification) if the item is not in the collection.
    pub fn remove(&mut self, item: &ItemRef) -> Option<usize> {
        let position = self.index_of(item)?;
        self.items.remove(position);
        tracing::trace!(target: targets::STORE, position, "remove");
        self.signals.emit(ItemChange::removed(position));
        Some(position)
    }

    /// Moves the item at `from` to `to` with a single rotation of the range
    /// between them.
    ///
    /// The end state equals removing the item and reinserting it at `to`.
    /// Does nothing when `from == to`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::InvalidArgument`] if either index is not an existing
    /// position.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(AdapterError::invalid_move(from, to, len));
        }
        if from == to {
            return Ok(());
        }
        if from < to {
            self.items[from..=to].rotate_left(1);
        } else {
            self.items[to..=from].rotate_right(1);
        }
        tracing::trace!(target: targets::STORE, from, to, "move");
        self.signals.emit(ItemChange::Moved { from, to });
        Ok(())
    }

    /// Replaces the item at `index` in place, returning the previous item.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if `index >= count()`.
    pub fn swap(&mut self, index: usize, item: ItemRef) -> Result<ItemRef> {
        if index >= self.items.len() {
            return Err(AdapterError::out_of_range(index, self.items.len()));
        }
        self.registry.record(item.as_ref());
        let previous = std::mem::replace(&mut self.items[index], item);
        tracing::trace!(target: targets::STORE, index, "swap");
        self.signals.emit(ItemChange::changed(index));
        Ok(previous)
    }

    /// Replaces the whole collection.
    ///
    /// The type registry is rebuilt from `items`. An empty replacement is
    /// reported as the removal of every old item; anything else is reported as
    /// a full data set change, without positional diffing.
    pub fn reset(&mut self, items: Vec<ItemRef>) {
        let _span = PerfSpan::new(span_names::BULK);
        let old_count = self.items.len();

        self.registry.clear();
        for item in &items {
            self.registry.record(item.as_ref());
        }

        let now_empty = items.is_empty();
        self.items = items;
        tracing::debug!(target: targets::STORE, old_count, new_count = self.items.len(), "reset");

        if now_empty {
            self.signals.emit(ItemChange::RangeRemoved {
                position: 0,
                count: old_count,
            });
        } else {
            self.signals.emit(ItemChange::DataSetChanged);
        }
    }

    /// Removes every item and forgets every registered type.
    ///
    /// The removal is announced before the collection is emptied.
    pub fn clear(&mut self) {
        let count = self.items.len();
        tracing::debug!(target: targets::STORE, count, "clear");
        self.signals.emit(ItemChange::RangeRemoved { position: 0, count });
        self.items.clear();
        self.registry.clear();
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Position of the first occurrence of `item`, compared by identity.
    pub fn index_of(&self, item: &ItemRef) -> Option<usize> {
        self.items.iter().position(|candidate| Arc::ptr_eq(candidate, item))
    }

    /// Position of the first item matching `predicate`.
    pub fn index_of_first<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&ItemRef) -> bool,
    {
        self.items.iter().position(|item| predicate(item))
    }

    /// The first item matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&ItemRef>
    where
        P: FnMut(&ItemRef) -> bool,
    {
        self.items.iter().find(|&item| predicate(item))
    }

    // -------------------------------------------------------------------------
    // Surface queries
    // -------------------------------------------------------------------------

    /// The view type of the item at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= count()`. The surface only asks for positions it
    /// knows to exist.
    pub fn item_type(&self, position: usize) -> ItemType {
        self.items[position].item_type()
    }

    /// Creates a view for `item_type` using its registered factory.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnregisteredType`] if no item of this type was ever
    /// added (or the registry was cleared since).
    pub fn try_create_view_for(&self, item_type: ItemType, parent: &dyn Any) -> Result<ViewHolder> {
        let factory = self
            .registry
            .factory(item_type)
            .ok_or(AdapterError::UnregisteredType(item_type))?;
        tracing::trace!(target: targets::ADAPTER, ?item_type, "creating view");
        Ok(ViewHolder::new(item_type, factory(parent)))
    }

    /// Creates a view for `item_type` using its registered factory.
    ///
    /// # Panics
    ///
    /// Panics if the type was never registered. Every item type is registered
    /// when the item enters the collection, so this indicates a surface asking
    /// for a type it never got from [`item_type`](Self::item_type).
    pub fn create_view_for(&self, item_type: ItemType, parent: &dyn Any) -> ViewHolder {
        match self.try_create_view_for(item_type, parent) {
            Ok(holder) => holder,
            Err(err) => panic!("{err}"),
        }
    }

    /// Binds the item at `position` into `holder`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= count()`.
    pub fn bind(&self, holder: &mut ViewHolder, position: usize) {
        holder.set_position(position);
        self.items[position].bind_erased_view_holder(holder, position);
    }
}

impl fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("count", &self.items.len())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{BindingItem, Item, ViewFactory};
    use parking_lot::Mutex;

    struct Letter(&'static str);

    impl BindingItem for Letter {
        type View = String;

        fn create_view(_parent: &dyn Any) -> String {
            String::new()
        }

        fn bind(&self, view: &mut String, _position: usize) {
            *view = self.0.to_string();
        }
    }

    struct Number(u32);

    impl BindingItem for Number {
        type View = u32;

        fn create_view(_parent: &dyn Any) -> u32 {
            0
        }

        fn bind(&self, view: &mut u32, _position: usize) {
            *view = self.0;
        }
    }

    fn letter(name: &'static str) -> ItemRef {
        Arc::new(Letter(name))
    }

    fn names(store: &ItemStore) -> Vec<String> {
        store
            .iter()
            .map(|item| {
                let mut holder = ViewHolder::new(item.item_type(), Box::new(String::new()));
                item.bind_erased_view_holder(&mut holder, 0);
                holder.downcast_ref::<String>().cloned().unwrap_or_default()
            })
            .collect()
    }

    fn recorded(store: &ItemStore) -> Arc<Mutex<Vec<ItemChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recv = seen.clone();
        store.signals().observe(move |change| recv.lock().push(change));
        seen
    }

    fn abc() -> (ItemStore, [ItemRef; 3]) {
        let items = [letter("A"), letter("B"), letter("C")];
        (ItemStore::with_items(items.to_vec()), items)
    }

    #[test]
    fn test_add_appends_and_notifies() {
        let mut store = ItemStore::new();
        let events = recorded(&store);

        let a = letter("A");
        store.add(a.clone());
        store.add(letter("B"));

        assert_eq!(store.count(), 2);
        assert_eq!(store.index_of(&a), Some(0));
        assert_eq!(*events.lock(), vec![ItemChange::inserted(0), ItemChange::inserted(1)]);
        assert!(store.is_registered(ItemType::of::<Letter>()));
    }

    #[test]
    fn test_add_all_single_block() {
        let (mut store, _) = abc();
        let events = recorded(&store);

        store.add_all(vec![letter("D"), Arc::new(Number(5))]);
        store.add_all(Vec::new());

        assert_eq!(store.count(), 5);
        assert_eq!(store.registered_type_count(), 2);
        assert_eq!(
            *events.lock(),
            vec![ItemChange::RangeInserted { position: 3, count: 2 }]
        );
    }

    #[test]
    fn test_insert_bounds() {
        let (mut store, _) = abc();
        let events = recorded(&store);

        store.insert(3, letter("D")).expect("insert at end");
        store.insert(0, letter("Z")).expect("insert at front");
        assert_eq!(names(&store), ["Z", "A", "B", "C", "D"]);

        let err = store.insert(9, letter("X")).unwrap_err();
        assert_eq!(err, AdapterError::IndexOutOfRange { index: 9, len: 5 });
        assert_eq!(store.count(), 5);
        assert_eq!(*events.lock(), vec![ItemChange::inserted(3), ItemChange::inserted(0)]);
    }

    #[test]
    fn test_remove_at_out_of_range_leaves_collection() {
        let (mut store, _) = abc();
        let events = recorded(&store);

        let err = store.remove_at(5).err().expect("remove_at(5) should fail");
        assert_eq!(err, AdapterError::IndexOutOfRange { index: 5, len: 3 });
        assert_eq!(names(&store), ["A", "B", "C"]);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_remove_at_returns_item() {
        let (mut store, [_, b, _]) = abc();
        let events = recorded(&store);

        let removed = store.remove_at(1).expect("valid index");
        assert!(Arc::ptr_eq(&removed, &b));
        assert_eq!(names(&store), ["A", "C"]);
        assert_eq!(*events.lock(), vec![ItemChange::removed(1)]);
    }

    #[test]
    fn test_remove_by_reference() {
        let (mut store, [_, _, c]) = abc();
        let events = recorded(&store);

        assert_eq!(store.remove(&c), Some(2));
        assert_eq!(store.remove(&c), None);
        // Same content, different identity.
        assert_eq!(store.remove(&letter("A")), None);

        assert_eq!(names(&store), ["A", "B"]);
        assert_eq!(*events.lock(), vec![ItemChange::removed(2)]);
    }

    #[test]
    fn test_duplicate_reference_first_match() {
        let mut store = ItemStore::new();
        let a = letter("A");
        store.add(letter("B"));
        store.add(a.clone());
        store.add(a.clone());

        assert_eq!(store.index_of(&a), Some(1));
        assert_eq!(store.remove(&a), Some(1));
        assert_eq!(store.index_of(&a), Some(1));
    }

    #[test]
    fn test_move_matches_remove_and_reinsert() {
        for from in 0..5 {
            for to in 0..5 {
                if from == to {
                    continue;
                }
                let items: Vec<ItemRef> =
                    ["A", "B", "C", "D", "E"].into_iter().map(letter).collect();
                let mut store = ItemStore::with_items(items.clone());
                let events = recorded(&store);

                let mut expected = items.clone();
                let moved = expected.remove(from);
                expected.insert(to, moved);

                store.move_item(from, to).expect("valid move");
                assert!(
                    store.items().iter().zip(&expected).all(|(a, b)| Arc::ptr_eq(a, b)),
                    "move {from} -> {to}"
                );
                assert_eq!(*events.lock(), vec![ItemChange::Moved { from, to }]);
            }
        }
    }

    #[test]
    fn test_move_same_index_is_noop() {
        let (mut store, _) = abc();
        let events = recorded(&store);
        store.move_item(1, 1).expect("valid");
        assert_eq!(names(&store), ["A", "B", "C"]);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_move_invalid_argument() {
        let (mut store, _) = abc();
        assert_eq!(
            store.move_item(0, 3),
            Err(AdapterError::InvalidArgument { from: 0, to: 3, len: 3 })
        );
        assert!(store.move_item(7, 0).is_err());
        assert_eq!(names(&store), ["A", "B", "C"]);
    }

    #[test]
    fn test_swap_replaces_in_place() {
        let (mut store, [_, b, _]) = abc();
        let events = recorded(&store);

        let previous = store.swap(1, Arc::new(Number(4))).expect("valid");
        assert!(Arc::ptr_eq(&previous, &b));
        assert_eq!(store.item_type(1), ItemType::of::<Number>());
        assert!(store.is_registered(ItemType::of::<Number>()));
        assert_eq!(*events.lock(), vec![ItemChange::changed(1)]);

        assert_eq!(
            store.swap(3, letter("X")).err().expect("swap(3) should fail"),
            AdapterError::IndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_reset_to_empty_reports_removal() {
        let (mut store, _) = abc();
        let events = recorded(&store);

        store.reset(Vec::new());
        assert_eq!(store.count(), 0);
        assert_eq!(store.registered_type_count(), 0);
        assert_eq!(
            *events.lock(),
            vec![ItemChange::RangeRemoved { position: 0, count: 3 }]
        );
    }

    #[test]
    fn test_reset_rebuilds_registry() {
        let (mut store, _) = abc();
        let events = recorded(&store);

        store.reset(vec![Arc::new(Number(1)), Arc::new(Number(2))]);
        assert_eq!(store.count(), 2);
        assert!(!store.is_registered(ItemType::of::<Letter>()));
        assert!(store.is_registered(ItemType::of::<Number>()));
        assert_eq!(*events.lock(), vec![ItemChange::DataSetChanged]);
    }

    #[test]
    fn test_clear_notifies_before_emptying() {
        let (mut store, _) = abc();
        let events = recorded(&store);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.registered_type_count(), 0);
        assert_eq!(
            *events.lock(),
            vec![ItemChange::RangeRemoved { position: 0, count: 3 }]
        );
    }

    #[test]
    fn test_predicate_lookup() {
        let mut store = ItemStore::new();
        store.add(letter("A"));
        store.add(Arc::new(Number(2)));
        store.add(Arc::new(Number(3)));

        let is_number = |item: &ItemRef| item.item_type() == ItemType::of::<Number>();
        assert_eq!(store.index_of_first(is_number), Some(1));
        assert!(store.find(is_number).is_some());
        assert_eq!(store.index_of_first(|item| item.span() > 1), None);
        assert!(store.find(|item| item.span() > 1).is_none());
    }

    #[test]
    fn test_create_and_bind() {
        let mut store = ItemStore::new();
        store.add(letter("A"));
        store.add(Arc::new(Number(9)));

        let mut holder = store.create_view_for(store.item_type(1), &());
        store.bind(&mut holder, 1);
        assert_eq!(holder.downcast_ref::<u32>(), Some(&9));
        assert_eq!(holder.position(), Some(1));
    }

    struct Stamped {
        stamp: u32,
    }

    impl Item for Stamped {
        fn item_type(&self) -> ItemType {
            ItemType::custom(42)
        }

        fn view_holder_factory(&self) -> ViewFactory {
            let stamp = self.stamp;
            Arc::new(move |_parent: &dyn Any| -> Box<dyn Any + Send> { Box::new(stamp) })
        }

        fn bind_erased_view_holder(&self, _holder: &mut ViewHolder, _position: usize) {}
    }

    #[test]
    fn test_first_registered_factory_is_used() {
        let mut store = ItemStore::new();
        store.add(Arc::new(Stamped { stamp: 1 }));
        store.add(Arc::new(Stamped { stamp: 2 }));
        store.swap(0, Arc::new(Stamped { stamp: 3 })).expect("valid");

        let holder = store.create_view_for(ItemType::custom(42), &());
        assert_eq!(holder.downcast_ref::<u32>(), Some(&1));
    }

    #[test]
    fn test_unregistered_type() {
        let store = ItemStore::new();
        let err = store.try_create_view_for(ItemType::custom(3), &()).unwrap_err();
        assert_eq!(err, AdapterError::UnregisteredType(ItemType::custom(3)));
    }

    #[test]
    #[should_panic(expected = "no view factory registered")]
    fn test_create_view_for_unregistered_panics() {
        let mut store = ItemStore::new();
        store.add(letter("A"));
        store.clear();
        let _ = store.create_view_for(ItemType::of::<Letter>(), &());
    }
}
