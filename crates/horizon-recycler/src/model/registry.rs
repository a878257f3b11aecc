//! Item type to view factory registry.

use std::collections::HashMap;
use std::fmt;

use horizon_recycler_core::logging::targets;

use super::item::{Item, ItemType, ViewFactory};

/// Maps each item type seen by the collection to the factory for its views.
///
/// Registration is first-writer-wins: once a type is recorded, later items of
/// the same type never replace its factory. Entries are only dropped all at
/// once through [`clear`](Self::clear).
#[derive(Default)]
pub(crate) struct TypeRegistry {
    factories: HashMap<ItemType, ViewFactory>,
}

impl TypeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records the item's type, asking the item for a factory only if the
    /// type is unseen. Returns `true` if a new entry was created.
    pub(crate) fn record(&mut self, item: &dyn Item) -> bool {
        let item_type = item.item_type();
        if self.factories.contains_key(&item_type) {
            return false;
        }
        tracing::trace!(target: targets::REGISTRY, ?item_type, "registering view factory");
        self.factories.insert(item_type, item.view_holder_factory());
        true
    }

    pub(crate) fn factory(&self, item_type: ItemType) -> Option<&ViewFactory> {
        self.factories.get(&item_type)
    }

    pub(crate) fn contains(&self, item_type: ItemType) -> bool {
        self.factories.contains_key(&item_type)
    }

    pub(crate) fn len(&self) -> usize {
        self.factories.len()
    }

    pub(crate) fn clear(&mut self) {
        self.factories.clear();
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
