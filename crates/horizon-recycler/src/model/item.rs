//! The item capability contract.
//!
//! The adapter never looks inside an item. Everything it needs is exposed
//! through the [`Item`] trait: a type key used for view recycling, a factory
//! for views of that type, a bind operation, drag/swipe direction masks and a
//! grid span.
//!
//! Most items are easier to write against [`BindingItem`], which names the
//! concrete view type and gets the type-erased plumbing for free.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use horizon_recycler_core::logging::targets;

/// Stable key grouping items that share a view layout and factory.
///
/// Items with equal `ItemType`s share recycled views, so two items may only
/// report the same type if views created for one can be bound to the other.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemType(Repr);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Rust(TypeId, &'static str),
    Custom(u64),
}

impl ItemType {
    /// The item type derived from a Rust type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Repr::Rust(TypeId::of::<T>(), std::any::type_name::<T>()))
    }

    /// An item type with an explicit numeric id.
    ///
    /// Useful when one Rust type renders with several layouts.
    pub const fn custom(id: u64) -> Self {
        Self(Repr::Custom(id))
    }
}

impl fmt::Debug for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Rust(_, name) => write!(f, "ItemType({name})"),
            Repr::Custom(id) => write!(f, "ItemType(#{id})"),
        }
    }
}

bitflags::bitflags! {
    /// Permitted drag or swipe directions.
    ///
    /// An empty mask disables the interaction for the item.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Directions: u32 {
        /// Toward the top of the list.
        const UP    = 1;
        /// Toward the bottom of the list.
        const DOWN  = 1 << 1;
        /// Toward the left edge.
        const LEFT  = 1 << 2;
        /// Toward the right edge.
        const RIGHT = 1 << 3;
        /// Toward the leading edge (layout-direction aware).
        const START = 1 << 4;
        /// Toward the trailing edge (layout-direction aware).
        const END   = 1 << 5;

        /// Up and down.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        /// Left and right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Every direction.
        const ALL = Self::VERTICAL.bits() | Self::HORIZONTAL.bits() | Self::START.bits() | Self::END.bits();
    }
}

/// Factory producing a fresh view for a parent handle supplied by the surface.
pub type ViewFactory = Arc<dyn Fn(&dyn Any) -> Box<dyn Any + Send> + Send + Sync>;

/// A shared, identity-compared reference to an item in the collection.
pub type ItemRef = Arc<dyn Item>;

/// A type-erased view owned by the rendering surface.
///
/// A holder is created for one [`ItemType`] and may be rebound to any item of
/// that type.
pub struct ViewHolder {
    item_type: ItemType,
    view: Box<dyn Any + Send>,
    position: Option<usize>,
}

impl ViewHolder {
    /// Wraps a view created for `item_type`.
    pub fn new(item_type: ItemType, view: Box<dyn Any + Send>) -> Self {
        Self {
            item_type,
            view,
            position: None,
        }
    }

    /// The item type this holder was created for.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// The position this holder was last bound at, if it was ever bound.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = Some(position);
    }

    /// Borrows the view as its concrete type.
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.view.downcast_ref()
    }

    /// Mutably borrows the view as its concrete type.
    pub fn downcast_mut<V: Any>(&mut self) -> Option<&mut V> {
        self.view.downcast_mut()
    }
}

impl fmt::Debug for ViewHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHolder")
            .field("item_type", &self.item_type)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Capabilities the adapter needs from every item.
pub trait Item: Send + Sync + 'static {
    /// The view-recycling key of this item.
    fn item_type(&self) -> ItemType;

    /// The factory creating views for this item's type.
    ///
    /// Only consulted the first time an item of this type enters the
    /// collection.
    fn view_holder_factory(&self) -> ViewFactory;

    /// Binds this item's content into a holder created for its type.
    fn bind_erased_view_holder(&self, holder: &mut ViewHolder, position: usize);

    /// Directions this item may be dragged in. Empty disables dragging.
    fn drag_dirs(&self) -> Directions {
        Directions::empty()
    }

    /// Directions this item may be swiped in. Empty disables swiping.
    fn swipe_dirs(&self) -> Directions {
        Directions::empty()
    }

    /// Number of grid cells the item occupies.
    fn span(&self) -> usize {
        1
    }
}

/// Typed convenience for implementing [`Item`].
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use horizon_recycler::model::{BindingItem, Directions};
///
/// struct Label(String);
///
/// impl BindingItem for Label {
///     type View = String;
///
///     fn create_view(_parent: &dyn Any) -> String {
///         String::new()
///     }
///
///     fn bind(&self, view: &mut String, _position: usize) {
///         view.clone_from(&self.0);
///     }
///
///     fn drag_dirs(&self) -> Directions {
///         Directions::VERTICAL
///     }
/// }
/// ```
pub trait BindingItem: Send + Sync + 'static {
    /// The concrete view this item binds into.
    type View: Any + Send;

    /// Creates an unbound view.
    fn create_view(parent: &dyn Any) -> Self::View;

    /// Binds this item into `view`.
    fn bind(&self, view: &mut Self::View, position: usize);

    /// The view-recycling key. Defaults to the implementing type.
    fn item_type(&self) -> ItemType {
        ItemType::of::<Self>()
    }

    /// Directions this item may be dragged in.
    fn drag_dirs(&self) -> Directions {
        Directions::empty()
    }

    /// Directions this item may be swiped in.
    fn swipe_dirs(&self) -> Directions {
        Directions::empty()
    }

    /// Number of grid cells the item occupies.
    fn span(&self) -> usize {
        1
    }
}

impl<T: BindingItem> Item for T {
    fn item_type(&self) -> ItemType {
        BindingItem::item_type(self)
    }

    fn view_holder_factory(&self) -> ViewFactory {
        Arc::new(|parent: &dyn Any| -> Box<dyn Any + Send> { Box::new(T::create_view(parent)) })
    }

    fn bind_erased_view_holder(&self, holder: &mut ViewHolder, position: usize) {
        let holder_type = holder.item_type();
        match holder.downcast_mut::<T::View>() {
            Some(view) => self.bind(view, position),
            None => tracing::error!(
                target: targets::STORE,
                ?holder_type,
                item_type = ?BindingItem::item_type(self),
                position,
                "view holder does not hold this item's view type, skipping bind"
            ),
        }
    }

    fn drag_dirs(&self) -> Directions {
        BindingItem::drag_dirs(self)
    }

    fn swipe_dirs(&self) -> Directions {
        BindingItem::swipe_dirs(self)
    }

    fn span(&self) -> usize {
        BindingItem::span(self)
    }
}
