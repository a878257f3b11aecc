//! Drag and swipe interaction controller.
//!
//! The rendering surface recognizes the gestures and reports them here as
//! move candidates, swipes and drag ends. The controller validates each
//! report against the live collection, applies it to the [`ItemStore`] and
//! tells the application through its drag and swipe listeners.
//!
//! # Drag sessions
//!
//! A drag produces many move candidates as the dragged item passes over its
//! neighbors. The store is updated on every accepted candidate so the surface
//! always shows the live order. The drag listener is either told about every
//! step (`drop_only == false`) or once, on drop, with the overall `from` and
//! `to` of the session (`drop_only == true`).
//!
//! ```text
//!            on_move (accepted)              on_move (accepted)
//!   ┌──────┐ ─────────────────> ┌──────────────────┐ ─────┐ keeps `from`,
//!   │ Idle │                    │ Dragging{from,to}│ <────┘ updates `to`
//!   └──────┘ <───────────────── └──────────────────┘
//!        on_drag_end / on_move (rejected) / cancel_drag
//! ```
//!
//! A drag that never receives `on_drag_end` (or `cancel_drag`) stays in
//! `Dragging`.

use std::fmt;
use std::sync::Arc;

use horizon_recycler_core::logging::targets;

use super::item::{Directions, ItemRef};
use super::store::ItemStore;

/// Called with the swiped item, just before it is removed.
pub type SwipeListener = Arc<dyn Fn(&ItemRef) + Send + Sync>;

/// Called with the dragged item and its `from` and `to` positions.
pub type DragListener = Arc<dyn Fn(&ItemRef, usize, usize) + Send + Sync>;

/// State of the current drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging {
        /// Position the dragged item started at.
        from: usize,
        /// Position the dragged item currently occupies.
        to: usize,
    },
}

/// The directions a surface should allow for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementFlags {
    /// Permitted drag directions.
    pub drag: Directions,
    /// Permitted swipe directions.
    pub swipe: Directions,
}

/// Translates gesture callbacks into collection mutations and listener calls.
pub struct TouchController {
    session: DragSession,
    drop_only: bool,
    swipe_listener: Option<SwipeListener>,
    drag_listener: Option<DragListener>,
}

impl Default for TouchController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TouchController {
    /// Creates an idle controller with the given drag notification policy.
    pub fn new(drop_only: bool) -> Self {
        Self {
            session: DragSession::Idle,
            drop_only,
            swipe_listener: None,
            drag_listener: None,
        }
    }

    /// The current drag session.
    pub fn session(&self) -> DragSession {
        self.session
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.session, DragSession::Dragging { .. })
    }

    /// Whether the drag listener is only told about drops.
    pub fn drop_only(&self) -> bool {
        self.drop_only
    }

    /// Sets the drag notification policy.
    pub fn set_drop_only(&mut self, drop_only: bool) {
        self.drop_only = drop_only;
    }

    /// Installs the swipe listener, replacing any previous one.
    pub fn set_swipe_listener<F>(&mut self, listener: F)
    where
        F: Fn(&ItemRef) + Send + Sync + 'static,
    {
        self.swipe_listener = Some(Arc::new(listener));
    }

    /// Removes the swipe listener.
    pub fn clear_swipe_listener(&mut self) {
        self.swipe_listener = None;
    }

    /// Installs the drag listener and its notification policy.
    pub fn set_drag_listener<F>(&mut self, drop_only: bool, listener: F)
    where
        F: Fn(&ItemRef, usize, usize) + Send + Sync + 'static,
    {
        self.drop_only = drop_only;
        self.drag_listener = Some(Arc::new(listener));
    }

    /// Removes the drag listener. The notification policy is kept.
    pub fn clear_drag_listener(&mut self) {
        self.drag_listener = None;
    }

    /// The drag and swipe directions allowed for the item at `position`.
    ///
    /// Returns empty flags for a position that does not exist.
    pub fn movement_flags(&self, store: &ItemStore, position: usize) -> MovementFlags {
        store
            .get(position)
            .map(|item| MovementFlags {
                drag: item.drag_dirs(),
                swipe: item.swipe_dirs(),
            })
            .unwrap_or_default()
    }

    /// Handles the dragged item at `source` passing over `target`.
    ///
    /// Returns `true` if the move was accepted and applied to the store. A
    /// move is rejected, and the session reset to idle, if either position
    /// does not exist or the item at `target` cannot be dragged.
    pub fn on_move(&mut self, store: &mut ItemStore, source: usize, target: usize) -> bool {
        let target_draggable = store
            .get(target)
            .is_some_and(|item| !item.drag_dirs().is_empty());
        if source >= store.count() || !target_draggable {
            tracing::debug!(
                target: targets::TOUCH,
                source,
                target,
                count = store.count(),
                "rejecting move candidate"
            );
            self.session = DragSession::Idle;
            return false;
        }

        if let Err(err) = store.move_item(source, target) {
            tracing::debug!(target: targets::TOUCH, %err, "rejecting move candidate");
            self.session = DragSession::Idle;
            return false;
        }

        self.session = match self.session {
            DragSession::Idle => DragSession::Dragging {
                from: source,
                to: target,
            },
            DragSession::Dragging { from, .. } => DragSession::Dragging { from, to: target },
        };
        tracing::trace!(target: targets::TOUCH, session = ?self.session, "move accepted");

        if !self.drop_only {
            self.notify_drag(store, source, target);
        }
        true
    }

    /// Handles the item at `index` being swiped away in `direction`.
    ///
    /// The swipe listener sees the item before it is removed. A stale index
    /// is ignored.
    pub fn on_swiped(&mut self, store: &mut ItemStore, index: usize, direction: Directions) {
        let Some(item) = store.get(index).cloned() else {
            tracing::debug!(target: targets::TOUCH, index, "ignoring swipe of missing item");
            return;
        };
        tracing::trace!(target: targets::TOUCH, index, ?direction, "swiped");
        if let Some(listener) = &self.swipe_listener {
            listener(&item);
        }
        if let Err(err) = store.remove_at(index) {
            tracing::debug!(target: targets::TOUCH, %err, "swiped item vanished during listener");
        }
    }

    /// Handles the dragged item being dropped.
    ///
    /// Under the drop-only policy, a session that changed the item's position
    /// is reported to the drag listener once. The session always ends.
    pub fn on_drag_end(&mut self, store: &ItemStore) {
        if let DragSession::Dragging { from, to } = self.session {
            tracing::trace!(target: targets::TOUCH, from, to, "drag ended");
            if from != to && self.drop_only {
                self.notify_drag(store, from, to);
            }
        }
        self.session = DragSession::Idle;
    }

    /// Abandons the current drag without notifying the drag listener.
    ///
    /// For surfaces that can tell a gesture was interrupted without a drop.
    pub fn cancel_drag(&mut self) {
        if self.is_dragging() {
            tracing::debug!(target: targets::TOUCH, session = ?self.session, "drag cancelled");
        }
        self.session = DragSession::Idle;
    }

    fn notify_drag(&self, store: &ItemStore, from: usize, to: usize) {
        let (Some(listener), Some(item)) = (&self.drag_listener, store.get(to)) else {
            return;
        };
        listener(item, from, to);
    }
}

impl fmt::Debug for TouchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchController")
            .field("session", &self.session)
            .field("drop_only", &self.drop_only)
            .field("swipe_listener", &self.swipe_listener.is_some())
            .field("drag_listener", &self.drag_listener.is_some())
            .finish()
    }
}
