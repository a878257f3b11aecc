//! Adapter configuration.

use serde::{Deserialize, Serialize};

/// Behavior switches for a [`RecyclerAdapter`](super::RecyclerAdapter).
///
/// Every field has a default, so partial settings deserialize cleanly:
///
/// ```
/// use horizon_recycler::model::AdapterConfig;
///
/// let config: AdapterConfig = serde_json::from_str(r#"{ "drop_only": false }"#).unwrap();
/// assert!(!config.drop_only);
/// assert!(config.auto_attach_touch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Install the drag/swipe controller on the surface when the adapter is
    /// attached.
    pub auto_attach_touch: bool,
    /// Notify the drag listener once on drop instead of on every
    /// intermediate move.
    pub drop_only: bool,
    /// Let a long press start a drag.
    pub long_press_drag_enabled: bool,
    /// Let the surface start swipes from anywhere on the item view.
    pub item_view_swipe_enabled: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            auto_attach_touch: true,
            drop_only: true,
            long_press_drag_enabled: true,
            item_view_swipe_enabled: true,
        }
    }
}

impl AdapterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether touch handling is attached automatically.
    pub fn with_auto_attach_touch(mut self, enabled: bool) -> Self {
        self.auto_attach_touch = enabled;
        self
    }

    /// Sets the drag notification policy.
    pub fn with_drop_only(mut self, drop_only: bool) -> Self {
        self.drop_only = drop_only;
        self
    }

    /// Sets whether a long press starts a drag.
    pub fn with_long_press_drag(mut self, enabled: bool) -> Self {
        self.long_press_drag_enabled = enabled;
        self
    }

    /// Sets whether swipes may start anywhere on the item view.
    pub fn with_item_view_swipe(mut self, enabled: bool) -> Self {
        self.item_view_swipe_enabled = enabled;
        self
    }
}
