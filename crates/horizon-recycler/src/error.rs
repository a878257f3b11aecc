//! Error types for adapter operations.

use crate::model::ItemType;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors raised by collection mutations and view creation.
///
/// A failed operation never leaves a partial mutation behind: the collection,
/// the type registry and the emitted notifications are exactly as they were
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// A position outside the valid range was passed to `insert`, `remove_at`
    /// or `swap`.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `move_item` was given a source or target that is not an existing index.
    #[error("cannot move item from {from} to {to} in collection of length {len}")]
    InvalidArgument { from: usize, to: usize, len: usize },

    /// A view was requested for an item type that was never registered.
    #[error("no view factory registered for {0:?}")]
    UnregisteredType(ItemType),
}

impl AdapterError {
    /// Create an index-out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an invalid-move error.
    pub fn invalid_move(from: usize, to: usize, len: usize) -> Self {
        Self::InvalidArgument { from, to, len }
    }
}
