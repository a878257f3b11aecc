//! Prelude module for Horizon Recycler.
//!
//! ```ignore
//! use horizon_recycler::prelude::*;
//! ```

pub use crate::error::{AdapterError, Result};
pub use crate::model::{
    AdapterConfig, BindingItem, Directions, Item, ItemChange, ItemRef, ItemType,
    RecyclerAdapter, RecyclerSurface, SpanSizeLookup, ViewHolder,
};
pub use crate::signal::{ConnectionId, Signal};
