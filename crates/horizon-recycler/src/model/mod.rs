//! Adapter architecture for Horizon Recycler.
//!
//! This module reconciles an ordered collection of heterogeneous items with a
//! view-recycling surface:
//!
//! - Items describe themselves through a small capability contract
//! - The collection turns every mutation into a minimal change notification
//! - Drag and swipe gestures are validated and applied to the collection
//!
//! # Core Types
//!
//! - `Item` / `BindingItem`: What every element of the collection provides
//! - `ItemStore`: The authoritative ordered collection and its type registry
//! - `AdapterSignals`: Signals for change notifications
//! - `TouchController`: Drag/swipe state machine
//! - `RecyclerAdapter`: The facade a surface talks to
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  gestures  ┌─────────────────┐  mutations  ┌─────────────┐
//! │   Surface   │───────────>│ TouchController │────────────>│  ItemStore  │
//! │             │            └─────────────────┘             │             │
//! │             │<──────────── AdapterSignals <──────────────│             │
//! │             │── count / type / create / bind / span ────>│             │
//! └─────────────┘                                            └─────────────┘
//! ```

mod adapter;
mod config;
mod item;
mod registry;
mod signals;
mod span;
mod store;
mod touch;

pub use adapter::{RecyclerAdapter, RecyclerSurface, TouchOptions};
pub use config::AdapterConfig;
pub use item::{BindingItem, Directions, Item, ItemRef, ItemType, ViewFactory, ViewHolder};
pub use signals::{AdapterSignals, ItemChange, SignalObserver};
pub use span::SpanSizeLookup;
pub use store::ItemStore;
pub use touch::{DragListener, DragSession, MovementFlags, SwipeListener, TouchController};
