//! Horizon Recycler - a view-binding adapter for recycling list surfaces.
//!
//! This is the main crate that re-exports the core signal types alongside the
//! adapter itself.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use std::sync::Arc;
//! use horizon_recycler::model::{BindingItem, RecyclerAdapter};
//!
//! struct Header(&'static str);
//!
//! impl BindingItem for Header {
//!     type View = String;
//!     fn create_view(_parent: &dyn Any) -> String { String::new() }
//!     fn bind(&self, view: &mut String, _position: usize) { *view = self.0.into(); }
//!     fn span(&self) -> usize { 2 }
//! }
//!
//! let mut adapter = RecyclerAdapter::default();
//! adapter.signals().item_range_inserted.connect(|(position, count)| {
//!     println!("surface: {count} new item(s) at {position}");
//! });
//! adapter.add(Arc::new(Header("Today")));
//! assert_eq!(adapter.span_at(0), 2);
//! ```

pub use horizon_recycler_core::*;

mod error;
pub mod model;
pub mod prelude;

pub use error::{AdapterError, Result};
