//! Core systems for Horizon Recycler.
//!
//! This crate provides the notification plumbing shared by the adapter crate:
//!
//! - **Signal/Slot System**: Synchronous, type-safe change notifications
//! - **Logging**: `tracing` target names and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_recycler_core::Signal;
//!
//! let item_moved = Signal::<(usize, usize)>::new();
//!
//! let conn_id = item_moved.connect(|(from, to)| {
//!     println!("item moved from {from} to {to}");
//! });
//!
//! item_moved.emit((0, 2));
//! item_moved.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
