//! Logging facilities for Horizon Recycler.
//!
//! Horizon Recycler uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_recycler::touch=debug")
//!         .init();
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`] below so that a
//! single subsystem can be filtered in or out.

/// Span names used throughout Horizon Recycler for tracing.
pub mod span_names {
    /// Bulk collection operations (reset, add-all).
    pub const BULK: &str = "horizon_recycler::bulk";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_recycler_core::signal";
    /// Ordered collection store target.
    pub const STORE: &str = "horizon_recycler::store";
    /// View type registry target.
    pub const REGISTRY: &str = "horizon_recycler::registry";
    /// Drag and swipe controller target.
    pub const TOUCH: &str = "horizon_recycler::touch";
    /// Surface attachment and view creation target.
    pub const ADAPTER: &str = "horizon_recycler::adapter";
    /// Performance spans.
    pub const PERF: &str = "horizon_recycler::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of bulk operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
