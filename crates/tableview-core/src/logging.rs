//! Logging facilities for tableview.
//!
//! tableview instruments itself with the `tracing` crate. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("tableview::adapter=trace")
//!     .init();
//! ```
//!
//! The [`targets`] constants name every subsystem so filters can be written
//! without guessing module paths.

/// Span names used for tracing.
pub mod span_names {
    /// A full bind pass over one holder.
    pub const BIND: &str = "tableview::bind";
    /// Attach-to-window resynchronization of one holder.
    pub const ATTACH: &str = "tableview::attach";
    /// A layout pass of the recycling strip.
    pub const LAYOUT: &str = "tableview::layout";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system.
    pub const SIGNAL: &str = "tableview_core::signal";
    /// Column-header binding coordinator.
    pub const ADAPTER: &str = "tableview::adapter";
    /// Item list and recycling substrate.
    pub const RECYCLER: &str = "tableview::recycler";
    /// Selection handler.
    pub const SELECTION: &str = "tableview::selection";
    /// Column sort state.
    pub const SORT: &str = "tableview::sort";
    /// Configuration loading.
    pub const CONFIG: &str = "tableview::config";
    /// Performance spans.
    pub const PERF: &str = "tableview::perf";
}

/// RAII guard that keeps a performance span entered while alive.
///
/// ```
/// use tableview_core::logging::{span_names, PerfSpan};
///
/// let _span = PerfSpan::new(span_names::LAYOUT);
/// // work measured by the subscriber
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span named `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation);
        Self {
            span: span.entered(),
        }
    }

    /// Enter a performance span tagged with the position it operates on.
    pub fn with_position(operation: &'static str, position: usize) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation, position);
        Self {
            span: span.entered(),
        }
    }
}
