//! Core primitives for tableview.
//!
//! This crate holds the pieces shared by every tableview component:
//!
//! - **Signal/Slot System**: synchronous, type-safe change notification
//! - **Logging**: `tracing` targets, span names and a performance span guard
//!
//! # Signal Example
//!
//! ```
//! use tableview_core::Signal;
//!
//! let items_changed = Signal::<usize>::new();
//! items_changed.connect(|count| println!("{count} items"));
//! items_changed.emit(3);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
