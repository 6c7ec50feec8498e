//! Table-wide state shared by every strip of the table.
//!
//! # Core Types
//!
//! - `TableItem` / `SelectableModel`: capabilities a header item declares
//! - `SelectionHandler`: the row/column selection and its colors
//! - `SelectionStateQuery`: the position-indexed view adapters consume
//! - `ColumnSortHelper`: per-column sort state
//!
//! Adapters never own this state. They read it on every bind and attach so
//! that a recycled holder always shows the latest selection and sort state.

mod item;
pub mod selection;
pub mod sort;

pub use item::{SelectableModel, TableItem};
pub use selection::{SelectionColors, SelectionHandler, SelectionState, SelectionStateQuery};
pub use sort::{ColumnHeaderLayout, ColumnSortHelper, DetachedLayout, SortDirective, SortState};
