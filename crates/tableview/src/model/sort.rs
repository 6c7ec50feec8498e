//! Per-column sort state.
//!
//! [`ColumnSortHelper`] remembers which columns are sorted and in which
//! direction. The comparator that actually reorders rows lives elsewhere;
//! this module only answers "how is column N sorted" and forwards changes to
//! the column-header layout so the visible indicator follows.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tableview::model::{ColumnSortHelper, DetachedLayout, SortState};
//!
//! let helper = ColumnSortHelper::new(Arc::new(DetachedLayout));
//! assert_eq!(helper.sorting_status(0), SortState::Unsorted);
//!
//! helper.set_sorting_status(0, SortState::Ascending).unwrap();
//! assert_eq!(helper.sorting_status(0), SortState::Ascending);
//! assert!(helper.is_sorting());
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tableview_core::logging::targets;
use tableview_core::Signal;

use crate::error::Result;

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortState {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
    /// Not sorted.
    #[default]
    Unsorted,
}

impl SortState {
    /// The state a header click moves to.
    ///
    /// An unsorted or descending column becomes ascending; an ascending one
    /// becomes descending.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending | Self::Unsorted => Self::Ascending,
        }
    }

    /// Returns true unless the state is [`SortState::Unsorted`].
    pub fn is_sorted(self) -> bool {
        self != Self::Unsorted
    }
}

/// The column-header strip's layout, as seen by the sort helper.
///
/// Positions are the same integer positions the adapter binds, so a sort
/// state stored for column `n` always reaches the holder laid out at `n`.
///
/// A [`RecyclerStrip`](crate::adapter::RecyclerStrip) owns its adapter and
/// therefore the helper, so it cannot sit behind this trait. Tables laid out
/// by a strip change sort state through
/// [`RecyclerStrip::set_sorting_status`](crate::adapter::RecyclerStrip::set_sorting_status),
/// which updates the helper and the live holder together. Implement this
/// trait for hosts that keep their header layout outside the adapter.
pub trait ColumnHeaderLayout {
    /// Push `state` into the holder currently laid out at `column`, if any.
    ///
    /// Implementations return [`TableError::NotSortable`] when a live holder
    /// exists but cannot display a sort indicator.
    ///
    /// [`TableError::NotSortable`]: crate::TableError::NotSortable
    fn dispatch_sorting_status(&self, column: usize, state: SortState) -> Result<()>;
}

/// A layout with no live holders. Dispatch is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLayout;

impl ColumnHeaderLayout for DetachedLayout {
    fn dispatch_sorting_status(&self, _column: usize, _state: SortState) -> Result<()> {
        Ok(())
    }
}

/// One sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub column: usize,
    pub state: SortState,
}

/// Stores the sort state of every column header.
///
/// Columns never touched report [`SortState::Unsorted`]. Only sorted columns
/// are stored, in the order they were sorted.
///
/// # Signals
///
/// - `sorting_status_changed`: emitted with `(column, state)` after every
///   [`set_sorting_status`](Self::set_sorting_status)
pub struct ColumnSortHelper {
    directives: RwLock<Vec<SortDirective>>,
    layout: Arc<dyn ColumnHeaderLayout>,

    /// Emitted after a column's sort state is set. Args: (column, state)
    pub sorting_status_changed: Signal<(usize, SortState)>,
}

impl ColumnSortHelper {
    /// Creates an empty helper backed by `layout`.
    pub fn new(layout: Arc<dyn ColumnHeaderLayout>) -> Self {
        Self {
            directives: RwLock::new(Vec::new()),
            layout,
            sorting_status_changed: Signal::new(),
        }
    }

    /// Sort state of `column`.
    pub fn sorting_status(&self, column: usize) -> SortState {
        self.directives
            .read()
            .iter()
            .find(|d| d.column == column)
            .map_or(SortState::Unsorted, |d| d.state)
    }

    /// Sets the sort state of `column` and pushes it to the layout.
    ///
    /// The stored state is updated even when the layout rejects the dispatch;
    /// the error only reports that the live holder could not show it.
    pub fn set_sorting_status(&self, column: usize, state: SortState) -> Result<()> {
        {
            let mut directives = self.directives.write();
            directives.retain(|d| d.column != column);
            if state.is_sorted() {
                directives.push(SortDirective { column, state });
            }
        }

        tracing::debug!(target: targets::SORT, column, ?state, "sorting status changed");
        self.sorting_status_changed.emit((column, state));
        self.layout.dispatch_sorting_status(column, state)
    }

    /// Forgets every column's sort state.
    ///
    /// Live holders are not notified; they pick up `Unsorted` on their next
    /// attach.
    pub fn clear_sorting_status(&self) {
        self.directives.write().clear();
    }

    /// Returns true if any column is sorted.
    pub fn is_sorting(&self) -> bool {
        !self.directives.read().is_empty()
    }

    /// Sorted columns in the order they were sorted.
    pub fn directives(&self) -> Vec<SortDirective> {
        self.directives.read().clone()
    }
}
