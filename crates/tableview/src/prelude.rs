//! Commonly used types:
//!
//! ```ignore
//! use tableview::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use crate::{Color, Result, TableError, TableViewConfig};
pub use tableview_core::{ConnectionId, Signal};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    ColumnHeaderLayout, ColumnSortHelper, SelectableModel, SelectionHandler, SelectionState,
    SelectionStateQuery, SortState, TableItem,
};

// ============================================================================
// Adapters
// ============================================================================

pub use crate::adapter::{
    ColumnHeaderRecyclerAdapter, RecyclerAdapter, RecyclerStrip, SorterViewHolder, TableAdapter,
    TableView, TableViewContext, ViewHolder, ViewHolderBase,
};
