//! Adapters that bind table data onto recyclable holders.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  item / view type   ┌──────────────────────────────┐
//! │  TableAdapter│<────────────────────│ ColumnHeaderRecyclerAdapter  │
//! │ (application)│────────────────────>│  bind / attach coordination  │
//! └──────────────┘   content binding   └──────────────────────────────┘
//!        │                                  │             │
//!        │ table_view()                     │ by position │ lazily
//!        v                                  v             v
//! ┌──────────────┐                 ┌────────────────┐ ┌──────────────────┐
//! │  TableView   │────────────────>│SelectionHandler│ │ ColumnSortHelper │
//! │ (mode flags) │                 └────────────────┘ └──────────────────┘
//! └──────────────┘
//! ```
//!
//! A recycling substrate such as [`RecyclerStrip`] drives the coordinator
//! through the [`RecyclerAdapter`] contract.

mod column_header;
mod holder;
mod recycler;
mod strip;

use std::sync::Arc;

use parking_lot::RwLock;

pub use column_header::ColumnHeaderRecyclerAdapter;
pub use holder::{SorterViewHolder, ViewHolder, ViewHolderBase};
pub use recycler::{ItemList, ItemListChange, RecyclerAdapter};
pub use strip::{RecycledViewPool, RecyclerStrip};

use crate::color::Color;
use crate::config::TableViewConfig;
use crate::model::{
    ColumnHeaderLayout, DetachedLayout, SelectionColors, SelectionHandler, SelectionState,
    SelectionStateQuery, TableItem,
};

/// Mode flags and shared collaborators of a table, read-only from adapters.
pub trait TableView {
    fn is_selectable(&self) -> bool;

    fn is_sortable(&self) -> bool;

    /// When set, attach leaves holder backgrounds alone.
    fn is_ignore_selection_colors(&self) -> bool;

    fn selection_handler(&self) -> &dyn SelectionStateQuery;

    /// The column-header strip's layout, used to back the sort helper.
    fn column_header_layout(&self) -> Arc<dyn ColumnHeaderLayout>;

    fn selection_colors(&self) -> SelectionColors {
        SelectionColors::default()
    }

    /// Whether shadowed headers get the shadow color.
    fn is_shadow_enabled(&self) -> bool {
        true
    }
}

/// The application's side of the table: creates and fills holders.
///
/// Only the column-header strip is covered here. The adapter supplies
/// content; selection and sort state are painted by
/// [`ColumnHeaderRecyclerAdapter`].
pub trait TableAdapter {
    /// Value of one column header.
    type ColumnHeader: TableItem;
    /// Holder type for column headers.
    type Holder: ViewHolder;
    /// Parent handed to holder construction.
    type Parent: ?Sized;

    fn table_view(&self) -> Arc<dyn TableView>;

    fn create_column_header_view_holder(
        &self,
        parent: &Self::Parent,
        view_type: i32,
    ) -> Self::Holder;

    /// Fill `holder` with the content of `item`. `item` is `None` for an
    /// empty slot.
    fn bind_column_header_view_holder(
        &self,
        holder: &mut Self::Holder,
        item: Option<&Self::ColumnHeader>,
        position: usize,
    );

    fn column_header_item_view_type(&self, _position: usize) -> i32 {
        0
    }

    /// Background painted at bind for an item reporting `state`.
    fn color_for_selection(&self, state: SelectionState) -> Color {
        let table = self.table_view();
        table
            .selection_colors()
            .background_for(state, table.is_shadow_enabled())
    }
}

/// Stock [`TableView`] built from a [`TableViewConfig`].
///
/// Flags may be flipped at runtime; holders pick the change up on their next
/// bind or attach.
pub struct TableViewContext {
    config: RwLock<TableViewConfig>,
    selection_handler: SelectionHandler,
    column_header_layout: Arc<dyn ColumnHeaderLayout>,
}

impl TableViewContext {
    /// A table with no live column-header layout.
    pub fn new(config: TableViewConfig) -> Self {
        Self::with_layout(config, Arc::new(DetachedLayout))
    }

    /// A table whose sort changes are dispatched to `layout`.
    pub fn with_layout(config: TableViewConfig, layout: Arc<dyn ColumnHeaderLayout>) -> Self {
        let selection_handler = SelectionHandler::with_colors(config.selection_colors());
        selection_handler.set_shadow_enabled(config.shadow_enabled);
        Self {
            config: RwLock::new(config),
            selection_handler,
            column_header_layout: layout,
        }
    }

    /// A snapshot of the current configuration.
    pub fn config(&self) -> TableViewConfig {
        self.config.read().clone()
    }

    /// The concrete selection handler, for mutation by gesture handlers.
    pub fn selection(&self) -> &SelectionHandler {
        &self.selection_handler
    }

    pub fn set_selectable(&self, selectable: bool) {
        self.config.write().selectable = selectable;
    }

    pub fn set_sortable(&self, sortable: bool) {
        self.config.write().sortable = sortable;
    }

    pub fn set_ignore_selection_colors(&self, ignore: bool) {
        self.config.write().ignore_selection_colors = ignore;
    }

    pub fn set_shadow_enabled(&self, enabled: bool) {
        self.config.write().shadow_enabled = enabled;
        self.selection_handler.set_shadow_enabled(enabled);
    }

    pub fn set_selection_colors(&self, colors: SelectionColors) {
        {
            let mut config = self.config.write();
            config.selected_color = colors.selected;
            config.unselected_color = colors.unselected;
            config.shadow_color = colors.shadow;
        }
        self.selection_handler.set_colors(colors);
    }
}

impl TableView for TableViewContext {
    fn is_selectable(&self) -> bool {
        self.config.read().selectable
    }

    fn is_sortable(&self) -> bool {
        self.config.read().sortable
    }

    fn is_ignore_selection_colors(&self) -> bool {
        self.config.read().ignore_selection_colors
    }

    fn selection_handler(&self) -> &dyn SelectionStateQuery {
        &self.selection_handler
    }

    fn column_header_layout(&self) -> Arc<dyn ColumnHeaderLayout> {
        self.column_header_layout.clone()
    }

    fn selection_colors(&self) -> SelectionColors {
        self.config.read().selection_colors()
    }

    fn is_shadow_enabled(&self) -> bool {
        self.config.read().shadow_enabled
    }
}
