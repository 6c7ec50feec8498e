//! The column-header strip's recycler adapter.
//!
//! [`ColumnHeaderRecyclerAdapter`] sits between the recycling substrate and
//! the application's [`TableAdapter`]. Content binding is delegated; what this
//! type owns is *when* selection and sort indicators are painted:
//!
//! - **bind** paints the selection state carried by the item itself, and
//!   refuses to bind a selectable table whose item cannot report one;
//! - **attach** re-reads the live selection state by position and the sort
//!   state of the column, because both can change without a rebind.

use std::cell::OnceCell;
use std::sync::Arc;

use tableview_core::logging::{span_names, targets};
use tableview_core::PerfSpan;

use super::holder::ViewHolder;
use super::recycler::{ItemList, RecyclerAdapter};
use super::{TableAdapter, TableView};
use crate::error::{Result, TableError};
use crate::model::{ColumnSortHelper, TableItem};

/// Recycler adapter for the column-header strip.
///
/// # Example
///
/// ```ignore
/// let adapter = ColumnHeaderRecyclerAdapter::new(vec!["Name", "Age"], table_adapter);
///
/// let mut holder = adapter.create_view_holder(&parent, adapter.item_view_type(0));
/// adapter.bind_view_holder(&mut holder, 0)?;
/// adapter.on_view_attached_to_window(&mut holder);
/// ```
pub struct ColumnHeaderRecyclerAdapter<A: TableAdapter> {
    items: ItemList<A::ColumnHeader>,
    table_adapter: Arc<A>,
    table_view: Arc<dyn TableView>,
    column_sort_helper: OnceCell<ColumnSortHelper>,
}

impl<A: TableAdapter> ColumnHeaderRecyclerAdapter<A> {
    /// Creates the adapter over `items`, one per column.
    pub fn new(items: Vec<A::ColumnHeader>, table_adapter: Arc<A>) -> Self {
        Self::with_items(ItemList::new(items), table_adapter)
    }

    /// Creates the adapter over an existing item list.
    pub fn with_items(items: ItemList<A::ColumnHeader>, table_adapter: Arc<A>) -> Self {
        let table_view = table_adapter.table_view();
        Self {
            items,
            table_adapter,
            table_view,
            column_sort_helper: OnceCell::new(),
        }
    }

    pub fn items(&self) -> &ItemList<A::ColumnHeader> {
        &self.items
    }

    /// Mutable access for the table controller.
    ///
    /// The substrate must be told to rebind affected positions afterwards.
    pub fn items_mut(&mut self) -> &mut ItemList<A::ColumnHeader> {
        &mut self.items
    }

    /// Replaces every column header.
    pub fn set_items(&mut self, items: Vec<A::ColumnHeader>) {
        self.items.set_items(items);
    }

    pub fn table_adapter(&self) -> &Arc<A> {
        &self.table_adapter
    }

    /// The table view resolved from the table adapter at construction.
    pub fn table_view(&self) -> &Arc<dyn TableView> {
        &self.table_view
    }

    /// Sort state of every column, created on first use.
    pub fn column_sort_helper(&self) -> &ColumnSortHelper {
        self.column_sort_helper.get_or_init(|| {
            tracing::debug!(target: targets::SORT, "creating column sort helper");
            ColumnSortHelper::new(self.table_view.column_header_layout())
        })
    }

    fn apply_item_selection(
        &self,
        holder: &mut A::Holder,
        item: Option<&A::ColumnHeader>,
        position: usize,
    ) -> Result<()> {
        let Some(item) = item else {
            tracing::trace!(target: targets::ADAPTER, position, "empty slot, selection skipped");
            return Ok(());
        };

        let Some(selectable) = item.as_selectable() else {
            tracing::error!(
                target: targets::ADAPTER,
                position,
                "selectable table bound a header item without selection state"
            );
            return Err(TableError::NotSelectable { position });
        };

        let state = selectable.selection_state();
        holder.set_selected(state);
        holder.set_background_color(self.table_adapter.color_for_selection(state));
        Ok(())
    }
}

impl<A: TableAdapter> RecyclerAdapter for ColumnHeaderRecyclerAdapter<A> {
    type Item = A::ColumnHeader;
    type Holder = A::Holder;
    type Parent = A::Parent;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, position: usize) -> Option<&A::ColumnHeader> {
        self.items.item(position)
    }

    fn item_view_type(&self, position: usize) -> i32 {
        self.table_adapter.column_header_item_view_type(position)
    }

    fn create_view_holder(&self, parent: &A::Parent, view_type: i32) -> A::Holder {
        self.table_adapter
            .create_column_header_view_holder(parent, view_type)
    }

    fn bind_view_holder(&self, holder: &mut A::Holder, position: usize) -> Result<()> {
        let _span = PerfSpan::with_position(span_names::BIND, position);
        holder.base_mut().set_adapter_position(Some(position));

        let item = self.items.item(position);

        if self.table_view.is_selectable() {
            self.apply_item_selection(holder, item, position)?;
        }

        self.table_adapter
            .bind_column_header_view_holder(holder, item, position);
        tracing::trace!(target: targets::ADAPTER, position, "column header bound");
        Ok(())
    }

    fn on_view_attached_to_window(&self, holder: &mut A::Holder) {
        let Some(position) = holder.adapter_position() else {
            tracing::trace!(target: targets::ADAPTER, "unbound holder attached, nothing to sync");
            return;
        };
        let _span = PerfSpan::with_position(span_names::ATTACH, position);

        if self.table_view.is_selectable() {
            let selection = self.table_view.selection_handler();
            let state = selection.selection_state_for_header_position(position);

            if !self.table_view.is_ignore_selection_colors() {
                selection.change_column_background_color_by_selection_status(&mut *holder, state);
            }

            holder.set_selected(state);
        }

        if self.table_view.is_sortable() {
            if let Some(sorter) = holder.as_sorter_mut() {
                let state = self.column_sort_helper().sorting_status(position);
                sorter.on_sorting_status_changed(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{SorterViewHolder, TableViewContext, ViewHolderBase};
    use crate::color::Color;
    use crate::config::TableViewConfig;
    use crate::model::{SelectableModel, SelectionState, SortState};
    use parking_lot::Mutex;

    struct Header {
        title: &'static str,
        state: Option<SelectionState>,
    }

    impl SelectableModel for Header {
        fn selection_state(&self) -> SelectionState {
            self.state.unwrap_or_default()
        }
    }

    impl TableItem for Header {
        fn as_selectable(&self) -> Option<&dyn SelectableModel> {
            self.state.is_some().then_some(self as &dyn SelectableModel)
        }
    }

    #[derive(Default)]
    struct HeaderHolder {
        base: ViewHolderBase,
        text: Option<&'static str>,
        sort: SortState,
        sortable: bool,
    }

    impl ViewHolder for HeaderHolder {
        fn base(&self) -> &ViewHolderBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ViewHolderBase {
            &mut self.base
        }

        fn as_sorter_mut(&mut self) -> Option<&mut dyn SorterViewHolder> {
            if self.sortable { Some(self) } else { None }
        }
    }

    impl SorterViewHolder for HeaderHolder {
        fn on_sorting_status_changed(&mut self, state: SortState) {
            self.sort = state;
        }

        fn sort_state(&self) -> SortState {
            self.sort
        }
    }

    struct Adapter {
        table: Arc<TableViewContext>,
        bound: Mutex<Vec<usize>>,
    }

    impl TableAdapter for Adapter {
        type ColumnHeader = Header;
        type Holder = HeaderHolder;
        type Parent = ();

        fn table_view(&self) -> Arc<dyn TableView> {
            self.table.clone()
        }

        fn create_column_header_view_holder(&self, _parent: &(), view_type: i32) -> HeaderHolder {
            HeaderHolder {
                sortable: view_type == 1,
                ..Default::default()
            }
        }

        fn bind_column_header_view_holder(
            &self,
            holder: &mut HeaderHolder,
            item: Option<&Header>,
            position: usize,
        ) {
            holder.text = item.map(|h| h.title);
            self.bound.lock().push(position);
        }

        fn column_header_item_view_type(&self, _position: usize) -> i32 {
            1
        }
    }

    fn adapter(config: TableViewConfig, headers: Vec<Header>) -> ColumnHeaderRecyclerAdapter<Adapter> {
        let table = Arc::new(TableViewContext::new(config));
        ColumnHeaderRecyclerAdapter::new(
            headers,
            Arc::new(Adapter {
                table,
                bound: Mutex::new(Vec::new()),
            }),
        )
    }

    fn selectable(title: &'static str, state: SelectionState) -> Header {
        Header {
            title,
            state: Some(state),
        }
    }

    #[test]
    fn test_bind_paints_item_selection() {
        let adapter = adapter(
            TableViewConfig::default(),
            vec![
                selectable("Name", SelectionState::Unselected),
                selectable("Age", SelectionState::Selected),
            ],
        );

        let mut holder = adapter.create_view_holder(&(), adapter.item_view_type(1));
        adapter.bind_view_holder(&mut holder, 1).unwrap();

        assert_eq!(holder.text, Some("Age"));
        assert!(holder.is_selected());
        assert_eq!(holder.adapter_position(), Some(1));
        assert_eq!(
            holder.background_color(),
            Some(TableViewConfig::default().selected_color)
        );
    }

    #[test]
    fn test_bind_paints_shadow_as_unselected_when_disabled() {
        let config = TableViewConfig::default().with_shadow_enabled(false);
        let adapter = adapter(
            config.clone(),
            vec![selectable("Name", SelectionState::Shadowed)],
        );

        let mut holder = HeaderHolder::default();
        adapter.bind_view_holder(&mut holder, 0).unwrap();
        assert_eq!(holder.background_color(), Some(config.unselected_color));

        // Attach repaints through the handler and must agree with bind.
        adapter
            .table_adapter()
            .table
            .selection()
            .set_selected_row_position(0);
        adapter.on_view_attached_to_window(&mut holder);
        assert_eq!(holder.background_color(), Some(config.unselected_color));
    }

    #[test]
    fn test_bind_rejects_non_selectable_item() {
        let adapter = adapter(
            TableViewConfig::default(),
            vec![Header {
                title: "Name",
                state: None,
            }],
        );

        let mut holder = HeaderHolder::default();
        let err = adapter.bind_view_holder(&mut holder, 0).unwrap_err();

        assert!(matches!(err, TableError::NotSelectable { position: 0 }));
        assert_eq!(holder.text, None);
        assert!(adapter.table_adapter().bound.lock().is_empty());
    }

    #[test]
    fn test_non_selectable_table_skips_capability_check() {
        let adapter = adapter(
            TableViewConfig::default().with_selectable(false),
            vec![Header {
                title: "Name",
                state: None,
            }],
        );

        let mut holder = HeaderHolder::default();
        adapter.bind_view_holder(&mut holder, 0).unwrap();

        assert_eq!(holder.text, Some("Name"));
        assert_eq!(holder.background_color(), None);
    }

    #[test]
    fn test_attach_reads_live_selection() {
        let adapter = adapter(
            TableViewConfig::default(),
            vec![
                selectable("Name", SelectionState::Unselected),
                selectable("Age", SelectionState::Unselected),
            ],
        );

        let mut holder = HeaderHolder::default();
        adapter.bind_view_holder(&mut holder, 1).unwrap();
        adapter.on_view_attached_to_window(&mut holder);
        assert!(!holder.is_selected());

        adapter.table_adapter().table.selection().set_selected_column_position(1);
        adapter.on_view_attached_to_window(&mut holder);

        assert!(holder.is_selected());
        assert_eq!(
            holder.background_color(),
            Some(TableViewConfig::default().selected_color)
        );
    }

    #[test]
    fn test_attach_pushes_sort_state() {
        let adapter = adapter(
            TableViewConfig::default(),
            vec![
                selectable("Name", SelectionState::Unselected),
                selectable("Age", SelectionState::Unselected),
            ],
        );

        let mut holder = adapter.create_view_holder(&(), 1);
        adapter.bind_view_holder(&mut holder, 0).unwrap();
        adapter.on_view_attached_to_window(&mut holder);
        assert_eq!(holder.sort_state(), SortState::Unsorted);

        adapter
            .column_sort_helper()
            .set_sorting_status(0, SortState::Descending)
            .unwrap();
        adapter.on_view_attached_to_window(&mut holder);
        assert_eq!(holder.sort_state(), SortState::Descending);
    }

    #[test]
    fn test_unbound_holder_attach_is_noop() {
        let adapter = adapter(TableViewConfig::default(), Vec::new());
        let mut holder = HeaderHolder {
            sortable: true,
            ..Default::default()
        };
        holder.set_background_color(Color::BLACK);

        adapter.on_view_attached_to_window(&mut holder);

        assert_eq!(holder.background_color(), Some(Color::BLACK));
        assert_eq!(holder.sort_state(), SortState::Unsorted);
    }

    #[test]
    fn test_sort_helper_is_created_once() {
        let adapter = adapter(TableViewConfig::default(), Vec::new());
        let first = adapter.column_sort_helper() as *const ColumnSortHelper;
        let second = adapter.column_sort_helper() as *const ColumnSortHelper;
        assert_eq!(first, second);
    }
}
