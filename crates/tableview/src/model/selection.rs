//! Selection state for the table's header strips.
//!
//! [`SelectionHandler`] tracks one selected row and one selected column. A
//! selected column lights up its header; a selected row or cell *shadows* the
//! column headers so the user can see which axis the selection belongs to.
//!
//! # Example
//!
//! ```
//! use tableview::model::{SelectionHandler, SelectionState, SelectionStateQuery};
//!
//! let selection = SelectionHandler::new();
//! selection.set_selected_column_position(2);
//!
//! assert_eq!(selection.selection_state_for_header_position(2), SelectionState::Selected);
//! assert_eq!(selection.selection_state_for_header_position(0), SelectionState::Unselected);
//!
//! selection.selection_changed.connect(|(row, column)| {
//!     println!("row={row:?} column={column:?}");
//! });
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tableview_core::logging::targets;
use tableview_core::Signal;

use crate::adapter::ViewHolder;
use crate::color::Color;

/// Selection state of a header, row or cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Part of a selection on the other axis.
    Shadowed,
    /// Directly selected.
    Selected,
    /// Not selected.
    #[default]
    Unselected,
}

/// Background colors used for each [`SelectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionColors {
    pub selected: Color,
    pub unselected: Color,
    pub shadow: Color,
}

impl Default for SelectionColors {
    fn default() -> Self {
        Self {
            selected: Color::from_rgb8(0xE7, 0xE7, 0xE7),
            unselected: Color::WHITE,
            shadow: Color::from_rgb8(0xF2, 0xF2, 0xF2),
        }
    }
}

impl SelectionColors {
    /// The color painted for `state`.
    pub fn color_for(&self, state: SelectionState) -> Color {
        match state {
            SelectionState::Shadowed => self.shadow,
            SelectionState::Selected => self.selected,
            SelectionState::Unselected => self.unselected,
        }
    }

    /// The background painted for `state`. With shadowing disabled a
    /// shadowed header looks unselected.
    pub fn background_for(&self, state: SelectionState, shadow_enabled: bool) -> Color {
        match state {
            SelectionState::Shadowed if !shadow_enabled => self.unselected,
            _ => self.color_for(state),
        }
    }
}

/// Position-indexed selection queries consumed by the column-header adapter.
///
/// The adapter owns none of this state. [`SelectionHandler`] is the stock
/// implementation; tests and hosts may inject their own.
pub trait SelectionStateQuery {
    /// Live selection state of the column header at `position`.
    fn selection_state_for_header_position(&self, position: usize) -> SelectionState;

    /// Repaint `holder`'s background according to `state`.
    fn change_column_background_color_by_selection_status(
        &self,
        holder: &mut dyn ViewHolder,
        state: SelectionState,
    );
}

#[derive(Debug, Default)]
struct SelectionInner {
    selected_row: Option<usize>,
    selected_column: Option<usize>,
    shadow_enabled: bool,
    colors: SelectionColors,
}

/// Tracks the table's current row/column selection.
///
/// Mutated through `&self` from the UI thread while adapters read it during
/// bind and attach.
///
/// # Signals
///
/// - `selection_changed`: emitted after any change with the new
///   `(selected_row, selected_column)`
pub struct SelectionHandler {
    inner: RwLock<SelectionInner>,

    /// Emitted when the selection changes. Args: (row, column)
    pub selection_changed: Signal<(Option<usize>, Option<usize>)>,
}

impl Default for SelectionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionHandler {
    /// Creates a handler with nothing selected and default colors.
    pub fn new() -> Self {
        Self::with_colors(SelectionColors::default())
    }

    /// Creates a handler that paints with `colors`.
    pub fn with_colors(colors: SelectionColors) -> Self {
        Self {
            inner: RwLock::new(SelectionInner {
                shadow_enabled: true,
                colors,
                ..Default::default()
            }),
            selection_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Whether shadowed headers get the shadow color.
    pub fn is_shadow_enabled(&self) -> bool {
        self.inner.read().shadow_enabled
    }

    /// Enables or disables the shadow color.
    pub fn set_shadow_enabled(&self, enabled: bool) {
        self.inner.write().shadow_enabled = enabled;
    }

    /// The colors currently painted.
    pub fn colors(&self) -> SelectionColors {
        self.inner.read().colors
    }

    /// Replaces the painted colors.
    pub fn set_colors(&self, colors: SelectionColors) {
        self.inner.write().colors = colors;
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Selects a whole column (clears any row selection).
    pub fn set_selected_column_position(&self, column: usize) {
        self.update(None, Some(column));
    }

    /// Selects a whole row (clears any column selection).
    pub fn set_selected_row_position(&self, row: usize) {
        self.update(Some(row), None);
    }

    /// Selects a single cell.
    pub fn set_selected_cell_positions(&self, column: usize, row: usize) {
        self.update(Some(row), Some(column));
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        self.update(None, None);
    }

    fn update(&self, row: Option<usize>, column: Option<usize>) {
        {
            let mut inner = self.inner.write();
            if inner.selected_row == row && inner.selected_column == column {
                return;
            }
            inner.selected_row = row;
            inner.selected_column = column;
        }

        tracing::debug!(target: targets::SELECTION, ?row, ?column, "selection changed");
        self.selection_changed.emit((row, column));
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// The selected row, if any.
    pub fn selected_row_position(&self) -> Option<usize> {
        self.inner.read().selected_row
    }

    /// The selected column, if any.
    pub fn selected_column_position(&self) -> Option<usize> {
        self.inner.read().selected_column
    }

    /// Returns true if a whole column is selected.
    pub fn is_any_column_selected(&self) -> bool {
        let inner = self.inner.read();
        inner.selected_column.is_some() && inner.selected_row.is_none()
    }

    /// Checks if `column` is selected as a whole.
    pub fn is_column_selected(&self, column: usize) -> bool {
        let inner = self.inner.read();
        inner.selected_column == Some(column) && inner.selected_row.is_none()
    }

    /// Checks if `column`'s header is shadowed by a row or cell selection.
    pub fn is_column_shadowed(&self, column: usize) -> bool {
        let inner = self.inner.read();
        match (inner.selected_row, inner.selected_column) {
            (Some(_), Some(selected)) => selected == column,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Selection state of a column header.
    pub fn column_selection_state(&self, column: usize) -> SelectionState {
        if self.is_column_shadowed(column) {
            SelectionState::Shadowed
        } else if self.is_column_selected(column) {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }

    /// Checks if `row` is selected as a whole.
    pub fn is_row_selected(&self, row: usize) -> bool {
        let inner = self.inner.read();
        inner.selected_row == Some(row) && inner.selected_column.is_none()
    }

    /// Checks if `row`'s header is shadowed by a column or cell selection.
    pub fn is_row_shadowed(&self, row: usize) -> bool {
        let inner = self.inner.read();
        match (inner.selected_row, inner.selected_column) {
            (Some(selected), Some(_)) => selected == row,
            (None, Some(_)) => true,
            _ => false,
        }
    }

    /// Selection state of a row header.
    pub fn row_selection_state(&self, row: usize) -> SelectionState {
        if self.is_row_shadowed(row) {
            SelectionState::Shadowed
        } else if self.is_row_selected(row) {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }

    /// Checks if a cell is covered by the selection.
    pub fn is_cell_selected(&self, column: usize, row: usize) -> bool {
        let exact = {
            let inner = self.inner.read();
            inner.selected_column == Some(column) && inner.selected_row == Some(row)
        };
        exact || self.is_column_selected(column) || self.is_row_selected(row)
    }

    /// Selection state of a cell.
    pub fn cell_selection_state(&self, column: usize, row: usize) -> SelectionState {
        if self.is_cell_selected(column, row) {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }

    /// The color this handler paints for `state`, honoring the shadow flag.
    pub fn background_color_for(&self, state: SelectionState) -> Color {
        let inner = self.inner.read();
        inner.colors.background_for(state, inner.shadow_enabled)
    }
}

impl SelectionStateQuery for SelectionHandler {
    fn selection_state_for_header_position(&self, position: usize) -> SelectionState {
        self.column_selection_state(position)
    }

    fn change_column_background_color_by_selection_status(
        &self,
        holder: &mut dyn ViewHolder,
        state: SelectionState,
    ) {
        holder.set_background_color(self.background_color_for(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::ViewHolderBase;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct Plain(ViewHolderBase);

    impl ViewHolder for Plain {
        fn base(&self) -> &ViewHolderBase {
            &self.0
        }

        fn base_mut(&mut self) -> &mut ViewHolderBase {
            &mut self.0
        }
    }

    #[test]
    fn test_nothing_selected() {
        let handler = SelectionHandler::new();
        assert_eq!(handler.column_selection_state(0), SelectionState::Unselected);
        assert_eq!(handler.row_selection_state(0), SelectionState::Unselected);
        assert!(!handler.is_any_column_selected());
    }

    #[test]
    fn test_column_selection() {
        let handler = SelectionHandler::new();
        handler.set_selected_column_position(3);

        assert!(handler.is_column_selected(3));
        assert!(handler.is_any_column_selected());
        assert_eq!(handler.column_selection_state(3), SelectionState::Selected);
        assert_eq!(handler.column_selection_state(2), SelectionState::Unselected);

        // Every row header is shadowed by a column selection
        assert_eq!(handler.row_selection_state(0), SelectionState::Shadowed);
        assert!(handler.is_cell_selected(3, 10));
    }

    #[test]
    fn test_row_selection_shadows_all_columns() {
        let handler = SelectionHandler::new();
        handler.set_selected_row_position(1);

        for column in 0..4 {
            assert_eq!(handler.column_selection_state(column), SelectionState::Shadowed);
        }
        assert_eq!(handler.row_selection_state(1), SelectionState::Selected);
    }

    #[test]
    fn test_cell_selection_shadows_its_column() {
        let handler = SelectionHandler::new();
        handler.set_selected_cell_positions(2, 5);

        assert_eq!(handler.column_selection_state(2), SelectionState::Shadowed);
        assert_eq!(handler.column_selection_state(1), SelectionState::Unselected);
        assert_eq!(handler.row_selection_state(5), SelectionState::Shadowed);
        assert_eq!(handler.cell_selection_state(2, 5), SelectionState::Selected);
        assert_eq!(handler.cell_selection_state(2, 4), SelectionState::Unselected);
    }

    #[test]
    fn test_background_colors() {
        let handler = SelectionHandler::new();
        let colors = handler.colors();
        let mut holder = Plain(ViewHolderBase::new());

        handler.change_column_background_color_by_selection_status(
            &mut holder,
            SelectionState::Shadowed,
        );
        assert_eq!(holder.background_color(), Some(colors.shadow));

        handler.set_shadow_enabled(false);
        handler.change_column_background_color_by_selection_status(
            &mut holder,
            SelectionState::Shadowed,
        );
        assert_eq!(holder.background_color(), Some(colors.unselected));

        handler.change_column_background_color_by_selection_status(
            &mut holder,
            SelectionState::Selected,
        );
        assert_eq!(holder.background_color(), Some(colors.selected));
    }

    #[test]
    fn test_selection_signal_only_on_change() {
        let handler = SelectionHandler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        handler.selection_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        handler.set_selected_column_position(1);
        handler.set_selected_column_position(1);
        handler.clear_selection();
        handler.clear_selection();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
