//! View holders: the recyclable presentation objects a strip binds.

use crate::color::Color;
use crate::model::{SelectionState, SortState};

/// State every view holder carries regardless of what it renders.
///
/// Embed one in each holder type and return it from
/// [`ViewHolder::base`]/[`ViewHolder::base_mut`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewHolderBase {
    adapter_position: Option<usize>,
    selected: bool,
    background_color: Option<Color>,
}

impl ViewHolderBase {
    /// A fresh, unbound holder state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position the holder is currently bound to.
    pub fn adapter_position(&self) -> Option<usize> {
        self.adapter_position
    }

    /// Records the bound position. `None` marks the holder as unbound.
    pub fn set_adapter_position(&mut self, position: Option<usize>) {
        self.adapter_position = position;
    }

    /// Applies a selection state to the selected flag.
    ///
    /// `Shadowed` leaves the flag untouched; it only affects the background.
    pub fn set_selected(&mut self, state: SelectionState) {
        match state {
            SelectionState::Selected => self.selected = true,
            SelectionState::Unselected => self.selected = false,
            SelectionState::Shadowed => {}
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = Some(color);
    }

    /// Clears binding state before the holder goes back to the pool.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A recyclable presentation object bound to one item at a time.
///
/// Only [`base`](Self::base) and [`base_mut`](Self::base_mut) are required.
/// Holders that render a sort indicator also override
/// [`as_sorter_mut`](Self::as_sorter_mut).
pub trait ViewHolder {
    fn base(&self) -> &ViewHolderBase;

    fn base_mut(&mut self) -> &mut ViewHolderBase;

    fn adapter_position(&self) -> Option<usize> {
        self.base().adapter_position()
    }

    fn set_selected(&mut self, state: SelectionState) {
        self.base_mut().set_selected(state);
    }

    fn is_selected(&self) -> bool {
        self.base().is_selected()
    }

    fn set_background_color(&mut self, color: Color) {
        self.base_mut().set_background_color(color);
    }

    fn background_color(&self) -> Option<Color> {
        self.base().background_color()
    }

    /// The sort-indicator capability, if this holder has one.
    fn as_sorter_mut(&mut self) -> Option<&mut dyn SorterViewHolder> {
        None
    }

    /// Called when the holder leaves the screen and enters the pool.
    fn on_view_recycled(&mut self) {
        self.base_mut().reset();
    }
}

/// A holder that renders a column's sort indicator.
pub trait SorterViewHolder: ViewHolder {
    /// Show `state` on the indicator.
    fn on_sorting_status_changed(&mut self, state: SortState);

    /// The state currently shown.
    fn sort_state(&self) -> SortState;
}
