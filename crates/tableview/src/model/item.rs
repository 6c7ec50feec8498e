//! Capabilities a table item can declare.

use std::borrow::Cow;
use std::sync::Arc;

use super::selection::SelectionState;

/// An item that reports its own selection state.
///
/// When the table is selectable, every column-header item must expose this
/// capability through [`TableItem::as_selectable`].
pub trait SelectableModel {
    /// The selection state carried by this item.
    fn selection_state(&self) -> SelectionState;
}

/// A value held by one column-header slot.
///
/// Capabilities are queried explicitly instead of downcasting. The default
/// declares none.
///
/// # Example
///
/// ```
/// use tableview::model::{SelectableModel, SelectionState, TableItem};
///
/// struct Header {
///     title: String,
///     state: SelectionState,
/// }
///
/// impl SelectableModel for Header {
///     fn selection_state(&self) -> SelectionState {
///         self.state
///     }
/// }
///
/// impl TableItem for Header {
///     fn as_selectable(&self) -> Option<&dyn SelectableModel> {
///         Some(self)
///     }
/// }
/// ```
pub trait TableItem {
    /// The selectable capability, if the item has one.
    fn as_selectable(&self) -> Option<&dyn SelectableModel> {
        None
    }
}

impl TableItem for String {}
impl TableItem for &'static str {}
impl TableItem for Cow<'static, str> {}

impl<T: TableItem + ?Sized> TableItem for Box<T> {
    fn as_selectable(&self) -> Option<&dyn SelectableModel> {
        (**self).as_selectable()
    }
}

impl<T: TableItem + ?Sized> TableItem for Arc<T> {
    fn as_selectable(&self) -> Option<&dyn SelectableModel> {
        (**self).as_selectable()
    }
}
