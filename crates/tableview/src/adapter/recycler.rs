//! Position-indexed item storage and the adapter contract a recycling strip
//! drives.
//!
//! [`ItemList`] holds the ordered slots of one strip. [`RecyclerAdapter`] is
//! what the recycling substrate calls to classify, create, bind and attach
//! holders.

use tableview_core::logging::targets;
use tableview_core::Signal;

use super::holder::ViewHolder;
use crate::error::{Result, TableError};

/// Structural change to an [`ItemList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemListChange {
    /// The whole list was replaced.
    DataSetChanged,
    /// `count` slots were inserted starting at `position`.
    Inserted { position: usize, count: usize },
    /// `count` slots were removed starting at `position`.
    Removed { position: usize, count: usize },
    /// `count` slots starting at `position` got new values.
    Changed { position: usize, count: usize },
}

/// Ordered item slots of one strip.
///
/// A slot may be empty while the owning dataset is being rebuilt; empty slots
/// read as `None`, exactly like positions past the end.
///
/// # Signals
///
/// - `changed`: emitted after every mutation
pub struct ItemList<T> {
    items: Vec<Option<T>>,

    /// Emitted after the list changes.
    pub changed: Signal<ItemListChange>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self::from_slots(Vec::new())
    }
}

impl<T> ItemList<T> {
    /// Creates a list where every slot is filled.
    pub fn new(items: Vec<T>) -> Self {
        Self::from_slots(items.into_iter().map(Some).collect())
    }

    /// Creates a list from raw slots, some of which may be empty.
    pub fn from_slots(items: Vec<Option<T>>) -> Self {
        Self {
            items,
            changed: Signal::new(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `position`, or `None` for an empty slot or a position past
    /// the end.
    pub fn item(&self, position: usize) -> Option<&T> {
        self.items.get(position).and_then(Option::as_ref)
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Option<T>] {
        &self.items
    }

    /// Replaces every slot with `items`.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.set_slots(items.into_iter().map(Some).collect());
    }

    /// Replaces every slot with raw slots.
    pub fn set_slots(&mut self, items: Vec<Option<T>>) {
        tracing::debug!(target: targets::RECYCLER, count = items.len(), "item list replaced");
        self.items = items;
        self.changed.emit(ItemListChange::DataSetChanged);
    }

    /// Inserts one slot at `position` (which may equal `len()`).
    pub fn add_item(&mut self, position: usize, item: impl Into<Option<T>>) -> Result<()> {
        self.check_insert(position)?;
        self.items.insert(position, item.into());
        self.changed.emit(ItemListChange::Inserted { position, count: 1 });
        Ok(())
    }

    /// Inserts `items` starting at `position`.
    pub fn add_item_range(&mut self, position: usize, items: Vec<T>) -> Result<()> {
        self.check_insert(position)?;
        let count = items.len();
        let tail = self.items.split_off(position);
        self.items.extend(items.into_iter().map(Some));
        self.items.extend(tail);
        self.changed.emit(ItemListChange::Inserted { position, count });
        Ok(())
    }

    /// Removes and returns the slot at `position`.
    pub fn delete_item(&mut self, position: usize) -> Result<Option<T>> {
        self.check_range(position, 1)?;
        let removed = self.items.remove(position);
        self.changed.emit(ItemListChange::Removed { position, count: 1 });
        Ok(removed)
    }

    /// Removes `count` slots starting at `position`.
    pub fn delete_item_range(&mut self, position: usize, count: usize) -> Result<()> {
        self.check_range(position, count)?;
        self.items.drain(position..position + count);
        self.changed.emit(ItemListChange::Removed { position, count });
        Ok(())
    }

    /// Replaces the slot at `position`, returning the previous value.
    pub fn change_item(&mut self, position: usize, item: impl Into<Option<T>>) -> Result<Option<T>> {
        self.check_range(position, 1)?;
        let previous = std::mem::replace(&mut self.items[position], item.into());
        self.changed.emit(ItemListChange::Changed { position, count: 1 });
        Ok(previous)
    }

    /// Replaces consecutive slots starting at `position` with `items`.
    pub fn change_item_range(&mut self, position: usize, items: Vec<T>) -> Result<()> {
        let count = items.len();
        self.check_range(position, count)?;
        for (slot, item) in self.items[position..position + count].iter_mut().zip(items) {
            *slot = Some(item);
        }
        self.changed.emit(ItemListChange::Changed { position, count });
        Ok(())
    }

    fn check_insert(&self, position: usize) -> Result<()> {
        if position > self.items.len() {
            return Err(TableError::PositionOutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn check_range(&self, position: usize, count: usize) -> Result<()> {
        let end = position.checked_add(count);
        if end.is_none_or(|end| end > self.items.len()) {
            return Err(TableError::PositionOutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

/// The contract a recycling substrate drives for one strip.
///
/// The substrate owns a pool of holders keyed by view type. For every
/// position that becomes visible it asks for the view type, reuses or creates
/// a holder, binds it, and then attaches it. Bind always precedes attach.
pub trait RecyclerAdapter {
    /// Value held by one slot.
    type Item;
    /// Holder type produced and bound by this adapter.
    type Holder: ViewHolder;
    /// Whatever the host passes as the parent of new holders.
    type Parent: ?Sized;

    /// Number of slots.
    fn item_count(&self) -> usize;

    /// The item at `position`, `None` for an empty slot or out of range.
    fn item(&self, position: usize) -> Option<&Self::Item>;

    /// Classifier used to key the holder pool.
    fn item_view_type(&self, _position: usize) -> i32 {
        0
    }

    /// Creates a holder for `view_type`.
    fn create_view_holder(&self, parent: &Self::Parent, view_type: i32) -> Self::Holder;

    /// Binds `holder` to `position`.
    fn bind_view_holder(&self, holder: &mut Self::Holder, position: usize) -> Result<()>;

    /// Called when a bound holder becomes visible.
    fn on_view_attached_to_window(&self, _holder: &mut Self::Holder) {}

    /// Called when a holder leaves the screen for the pool.
    fn on_view_recycled(&self, holder: &mut Self::Holder) {
        holder.on_view_recycled();
    }
}
