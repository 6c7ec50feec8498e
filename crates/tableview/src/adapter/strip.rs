//! A headless recycling substrate.
//!
//! [`RecyclerStrip`] keeps holders for a contiguous visible range of
//! positions and reuses holders that scroll out through a
//! [`RecycledViewPool`]. It knows nothing about pixels: the host decides which
//! range is visible and the strip makes sure every visible position has
//! exactly one bound, attached holder.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use tableview_core::logging::{span_names, targets};
use tableview_core::PerfSpan;

use super::column_header::ColumnHeaderRecyclerAdapter;
use super::holder::ViewHolder;
use super::recycler::RecyclerAdapter;
use super::TableAdapter;
use crate::error::{Result, TableError};
use crate::model::SortState;

const DEFAULT_MAX_SCRAP: usize = 5;

/// Scrap heap of detached holders, keyed by view type.
pub struct RecycledViewPool<H> {
    scrap: HashMap<i32, Vec<H>>,
    max_scrap: usize,
}

impl<H> Default for RecycledViewPool<H> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCRAP)
    }
}

impl<H> RecycledViewPool<H> {
    /// A pool keeping at most `max_scrap` holders per view type.
    pub fn new(max_scrap: usize) -> Self {
        Self {
            scrap: HashMap::new(),
            max_scrap,
        }
    }

    /// Takes a recycled holder of `view_type`, if one is available.
    pub fn get(&mut self, view_type: i32) -> Option<H> {
        self.scrap.get_mut(&view_type)?.pop()
    }

    /// Returns a holder to the pool. Returns `false` if the heap for
    /// `view_type` was full and the holder was dropped.
    pub fn put(&mut self, view_type: i32, holder: H) -> bool {
        let heap = self.scrap.entry(view_type).or_default();
        if heap.len() >= self.max_scrap {
            return false;
        }
        heap.push(holder);
        true
    }

    /// Number of pooled holders of `view_type`.
    pub fn scrap_count(&self, view_type: i32) -> usize {
        self.scrap.get(&view_type).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.scrap.clear();
    }
}

struct Attached<H> {
    view_type: i32,
    holder: H,
}

/// Lays out one strip of recyclable holders over a visible range.
///
/// For each position entering the range the strip obtains a holder (pool
/// first, adapter otherwise), binds it and then attaches it. Positions leaving
/// the range are recycled into the pool.
pub struct RecyclerStrip<R>
where
    R: RecyclerAdapter,
    R::Parent: Sized,
{
    adapter: R,
    parent: R::Parent,
    pool: RecycledViewPool<R::Holder>,
    attached: BTreeMap<usize, Attached<R::Holder>>,
    requested: Range<usize>,
    visible: Range<usize>,
    created: usize,
}

impl<R> RecyclerStrip<R>
where
    R: RecyclerAdapter,
    R::Parent: Sized,
{
    pub fn new(adapter: R, parent: R::Parent) -> Self {
        Self::with_pool(adapter, parent, RecycledViewPool::default())
    }

    pub fn with_pool(adapter: R, parent: R::Parent, pool: RecycledViewPool<R::Holder>) -> Self {
        Self {
            adapter,
            parent,
            pool,
            attached: BTreeMap::new(),
            requested: 0..0,
            visible: 0..0,
            created: 0,
        }
    }

    pub fn adapter(&self) -> &R {
        &self.adapter
    }

    /// Mutable access to the adapter, e.g. to change its items.
    ///
    /// Follow up with [`notify_data_set_changed`](Self::notify_data_set_changed)
    /// or [`notify_item_changed`](Self::notify_item_changed).
    pub fn adapter_mut(&mut self) -> &mut R {
        &mut self.adapter
    }

    pub fn pool(&self) -> &RecycledViewPool<R::Holder> {
        &self.pool
    }

    /// The range that has bound, attached holders.
    ///
    /// This is the last requested range clamped to the item count, cut short
    /// at the position where a bind failed.
    pub fn visible_range(&self) -> Range<usize> {
        self.visible.clone()
    }

    /// Number of holders the adapter has created so far.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Positions that currently have an attached holder.
    pub fn attached_positions(&self) -> Vec<usize> {
        self.attached.keys().copied().collect()
    }

    pub fn holder(&self, position: usize) -> Option<&R::Holder> {
        self.attached.get(&position).map(|a| &a.holder)
    }

    pub fn holder_mut(&mut self, position: usize) -> Option<&mut R::Holder> {
        self.attached.get_mut(&position).map(|a| &mut a.holder)
    }

    /// Makes `range` the visible range.
    ///
    /// Stops at the first bind failure. Positions before it stay attached and
    /// form the visible range; holders at or after it are recycled. The
    /// requested range is remembered, so
    /// [`notify_data_set_changed`](Self::notify_data_set_changed) retries it
    /// in full once the data is fixed.
    pub fn layout(&mut self, range: Range<usize>) -> Result<()> {
        let _span = PerfSpan::new(span_names::LAYOUT);
        self.requested = range.clone();
        let count = self.adapter.item_count();
        let range = range.start.min(count)..range.end.min(count);

        let leaving: Vec<usize> = self
            .attached
            .keys()
            .copied()
            .filter(|position| !range.contains(position))
            .collect();
        for position in leaving {
            self.recycle(position);
        }

        self.visible = range.start..range.start;
        tracing::trace!(target: targets::RECYCLER, ?range, "laying out strip");

        for position in range {
            if !self.attached.contains_key(&position) {
                if let Err(err) = self.attach_new(position) {
                    let stale: Vec<usize> =
                        self.attached.range(position..).map(|(&p, _)| p).collect();
                    for stale_position in stale {
                        self.recycle(stale_position);
                    }
                    tracing::debug!(
                        target: targets::RECYCLER,
                        position,
                        "layout stopped at failed bind"
                    );
                    return Err(err);
                }
            }
            self.visible.end = position + 1;
        }
        Ok(())
    }

    /// Shifts the visible window so it starts at `first`, keeping its length.
    pub fn scroll_to(&mut self, first: usize) -> Result<()> {
        let len = self.requested.len();
        self.layout(first..first.saturating_add(len))
    }

    /// Rebinds and reattaches the holder at `position`, if it is visible.
    pub fn notify_item_changed(&mut self, position: usize) -> Result<()> {
        let Some(entry) = self.attached.get_mut(&position) else {
            return Ok(());
        };
        self.adapter.bind_view_holder(&mut entry.holder, position)?;
        self.adapter.on_view_attached_to_window(&mut entry.holder);
        Ok(())
    }

    /// Recycles every holder and lays out the last requested range again.
    pub fn notify_data_set_changed(&mut self) -> Result<()> {
        let positions: Vec<usize> = self.attached.keys().copied().collect();
        for position in positions {
            self.recycle(position);
        }
        let range = self.requested.clone();
        self.layout(range)
    }

    /// Runs the attach callback again for every visible holder.
    ///
    /// Hosts call this after state the holders display changed without their
    /// content changing, such as a new selection.
    pub fn reattach_visible(&mut self) {
        for (_, entry) in self.attached.iter_mut() {
            self.adapter.on_view_attached_to_window(&mut entry.holder);
        }
    }

    /// Pushes a sort state into the holder laid out at `column`.
    ///
    /// Only the holder changes. Columns without a live holder are ignored;
    /// they receive the state on their next attach.
    pub fn apply_sorting_status(&mut self, column: usize, state: SortState) -> Result<()> {
        let Some(entry) = self.attached.get_mut(&column) else {
            return Ok(());
        };
        match entry.holder.as_sorter_mut() {
            Some(sorter) => {
                sorter.on_sorting_status_changed(state);
                Ok(())
            }
            None => Err(TableError::NotSortable { position: column }),
        }
    }

    fn attach_new(&mut self, position: usize) -> Result<()> {
        let view_type = self.adapter.item_view_type(position);
        let mut holder = match self.pool.get(view_type) {
            Some(holder) => holder,
            None => {
                self.created += 1;
                self.adapter.create_view_holder(&self.parent, view_type)
            }
        };

        if let Err(err) = self.adapter.bind_view_holder(&mut holder, position) {
            self.adapter.on_view_recycled(&mut holder);
            self.pool.put(view_type, holder);
            return Err(err);
        }

        self.adapter.on_view_attached_to_window(&mut holder);
        self.attached.insert(position, Attached { view_type, holder });
        Ok(())
    }

    fn recycle(&mut self, position: usize) {
        if let Some(Attached {
            view_type,
            mut holder,
        }) = self.attached.remove(&position)
        {
            self.adapter.on_view_recycled(&mut holder);
            if !self.pool.put(view_type, holder) {
                tracing::trace!(target: targets::RECYCLER, view_type, "scrap heap full, holder dropped");
            }
        }
    }
}

impl<A> RecyclerStrip<ColumnHeaderRecyclerAdapter<A>>
where
    A: TableAdapter,
    A::Parent: Sized,
{
    /// Sets the sort state of `column` and shows it on the holder laid out
    /// there.
    ///
    /// The stored state is updated even when the layout or the live holder
    /// rejects it; the first such error is returned. Non-sortable tables
    /// store the state without touching holders.
    pub fn set_sorting_status(&mut self, column: usize, state: SortState) -> Result<()> {
        let dispatched = self
            .adapter
            .column_sort_helper()
            .set_sorting_status(column, state);

        let shown = if self.adapter.table_view().is_sortable() {
            self.apply_sorting_status(column, state)
        } else {
            Ok(())
        };

        dispatched.and(shown)
    }

    /// Forgets every column's sort state and resets the visible indicators.
    pub fn clear_sorting_status(&mut self) -> Result<()> {
        self.adapter.column_sort_helper().clear_sorting_status();
        if !self.adapter.table_view().is_sortable() {
            return Ok(());
        }

        for column in self.attached_positions() {
            self.apply_sorting_status(column, SortState::Unsorted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{ItemList, ViewHolderBase};

    #[derive(Default)]
    struct Cell {
        base: ViewHolderBase,
        text: String,
        binds: usize,
        attaches: usize,
    }

    impl ViewHolder for Cell {
        fn base(&self) -> &ViewHolderBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ViewHolderBase {
            &mut self.base
        }
    }

    struct Words {
        items: ItemList<String>,
        fail_at: Option<usize>,
    }

    impl RecyclerAdapter for Words {
        type Item = String;
        type Holder = Cell;
        type Parent = ();

        fn item_count(&self) -> usize {
            self.items.len()
        }

        fn item(&self, position: usize) -> Option<&String> {
            self.items.item(position)
        }

        fn create_view_holder(&self, _parent: &(), _view_type: i32) -> Cell {
            Cell::default()
        }

        fn bind_view_holder(&self, holder: &mut Cell, position: usize) -> Result<()> {
            if self.fail_at == Some(position) {
                return Err(TableError::NotSelectable { position });
            }
            holder.base_mut().set_adapter_position(Some(position));
            holder.text = self.item(position).cloned().unwrap_or_default();
            holder.binds += 1;
            Ok(())
        }

        fn on_view_attached_to_window(&self, holder: &mut Cell) {
            holder.attaches += 1;
        }
    }

    fn strip(count: usize) -> RecyclerStrip<Words> {
        let words = (0..count).map(|i| format!("col{i}")).collect();
        RecyclerStrip::new(
            Words {
                items: ItemList::new(words),
                fail_at: None,
            },
            (),
        )
    }

    #[test]
    fn test_layout_binds_and_attaches_visible() {
        let mut strip = strip(10);
        strip.layout(0..4).unwrap();

        assert_eq!(strip.attached_positions(), vec![0, 1, 2, 3]);
        let holder = strip.holder(2).unwrap();
        assert_eq!(holder.text, "col2");
        assert_eq!((holder.binds, holder.attaches), (1, 1));
        assert_eq!(strip.created_count(), 4);
    }

    #[test]
    fn test_scroll_reuses_pooled_holders() {
        let mut strip = strip(10);
        strip.layout(0..4).unwrap();
        strip.scroll_to(4).unwrap();

        assert_eq!(strip.attached_positions(), vec![4, 5, 6, 7]);
        assert_eq!(strip.created_count(), 4);
        assert_eq!(strip.holder(5).unwrap().text, "col5");
        assert_eq!(strip.holder(5).unwrap().adapter_position(), Some(5));
    }

    #[test]
    fn test_range_is_clamped() {
        let mut strip = strip(3);
        strip.layout(1..10).unwrap();
        assert_eq!(strip.visible_range(), 1..3);
        assert_eq!(strip.attached_positions(), vec![1, 2]);
    }

    #[test]
    fn test_pool_bound() {
        let mut pool = RecycledViewPool::new(1);
        assert!(pool.put(0, Cell::default()));
        assert!(!pool.put(0, Cell::default()));
        assert!(pool.put(1, Cell::default()));
        assert_eq!(pool.scrap_count(0), 1);
        assert!(pool.get(0).is_some());
        assert!(pool.get(0).is_none());
    }

    #[test]
    fn test_bind_failure_stops_layout() {
        let mut strip = strip(5);
        strip.adapter_mut().fail_at = Some(2);

        assert!(strip.layout(0..5).is_err());
        assert_eq!(strip.attached_positions(), vec![0, 1]);
        assert_eq!(strip.visible_range(), 0..2);
        assert_eq!(strip.pool().scrap_count(0), 1);
    }

    #[test]
    fn test_bind_failure_recycles_holders_past_it() {
        let mut strip = strip(5);
        strip.layout(2..4).unwrap();
        strip.adapter_mut().fail_at = Some(1);

        assert!(strip.layout(0..4).is_err());
        assert_eq!(strip.attached_positions(), vec![0]);
        assert_eq!(strip.visible_range(), 0..1);
        assert!(strip.holder(3).is_none());
    }

    #[test]
    fn test_relayout_after_failure_restores_requested_range() {
        let mut strip = strip(5);
        strip.adapter_mut().fail_at = Some(2);
        assert!(strip.layout(0..4).is_err());

        strip.adapter_mut().fail_at = None;
        strip.notify_data_set_changed().unwrap();

        assert_eq!(strip.visible_range(), 0..4);
        assert_eq!(strip.attached_positions(), vec![0, 1, 2, 3]);
        assert_eq!(strip.holder(3).unwrap().text, "col3");
    }

    #[test]
    fn test_notify_item_changed_rebinds() {
        let mut strip = strip(3);
        strip.layout(0..3).unwrap();
        strip
            .adapter_mut()
            .items
            .change_item(1, "renamed".to_string())
            .unwrap();
        strip.notify_item_changed(1).unwrap();

        let holder = strip.holder(1).unwrap();
        assert_eq!(holder.text, "renamed");
        assert_eq!((holder.binds, holder.attaches), (2, 2));
    }

    #[test]
    fn test_data_set_changed_relayouts() {
        let mut strip = strip(4);
        strip.layout(0..4).unwrap();
        strip.adapter_mut().items.set_items(vec!["a".into(), "b".into()]);
        strip.notify_data_set_changed().unwrap();

        assert_eq!(strip.attached_positions(), vec![0, 1]);
        assert_eq!(strip.holder(0).unwrap().text, "a");
    }

    #[test]
    fn test_reattach_visible() {
        let mut strip = strip(2);
        strip.layout(0..2).unwrap();
        strip.reattach_visible();
        assert_eq!(strip.holder(0).unwrap().attaches, 2);
        assert_eq!(strip.holder(0).unwrap().binds, 1);
    }

    #[test]
    fn test_sort_dispatch_to_plain_holder_fails() {
        let mut strip = strip(2);
        strip.layout(0..1).unwrap();

        assert!(matches!(
            strip.apply_sorting_status(0, SortState::Ascending),
            Err(TableError::NotSortable { position: 0 })
        ));
        assert!(strip.apply_sorting_status(1, SortState::Ascending).is_ok());
    }
}
