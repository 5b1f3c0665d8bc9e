//! Log table view: records in arrival order, shown filtered and sorted.
//!
//! Rows are identified by [`RowId`], the arrival index of a record. Row ids
//! never change, so a search position stays valid when the table is
//! re-sorted; a filtered-out row simply has no view index.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use logsift_search::{LogRecord, SearchDataModel};

/// Stable identity of a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(usize);

impl RowId {
    /// Id of the record that arrived `index`-th.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0)
    }
}

type RowFilter = Box<dyn Fn(&LogRecord) -> bool>;
type RowOrder = Box<dyn Fn(&LogRecord, &LogRecord) -> Ordering>;

#[derive(Default)]
struct TableState {
    records: Vec<Arc<LogRecord>>,
    filter: Option<RowFilter>,
    order: Option<RowOrder>,
    /// Visible rows, top to bottom.
    view: Vec<RowId>,
    /// RowId -> view index, for visible rows only.
    view_index: HashMap<RowId, usize>,
}

impl TableState {
    fn is_visible(&self, record: &LogRecord) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(record))
    }

    fn rebuild(&mut self) {
        let mut view: Vec<RowId> = (0..self.records.len())
            .map(RowId)
            .filter(|id| self.is_visible(&self.records[id.0]))
            .collect();
        if let Some(order) = &self.order {
            // Stable, so equal rows keep arrival order.
            view.sort_by(|a, b| order(&self.records[a.0], &self.records[b.0]));
        }
        self.view_index = view.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        self.view = view;
    }
}

/// A filterable, sortable table of log records.
///
/// Uses interior mutability so the UI and the search model can share one
/// instance through an `Rc`.
#[derive(Default)]
pub struct LogTable {
    state: RefCell<TableState>,
}

impl LogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = LogRecord>) -> Self {
        let table = Self::new();
        table.append(records);
        table
    }

    /// Add records at the end of the arrival order.
    pub fn append(&self, records: impl IntoIterator<Item = LogRecord>) {
        let mut state = self.state.borrow_mut();
        state.records.extend(records.into_iter().map(Arc::new));
        state.rebuild();
    }

    /// Show only records accepted by `filter`.
    pub fn set_filter(&self, filter: impl Fn(&LogRecord) -> bool + 'static) {
        let mut state = self.state.borrow_mut();
        state.filter = Some(Box::new(filter));
        state.rebuild();
    }

    pub fn clear_filter(&self) {
        let mut state = self.state.borrow_mut();
        state.filter = None;
        state.rebuild();
    }

    /// Order visible rows by `order`; ties keep arrival order.
    pub fn sort_by(&self, order: impl Fn(&LogRecord, &LogRecord) -> Ordering + 'static) {
        let mut state = self.state.borrow_mut();
        state.order = Some(Box::new(order));
        state.rebuild();
    }

    /// Back to arrival order.
    pub fn clear_sort(&self) {
        let mut state = self.state.borrow_mut();
        state.order = None;
        state.rebuild();
    }

    /// Record with the given id, visible or not.
    pub fn row(&self, id: RowId) -> Option<Arc<LogRecord>> {
        self.state.borrow().records.get(id.0).cloned()
    }

    /// Current view index of a row, `None` if it is filtered out.
    pub fn view_index_of(&self, id: RowId) -> Option<usize> {
        self.state.borrow().view_index.get(&id).copied()
    }

    /// Row shown at `view_index`.
    pub fn row_at(&self, view_index: usize) -> Option<RowId> {
        self.state.borrow().view.get(view_index).copied()
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.state.borrow().view.len()
    }

    /// Number of records, including filtered-out ones.
    pub fn total_len(&self) -> usize {
        self.state.borrow().records.len()
    }
}

impl fmt::Debug for LogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LogTable")
            .field("records", &state.records.len())
            .field("visible", &state.view.len())
            .field("filtered", &state.filter.is_some())
            .field("sorted", &state.order.is_some())
            .finish()
    }
}

impl SearchDataModel for LogTable {
    type Item = Arc<LogRecord>;
    type Position = RowId;

    fn size(&self) -> usize {
        self.visible_len()
    }

    fn value_at(&self, index: usize) -> Arc<LogRecord> {
        let state = self.state.borrow();
        Arc::clone(&state.records[state.view[index].0])
    }

    fn index_to_position(&self, index: usize) -> RowId {
        self.state.borrow().view[index]
    }

    fn position_to_index(&self, position: &RowId) -> Option<usize> {
        self.view_index_of(*position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_search::{Direction, compile_row, scan};

    fn table() -> LogTable {
        LogTable::from_records(
            ["delta", "alpha", "charlie", "bravo"]
                .into_iter()
                .map(|tag| LogRecord::for_message(format!("{tag} message")).with_tag(tag)),
        )
    }

    fn tags(table: &LogTable) -> Vec<String> {
        (0..table.size())
            .map(|i| table.value_at(i).tag().to_string())
            .collect()
    }

    #[test]
    fn test_arrival_order_by_default() {
        let table = table();
        assert_eq!(tags(&table), ["delta", "alpha", "charlie", "bravo"]);
        assert_eq!(table.index_to_position(2), RowId(2));
    }

    #[test]
    fn test_sort_keeps_row_ids() {
        let table = table();
        table.sort_by(|a, b| a.tag().cmp(b.tag()));

        assert_eq!(tags(&table), ["alpha", "bravo", "charlie", "delta"]);
        assert_eq!(table.view_index_of(RowId(0)), Some(3));
        assert_eq!(table.row_at(0), Some(RowId(1)));

        table.clear_sort();
        assert_eq!(table.view_index_of(RowId(0)), Some(0));
    }

    #[test]
    fn test_filter_hides_rows() {
        let table = table();
        table.set_filter(|r| r.tag() != "alpha");

        assert_eq!(table.size(), 3);
        assert_eq!(table.total_len(), 4);
        assert_eq!(table.position_to_index(&RowId(1)), None);
        assert!(table.row(RowId(1)).is_some());

        table.clear_filter();
        assert_eq!(table.position_to_index(&RowId(1)), Some(1));
    }

    #[test]
    fn test_append_respects_filter_and_sort() {
        let table = table();
        table.sort_by(|a, b| a.tag().cmp(b.tag()));
        table.set_filter(|r| !r.tag().starts_with('c'));
        table.append([LogRecord::for_message("late").with_tag("aardvark")]);

        assert_eq!(tags(&table), ["aardvark", "alpha", "bravo", "delta"]);
        assert_eq!(table.row_at(0), Some(RowId(4)));
    }

    #[test]
    fn test_scan_follows_view_order() {
        let table = table();
        let strategy = compile_row(Some("/^(alpha|delta)$/")).unwrap().unwrap();

        let first = scan(&table, &strategy, None, Direction::Forward).map(|(_, p)| p);
        assert_eq!(first, Some(RowId(0)));

        table.sort_by(|a, b| a.tag().cmp(b.tag()));
        let first = scan(&table, &strategy, None, Direction::Forward).map(|(_, p)| p);
        assert_eq!(first, Some(RowId(1)));
        let next = scan(&table, &strategy, Some(&RowId(1)), Direction::Forward).map(|(_, p)| p);
        assert_eq!(next, Some(RowId(0)));
    }
}
