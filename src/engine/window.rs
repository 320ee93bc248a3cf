use std::collections::VecDeque;

use crate::core::Row;

/// Bounded FIFO of rows kept in strictly increasing step order.
#[derive(Debug, Clone)]
pub struct WindowStore {
    rows: VecDeque<Row>,
    capacity: usize,
}

impl WindowStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            rows: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.back()
    }

    /// Appends `row`, or swaps it in for the last row when `replace` is set
    /// and the window is not empty, then trims. Returns the evicted count.
    pub fn append_or_replace_last(&mut self, row: Row, replace: bool) -> usize {
        debug_assert!(
            self.rows.back().map_or(true, |last| row.step > last.step),
            "rows must be appended in increasing step order"
        );

        if replace && !self.rows.is_empty() {
            self.rows.pop_back();
        }
        self.rows.push_back(row);
        self.trim_to_capacity()
    }

    /// Drops rows from the front until the length fits the capacity.
    pub fn trim_to_capacity(&mut self) -> usize {
        let excess = self.rows.len().saturating_sub(self.capacity);
        self.rows.drain(..excess);
        excess
    }

    /// Owned copy of the rows in order; changing it never touches the store.
    pub fn current_rows(&self) -> Vec<Row> {
        self.rows.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
