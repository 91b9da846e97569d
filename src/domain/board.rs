/// Board: the append-only list of rows.
///
/// Invariant: every row except the last is locked. The last row is the
/// active row; it is unlocked while a round is in progress and locked
/// once it matched the target.

use super::letter::Row;

#[derive(Clone, Debug)]
pub struct Board {
    rows: Vec<Row>,
}

impl Board {
    /// Fresh board: one empty, unlocked row.
    pub fn new() -> Self {
        Board { rows: vec![Row::new()] }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the active (last) row.
    pub fn active_index(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn active(&self) -> &Row {
        &self.rows[self.active_index()]
    }

    pub fn active_mut(&mut self) -> &mut Row {
        let idx = self.active_index();
        &mut self.rows[idx]
    }

    pub fn row_mut(&mut self, idx: usize) -> Option<&mut Row> {
        self.rows.get_mut(idx)
    }

    /// Append a new editing row. Only valid once the active row is locked.
    /// Returns the new active index.
    pub fn push_row(&mut self) -> usize {
        debug_assert!(self.active().locked, "appending over an unlocked row");
        self.rows.push(Row::entering());
        self.active_index()
    }

    /// Number of submitted rows.
    pub fn attempts(&self) -> usize {
        self.rows.iter().filter(|r| r.locked).count()
    }

    /// At most one unlocked row, and only in last position.
    pub fn is_consistent(&self) -> bool {
        let last = self.active_index();
        self.rows.iter().enumerate().all(|(i, r)| i == last || r.locked)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
