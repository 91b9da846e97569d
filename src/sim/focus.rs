/// Focus navigator: which letter cell receives direct key input.
///
/// Works on (row, col) indices into the board, never on rendered widgets.
/// Focus is only ever placed on an unlocked row; every move is clamped to
/// the focused row.
///
/// ## Deferred focus
///
/// A newly appended row does not exist on screen until the renderer has
/// laid it out. Requests for such a row go into a single `pending` slot
/// that is applied by `surface_ready()` once the renderer reports the
/// row. A later request overwrites an earlier one; there is no queue.

use crate::domain::board::Board;
use crate::domain::letter::ROW_LEN;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }
}

#[derive(Debug, Default)]
pub struct FocusNavigator {
    current: Option<CellPos>,
    pending: Option<CellPos>,
}

impl FocusNavigator {
    pub fn new() -> Self {
        FocusNavigator::default()
    }

    pub fn current(&self) -> Option<CellPos> {
        self.current
    }

    /// Focus a cell now. Refused for locked or missing rows and bad columns.
    pub fn focus(&mut self, board: &Board, pos: CellPos) -> bool {
        let open = board.rows().get(pos.row).is_some_and(|r| !r.locked);
        if !open || pos.col >= ROW_LEN {
            return false;
        }
        self.current = Some(pos);
        true
    }

    pub fn blur(&mut self) {
        self.current = None;
    }

    /// Store a focus request to apply once the row is on screen.
    pub fn request(&mut self, pos: CellPos) {
        self.pending = Some(pos);
    }

    /// Apply the pending request if the surface has laid out its row.
    /// Returns the newly focused cell.
    pub fn surface_ready(&mut self, board: &Board, laid_out_rows: usize) -> Option<CellPos> {
        let pos = self.pending?;
        if pos.row >= laid_out_rows {
            return None;
        }
        self.pending = None;
        if self.focus(board, pos) { Some(pos) } else { None }
    }

    /// Move one cell right after a letter was entered; no-op at row end.
    pub fn advance(&mut self) {
        self.focus_next();
    }

    pub fn focus_next(&mut self) {
        if let Some(pos) = self.current.as_mut() {
            if pos.col + 1 < ROW_LEN {
                pos.col += 1;
            }
        }
    }

    pub fn focus_previous(&mut self) {
        if let Some(pos) = self.current.as_mut() {
            if pos.col > 0 {
                pos.col -= 1;
            }
        }
    }

    /// The cell left of focus, if any.
    pub fn previous(&self) -> Option<CellPos> {
        let pos = self.current?;
        pos.col.checked_sub(1).map(|col| CellPos::new(pos.row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_rows(n: usize) -> Board {
        let mut b = Board::new();
        for _ in 1..n {
            b.active_mut().locked = true;
            b.push_row();
        }
        b
    }

    #[test]
    fn moves_stay_inside_row() {
        let b = Board::new();
        let mut f = FocusNavigator::new();
        assert!(f.focus(&b, CellPos::new(0, 0)));
        f.focus_previous();
        assert_eq!(f.current(), Some(CellPos::new(0, 0)));
        for _ in 0..10 {
            f.advance();
        }
        assert_eq!(f.current(), Some(CellPos::new(0, ROW_LEN - 1)));
        f.focus_previous();
        assert_eq!(f.current(), Some(CellPos::new(0, ROW_LEN - 2)));
    }

    #[test]
    fn locked_row_cannot_be_focused() {
        let b = board_with_rows(2);
        let mut f = FocusNavigator::new();
        assert!(!f.focus(&b, CellPos::new(0, 1)));
        assert!(!f.focus(&b, CellPos::new(5, 0)));
        assert!(!f.focus(&b, CellPos::new(1, ROW_LEN)));
        assert_eq!(f.current(), None);
        assert!(f.focus(&b, CellPos::new(1, 1)));
    }

    #[test]
    fn moves_without_focus_are_noops() {
        let mut f = FocusNavigator::new();
        f.advance();
        f.focus_previous();
        assert_eq!(f.current(), None);
        assert_eq!(f.previous(), None);
    }

    #[test]
    fn pending_waits_for_surface() {
        let b = board_with_rows(2);
        let mut f = FocusNavigator::new();
        f.request(CellPos::new(1, 0));
        // Renderer has only laid out the first row so far.
        assert_eq!(f.surface_ready(&b, 1), None);
        assert_eq!(f.current(), None);
        assert_eq!(f.surface_ready(&b, 2), Some(CellPos::new(1, 0)));
        assert_eq!(f.current(), Some(CellPos::new(1, 0)));
        // Applied exactly once.
        assert_eq!(f.surface_ready(&b, 2), None);
    }

    #[test]
    fn newest_request_overwrites_pending() {
        let b = board_with_rows(3);
        let mut f = FocusNavigator::new();
        f.request(CellPos::new(1, 0));
        f.request(CellPos::new(2, 0));
        assert_eq!(f.surface_ready(&b, 3), Some(CellPos::new(2, 0)));
        assert_eq!(f.surface_ready(&b, 3), None);
    }

    #[test]
    fn previous_cell() {
        let b = Board::new();
        let mut f = FocusNavigator::new();
        f.focus(&b, CellPos::new(0, 3));
        assert_eq!(f.previous(), Some(CellPos::new(0, 2)));
        f.focus(&b, CellPos::new(0, 0));
        assert_eq!(f.previous(), None);
    }
}
