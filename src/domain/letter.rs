/// Letter states, cells and rows.
/// State semantics and ordering are centralized here,
/// so the scorer, the keyboard and the renderer agree on them.

/// Number of letter cells in one row (one guess).
pub const ROW_LEN: usize = 5;

/// Match state of a single letter.
///
/// Variant order is the aggregation order:
/// `Unset < Absent < Present < Correct`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum LetterState {
    #[default]
    Unset,
    Absent,   // not in the target
    Present,  // in the target, other position
    Correct,  // same position
}

/// Is `c` part of the playable alphabet (`a-z`, `A-Z`, `ä ö ü Ä Ö Ü ß`)?
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'ä' | 'ö' | 'ü' | 'Ä' | 'Ö' | 'Ü' | 'ß')
}

/// Upper-case a letter, keeping it a single char.
/// `ß` upper-cases to "SS", so it stays as-is.
pub fn fold_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub letter: Option<char>,
    pub state: LetterState,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

/// One guess attempt.
///
/// `locked` is one-way: once set by submission, every mutator below
/// becomes a no-op. `enter` is a presentation flag for freshly
/// appended rows and has no effect on scoring.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Row {
    pub cells: [Cell; ROW_LEN],
    pub locked: bool,
    pub enter: bool,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// A row appended after a submission, flagged for the entry effect.
    pub fn entering() -> Self {
        Row { enter: true, ..Row::default() }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(Cell::is_empty)
    }

    pub fn last_filled(&self) -> Option<usize> {
        self.cells.iter().rposition(|c| !c.is_empty())
    }

    /// Letters of a full row, left to right. `None` while any cell is empty.
    pub fn word(&self) -> Option<[char; ROW_LEN]> {
        let mut out = [' '; ROW_LEN];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter()) {
            *slot = cell.letter?;
        }
        Some(out)
    }

    /// Write a letter into `col`. Returns false if locked or out of range.
    pub fn set_letter(&mut self, col: usize, letter: char) -> bool {
        if self.locked { return false; }
        match self.cells.get_mut(col) {
            Some(cell) => {
                cell.letter = Some(fold_letter(letter));
                true
            }
            None => false,
        }
    }

    /// Clear the letter in `col`. Returns true if a letter was removed.
    pub fn clear_letter(&mut self, col: usize) -> bool {
        if self.locked { return false; }
        match self.cells.get_mut(col) {
            Some(cell) => cell.letter.take().is_some(),
            None => false,
        }
    }
}
