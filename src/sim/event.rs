/// Events emitted while handling input or firing timers.
/// The presentation layer consumes these for sound/logging.

use crate::domain::letter::{LetterState, ROW_LEN};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    LetterEntered { row: usize, col: usize, letter: char },
    LetterCleared { row: usize, col: usize },
    RowSubmitted { row: usize, states: [LetterState; ROW_LEN] },
    RowAppended { row: usize },
    Won { attempts: usize },
    Reset,
}
