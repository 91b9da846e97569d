/// Guess scoring.
///
/// Per position: exact match → Correct; letter anywhere in the target →
/// Present; otherwise Absent. Occurrence counts are NOT tracked: a letter
/// that appears once in the target scores Present at every misplaced
/// position it is guessed in.

use super::letter::{fold_letter, LetterState, Row, ROW_LEN};

/// Target word, case-folded once at construction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TargetWord {
    letters: Vec<char>,
}

impl TargetWord {
    /// Callers supply a 5-letter word; anything else is only case-folded.
    pub fn new(word: &str) -> Self {
        TargetWord {
            letters: word.trim().chars().map(fold_letter).collect(),
        }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn contains(&self, c: char) -> bool {
        self.letters.contains(&c)
    }

    pub fn matches(&self, guess: &[char]) -> bool {
        self.letters.as_slice() == guess
    }

    pub fn as_string(&self) -> String {
        self.letters.iter().collect()
    }
}

/// Score a guess against the target.
pub fn score(guess: &[char; ROW_LEN], target: &TargetWord) -> [LetterState; ROW_LEN] {
    let mut states = [LetterState::Unset; ROW_LEN];
    for (i, (&g, state)) in guess.iter().zip(states.iter_mut()).enumerate() {
        *state = if target.letters().get(i) == Some(&g) {
            LetterState::Correct
        } else if target.contains(g) {
            LetterState::Present
        } else {
            LetterState::Absent
        };
    }
    states
}

/// Score a full row in place and lock it.
/// Returns the scored word, or `None` (no change) if the row is locked or incomplete.
pub fn apply(row: &mut Row, target: &TargetWord) -> Option<[char; ROW_LEN]> {
    if row.locked { return None; }
    let guess = row.word()?;
    let states = score(&guess, target);
    for ((cell, &letter), state) in row.cells.iter_mut().zip(guess.iter()).zip(states) {
        cell.letter = Some(letter);
        cell.state = state;
    }
    row.locked = true;
    Some(guess)
}
