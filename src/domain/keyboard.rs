/// On-screen keyboard: layout and per-letter state aggregation.
///
/// The aggregate is recomputed from the whole board on every read.
/// Letters that are unscored or never typed are missing from the map;
/// callers treat that as Unset.

use std::collections::HashMap;

use super::letter::{fold_letter, LetterState, Row};

pub const KEY_ENTER: &str = "Enter";
pub const KEY_BACKSPACE: &str = "Backspace";

/// QWERTZ layout with umlauts, top row first.
pub const KEY_ROWS: [&[&str]; 3] = [
    &["Q", "W", "E", "R", "T", "Z", "U", "I", "O", "P", "Ü"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", "Ö", "Ä"],
    &[KEY_ENTER, "Y", "X", "C", "V", "B", "N", "M", KEY_BACKSPACE],
];

/// Best-known state per letter across every non-empty cell of every row.
pub fn aggregate(rows: &[Row]) -> HashMap<char, LetterState> {
    let mut map: HashMap<char, LetterState> = HashMap::new();
    for cell in rows.iter().flat_map(|r| r.cells.iter()) {
        let letter = match cell.letter {
            Some(c) => fold_letter(c),
            None => continue,
        };
        if cell.state > map.get(&letter).copied().unwrap_or_default() {
            map.insert(letter, cell.state);
        }
    }
    map
}

/// State of the key with this label; non-letter keys are always Unset.
pub fn key_state(states: &HashMap<char, LetterState>, label: &str) -> LetterState {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => states.get(&fold_letter(c)).copied().unwrap_or_default(),
        _ => LetterState::Unset,
    }
}
