/// GameSession: one player's board, target word and round state.
///
/// ## Row editing
///
/// Two input paths reach the active row:
///   - shared path (`Document` / `OnScreen` origin): letters fill the first
///     empty cell, Backspace clears the last filled cell.
///   - cell path (`Grid` origin): the focused cell handles the key itself.
///     Letters overwrite it, arrows move focus, Backspace clears it or the
///     cell before it, non-letters are rejected.
///
/// Both paths submit on Enter. Every invalid operation is a silent no-op.
///
/// ## Round lifecycle
///
///   InProgress --(guess == target)--> Won --(win_reset_ms)--> InProgress (new board)
///
/// There is no lost state; a wrong guess appends a new row.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::TimingConfig;
use crate::domain::board::Board;
use crate::domain::input::{KeyRequest, LogicalKey, Origin};
use crate::domain::keyboard;
use crate::domain::letter::{fold_letter, is_letter, LetterState, ROW_LEN};
use crate::domain::scoring::{self, TargetWord};
use super::event::GameEvent;
use super::focus::{CellPos, FocusNavigator};
use super::timer::{Timer, TimerQueue};
use super::words::WordList;

pub struct GameSession {
    board: Board,
    game_over: bool,
    target: TargetWord,
    words: WordList,
    focus: FocusNavigator,
    timers: TimerQueue,
    timing: TimingConfig,
    round: u32,
}

// ── Construction / reset ──

impl GameSession {
    pub fn new(mut words: WordList, timing: TimingConfig) -> Self {
        let target = TargetWord::new(&words.pick());
        let mut focus = FocusNavigator::new();
        focus.request(CellPos::new(0, 0));
        info!(words = words.len(), "session started");
        GameSession {
            board: Board::new(),
            game_over: false,
            target,
            words,
            focus,
            timers: TimerQueue::new(),
            timing,
            round: 1,
        }
    }

    fn reset(&mut self) {
        self.board = Board::new();
        self.game_over = false;
        self.target = TargetWord::new(&self.words.pick());
        self.round += 1;
        self.focus.blur();
        self.focus.request(CellPos::new(0, 0));
        info!(round = self.round, "round reset");
    }
}

// ── Read-only view ──

impl GameSession {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_row(&self) -> usize {
        self.board.active_index()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn focused(&self) -> Option<CellPos> {
        self.focus.current()
    }

    pub fn key_states(&self) -> HashMap<char, LetterState> {
        keyboard::aggregate(self.board.rows())
    }

    pub fn attempts(&self) -> usize {
        self.board.attempts()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn target(&self) -> &TargetWord {
        &self.target
    }
}

// ── Input handling ──

impl GameSession {
    pub fn handle(&mut self, req: KeyRequest) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if req.from_grid() {
            if let Some(pos) = self.focus.current() {
                self.handle_cell_key(pos, req.key, &mut events);
                return events;
            }
        }
        // Page-level keys stop during the win pause; clicks hit the locked row instead.
        if req.origin == Origin::Document && self.game_over {
            return events;
        }
        self.handle_shared(req.key, &mut events);
        events
    }

    /// Pasted text into the focused cell: first letter wins, the rest is dropped.
    pub fn paste(&mut self, text: &str) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let pos = match self.focus.current() {
            Some(p) => p,
            None => return events,
        };
        match text.chars().find(|c| is_letter(*c)) {
            Some(c) => self.overwrite_cell(pos, c, &mut events),
            None => debug!("paste without letters ignored"),
        }
        events
    }

    /// Mouse click on a cell. Only cells of an unlocked row take focus.
    pub fn focus_cell(&mut self, row: usize, col: usize) -> bool {
        self.focus.focus(&self.board, CellPos::new(row, col))
    }

    pub fn blur(&mut self) {
        self.focus.blur();
    }

    /// Renderer report: `laid_out_rows` rows now exist on screen.
    pub fn surface_ready(&mut self, laid_out_rows: usize) -> Option<CellPos> {
        self.focus.surface_ready(&self.board, laid_out_rows)
    }

    /// Feed elapsed time to pending timers.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for timer in self.timers.advance(elapsed) {
            match timer {
                Timer::ClearEnter { row } => {
                    if let Some(r) = self.board.row_mut(row) {
                        r.enter = false;
                    }
                }
                Timer::Reset => {
                    self.reset();
                    events.push(GameEvent::Reset);
                }
            }
        }
        events
    }

    fn handle_shared(&mut self, key: LogicalKey, events: &mut Vec<GameEvent>) {
        if self.board.active().locked { return; }
        let row = self.board.active_index();

        match key {
            LogicalKey::Enter => self.submit(events),
            LogicalKey::Backspace => {
                let col = match self.board.active().last_filled() {
                    Some(c) => c,
                    None => return,
                };
                self.board.active_mut().clear_letter(col);
                self.focus.focus(&self.board, CellPos::new(row, col));
                events.push(GameEvent::LetterCleared { row, col });
            }
            LogicalKey::Letter(c) => {
                let col = match self.board.active().first_empty() {
                    Some(c) => c,
                    None => {
                        debug!(row, "row full, letter rejected");
                        return;
                    }
                };
                let letter = fold_letter(c);
                self.board.active_mut().set_letter(col, letter);
                if col + 1 < ROW_LEN {
                    self.focus.focus(&self.board, CellPos::new(row, col + 1));
                }
                events.push(GameEvent::LetterEntered { row, col, letter });
            }
            LogicalKey::Left | LogicalKey::Right | LogicalKey::Other(_) => {}
        }
    }

    fn handle_cell_key(&mut self, pos: CellPos, key: LogicalKey, events: &mut Vec<GameEvent>) {
        match key {
            LogicalKey::Left => self.focus.focus_previous(),
            LogicalKey::Right => self.focus.focus_next(),
            LogicalKey::Enter => self.submit(events),
            LogicalKey::Letter(c) => self.overwrite_cell(pos, c, events),
            LogicalKey::Other(c) => debug!(?c, "non-letter rejected"),
            LogicalKey::Backspace => {
                let row = match self.board.row_mut(pos.row) {
                    Some(r) => r,
                    None => return,
                };
                if row.clear_letter(pos.col) {
                    events.push(GameEvent::LetterCleared { row: pos.row, col: pos.col });
                } else if let Some(prev) = self.focus.previous() {
                    if row.clear_letter(prev.col) {
                        events.push(GameEvent::LetterCleared { row: prev.row, col: prev.col });
                    }
                    self.focus.focus_previous();
                }
            }
        }
    }

    fn overwrite_cell(&mut self, pos: CellPos, c: char, events: &mut Vec<GameEvent>) {
        let letter = fold_letter(c);
        let written = self.board.row_mut(pos.row).is_some_and(|r| r.set_letter(pos.col, letter));
        if written {
            self.focus.advance();
            events.push(GameEvent::LetterEntered { row: pos.row, col: pos.col, letter });
        }
    }

    fn submit(&mut self, events: &mut Vec<GameEvent>) {
        if self.game_over { return; }
        let row = self.board.active_index();
        if !self.board.active().is_full() {
            debug!(row, "incomplete row, submit rejected");
            return;
        }
        let guess = match scoring::apply(self.board.active_mut(), &self.target) {
            Some(g) => g,
            None => return,
        };
        let states = self.board.active().cells.map(|c| c.state);
        events.push(GameEvent::RowSubmitted { row, states });
        // The submitted row is locked now; focus must leave it.
        self.focus.blur();

        if self.target.matches(&guess) {
            self.game_over = true;
            self.timers.schedule(self.timing.win_reset(), Timer::Reset);
            let attempts = self.board.attempts();
            info!(attempts, round = self.round, "target solved");
            events.push(GameEvent::Won { attempts });
            return;
        }

        let new_row = self.board.push_row();
        self.timers.schedule(self.timing.row_enter(), Timer::ClearEnter { row: new_row });
        self.focus.request(CellPos::new(new_row, 0));
        debug_assert!(self.board.is_consistent());
        let word: String = guess.iter().collect();
        info!(row, guess = %word, timers = self.timers.len(), "guess submitted");
        events.push(GameEvent::RowAppended { row: new_row });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterState::{Absent, Correct, Present};

    fn session(target: &str) -> GameSession {
        let mut s = GameSession::new(WordList::fixed(target).unwrap(), TimingConfig::default());
        s.surface_ready(1);
        s
    }

    fn req(key: LogicalKey, origin: Origin) -> KeyRequest {
        KeyRequest::new(key, origin)
    }

    fn type_word(s: &mut GameSession, word: &str, origin: Origin) {
        for c in word.chars() {
            s.handle(req(LogicalKey::Letter(c), origin));
        }
    }

    fn guess(s: &mut GameSession, word: &str) -> Vec<GameEvent> {
        type_word(s, word, Origin::OnScreen);
        s.handle(req(LogicalKey::Enter, Origin::OnScreen))
    }

    fn row_text(s: &GameSession, row: usize) -> String {
        s.board().rows()[row].cells.iter().map(|c| c.letter.unwrap_or('_')).collect()
    }

    fn states(s: &GameSession, row: usize) -> Vec<LetterState> {
        s.board().rows()[row].cells.iter().map(|c| c.state).collect()
    }

    // ── Startup ──

    #[test]
    fn starts_with_first_cell_focused_after_surface() {
        let mut s = GameSession::new(WordList::fixed("APFEL").unwrap(), TimingConfig::default());
        assert_eq!(s.focused(), None);
        assert_eq!(s.surface_ready(1), Some(CellPos::new(0, 0)));
        assert_eq!(s.active_row(), 0);
        assert!(!s.game_over());
        assert_eq!(s.target().as_string(), "APFEL");
    }

    // ── Shared path ──

    #[test]
    fn letters_fill_first_empty_cell_uppercased() {
        let mut s = session("APFEL");
        type_word(&mut s, "ap", Origin::Document);
        assert_eq!(row_text(&s, 0), "AP___");
        assert_eq!(s.focused(), Some(CellPos::new(0, 2)));
    }

    #[test]
    fn sixth_letter_is_rejected() {
        let mut s = session("APFEL");
        type_word(&mut s, "birne", Origin::Document);
        let before = s.board().rows()[0].clone();
        let events = s.handle(req(LogicalKey::Letter('X'), Origin::Document));
        assert!(events.is_empty());
        assert_eq!(s.board().rows()[0], before);
        assert_eq!(s.focused(), Some(CellPos::new(0, ROW_LEN - 1)));
    }

    #[test]
    fn shared_backspace_clears_last_filled() {
        let mut s = session("APFEL");
        type_word(&mut s, "abc", Origin::OnScreen);
        s.handle(req(LogicalKey::Backspace, Origin::OnScreen));
        assert_eq!(row_text(&s, 0), "AB___");
        assert_eq!(s.focused(), Some(CellPos::new(0, 2)));
    }

    #[test]
    fn shared_backspace_on_empty_row_is_noop() {
        let mut s = session("APFEL");
        let events = s.handle(req(LogicalKey::Backspace, Origin::Document));
        assert!(events.is_empty());
        assert_eq!(s.focused(), Some(CellPos::new(0, 0)));
    }

    // ── Submission ──

    #[test]
    fn incomplete_row_is_not_submitted() {
        let mut s = session("APFEL");
        let events = guess(&mut s, "apf");
        assert!(events.iter().all(|e| !matches!(e, GameEvent::RowSubmitted { .. })));
        assert!(!s.board().active().locked);
        assert_eq!(s.board().len(), 1);
    }

    #[test]
    fn wrong_guess_scores_locks_and_appends() {
        let mut s = session("APFEL");
        let events = guess(&mut s, "afpel");
        assert_eq!(states(&s, 0), vec![Correct, Present, Present, Correct, Correct]);
        assert!(s.board().rows()[0].locked);
        assert_eq!(s.active_row(), 1);
        assert!(s.board().active().enter);
        assert!(s.board().is_consistent());
        assert!(events.contains(&GameEvent::RowAppended { row: 1 }));
        assert!(!s.game_over());
    }

    #[test]
    fn duplicate_letters_score_present() {
        let mut s = session("APPLE");
        guess(&mut s, "ppppp");
        assert!(states(&s, 0).iter().all(|st| *st != Absent));
        assert_eq!(states(&s, 0), vec![Present, Correct, Correct, Present, Present]);
    }

    #[test]
    fn focus_moves_to_new_row_only_after_surface_ready() {
        let mut s = session("APFEL");
        guess(&mut s, "birne");
        assert_eq!(s.focused(), None);
        assert_eq!(s.surface_ready(1), None);
        assert_eq!(s.surface_ready(2), Some(CellPos::new(1, 0)));
        assert_eq!(s.surface_ready(2), None);
    }

    #[test]
    fn enter_flag_clears_after_delay() {
        let mut s = session("APFEL");
        guess(&mut s, "birne");
        s.advance(Duration::from_millis(100));
        assert!(s.board().active().enter);
        s.advance(Duration::from_millis(300));
        assert!(!s.board().active().enter);
    }

    #[test]
    fn only_last_row_stays_unlocked() {
        let mut s = session("APFEL");
        for w in ["birne", "traum", "stein", "wolke"] {
            guess(&mut s, w);
            s.surface_ready(s.board().len());
            assert!(s.board().is_consistent());
        }
        assert_eq!(s.board().len(), 5);
        assert_eq!(s.attempts(), 4);
    }

    // ── Winning ──

    #[test]
    fn win_then_reset_after_delay() {
        let mut s = session("APFEL");
        guess(&mut s, "birne");
        s.surface_ready(2);
        let events = guess(&mut s, "apfel");
        assert!(events.contains(&GameEvent::Won { attempts: 2 }));
        assert!(s.game_over());
        assert_eq!(s.focused(), None);
        assert_eq!(s.board().len(), 2);

        // Input is ignored during the observation pause.
        assert!(s.handle(req(LogicalKey::Letter('A'), Origin::Document)).is_empty());
        assert!(s.handle(req(LogicalKey::Letter('A'), Origin::OnScreen)).is_empty());
        assert!(s.handle(req(LogicalKey::Enter, Origin::OnScreen)).is_empty());

        assert!(s.advance(Duration::from_millis(1999)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)), vec![GameEvent::Reset]);
        assert!(!s.game_over());
        assert_eq!(s.board().len(), 1);
        assert!(!s.board().active().locked);
        assert_eq!(row_text(&s, 0), "_____");
        assert_eq!(s.round(), 2);
        assert_eq!(s.surface_ready(1), Some(CellPos::new(0, 0)));
    }

    #[test]
    fn keyboard_states_follow_board() {
        let mut s = session("APFEL");
        guess(&mut s, "afpel");
        let keys = s.key_states();
        assert_eq!(keys[&'A'], Correct);
        assert_eq!(keys[&'F'], Present);
        assert!(keys.get(&'Z').is_none());
    }

    // ── Cell path ──

    #[test]
    fn cell_letter_overwrites_and_advances() {
        let mut s = session("APFEL");
        type_word(&mut s, "abc", Origin::OnScreen);
        assert!(s.focus_cell(0, 1));
        s.handle(req(LogicalKey::Letter('X'), Origin::Grid));
        assert_eq!(row_text(&s, 0), "AXC__");
        assert_eq!(s.focused(), Some(CellPos::new(0, 2)));
    }

    #[test]
    fn cell_rejects_non_letters() {
        let mut s = session("APFEL");
        let events = s.handle(req(LogicalKey::Other('1'), Origin::Grid));
        assert!(events.is_empty());
        assert_eq!(row_text(&s, 0), "_____");
        assert_eq!(s.focused(), Some(CellPos::new(0, 0)));
    }

    #[test]
    fn arrows_stop_at_row_edges() {
        let mut s = session("APFEL");
        s.handle(req(LogicalKey::Left, Origin::Grid));
        assert_eq!(s.focused(), Some(CellPos::new(0, 0)));
        for _ in 0..8 {
            s.handle(req(LogicalKey::Right, Origin::Grid));
        }
        assert_eq!(s.focused(), Some(CellPos::new(0, ROW_LEN - 1)));
        s.handle(req(LogicalKey::Left, Origin::Grid));
        assert_eq!(s.focused(), Some(CellPos::new(0, ROW_LEN - 2)));
    }

    #[test]
    fn cell_backspace_clears_in_place_when_filled() {
        let mut s = session("APFEL");
        type_word(&mut s, "abc", Origin::Grid);
        s.focus_cell(0, 1);
        s.handle(req(LogicalKey::Backspace, Origin::Grid));
        assert_eq!(row_text(&s, 0), "A_C__");
        assert_eq!(s.focused(), Some(CellPos::new(0, 1)));
    }

    #[test]
    fn cell_backspace_on_empty_moves_back_and_clears() {
        let mut s = session("APFEL");
        type_word(&mut s, "ab", Origin::Grid);
        assert_eq!(s.focused(), Some(CellPos::new(0, 2)));
        s.handle(req(LogicalKey::Backspace, Origin::Grid));
        assert_eq!(row_text(&s, 0), "A____");
        assert_eq!(s.focused(), Some(CellPos::new(0, 1)));
    }

    #[test]
    fn cell_backspace_at_row_start_is_noop() {
        let mut s = session("APFEL");
        let events = s.handle(req(LogicalKey::Backspace, Origin::Grid));
        assert!(events.is_empty());
        assert_eq!(s.focused(), Some(CellPos::new(0, 0)));
        assert_eq!(s.active_row(), 0);
    }

    #[test]
    fn paste_keeps_first_letter_only() {
        let mut s = session("APFEL");
        s.paste("  42-äbc");
        assert_eq!(row_text(&s, 0), "Ä____");
        assert_eq!(s.focused(), Some(CellPos::new(0, 1)));
        let events = s.paste("123 !");
        assert!(events.is_empty());
        assert_eq!(row_text(&s, 0), "Ä____");
    }

    #[test]
    fn enter_from_cell_submits() {
        let mut s = session("APFEL");
        type_word(&mut s, "apfel", Origin::Grid);
        s.handle(req(LogicalKey::Enter, Origin::Grid));
        assert!(s.game_over());
    }

    #[test]
    fn locked_row_cannot_take_focus() {
        let mut s = session("APFEL");
        guess(&mut s, "birne");
        assert!(!s.focus_cell(0, 0));
        assert!(s.focus_cell(1, 3));
    }

    #[test]
    fn grid_origin_without_focus_uses_shared_path() {
        let mut s = session("APFEL");
        s.blur();
        s.handle(req(LogicalKey::Letter('Q'), Origin::Grid));
        assert_eq!(row_text(&s, 0), "Q____");
    }
}
