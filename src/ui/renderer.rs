/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Glyph)
///   2. Compare each glyph with `back` buffer (previous frame)
///   3. Only emit terminal commands for glyphs that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// While composing, every letter cell and on-screen key registers a hit
/// region, so mouse clicks can be mapped back to the board or a key label.
/// After a frame, `laid_out_rows()` reports how many board rows exist on
/// the surface; the session uses it to apply deferred focus.

use std::collections::HashMap;
use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::keyboard::{key_state, KEY_BACKSPACE, KEY_ENTER, KEY_ROWS};
use crate::domain::letter::{LetterState, Row, ROW_LEN};
use crate::sim::focus::CellPos;
use crate::sim::session::GameSession;

// ── Glyph: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    /// Explicit background for every empty terminal cell, also used for
    /// `Clear`, so gaps between rows match the cells.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 18, b: 24 };

    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::White, bg: Glyph::BASE_BG };

    /// Sentinel used to invalidate the back buffer: differs from any real glyph.
    const INVALID: Glyph = Glyph { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Glyphs ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Glyph>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Glyph::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Glyph::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Glyph::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, g: Glyph) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = g;
        }
    }

    fn get(&self, x: usize, y: usize) -> Glyph {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Glyph::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Glyph::new(ch, fg, bg));
        }
    }

    /// Fill `w` columns with `bg` and center `s` inside them.
    fn put_box(&mut self, x: usize, y: usize, w: usize, s: &str, fg: Color, bg: Color) {
        for i in 0..w {
            self.set(x + i, y, Glyph::new(' ', fg, bg));
        }
        let len = s.chars().count();
        self.put_str(x + w.saturating_sub(len) / 2, y, s, fg, bg);
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Glyph::new(' ', Color::White, bg));
        }
    }
}

// ── Hit regions ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HitTarget {
    /// On-screen key, by label.
    Key(&'static str),
    /// Letter cell on the board.
    Cell(CellPos),
}

#[derive(Clone, Copy, Debug)]
struct HitRegion {
    x: usize,
    y: usize,
    w: usize,
    target: HitTarget,
}

// ── Layout ──

const HUD_ROW: usize = 0;
const BOARD_TOP: usize = 2;
/// Terminal columns per letter cell, plus one column gap.
const CELL_W: usize = 5;
const CELL_GAP: usize = 1;
/// Terminal lines per board row (cell line + spacer).
const ROW_H: usize = 2;
/// Lines below the board: gap, 3 keyboard rows with spacers, message, help.
const FOOTER_H: usize = 10;

const BOARD_W: usize = ROW_LEN * CELL_W + (ROW_LEN - 1) * CELL_GAP;

// ── Palette ──

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const EMPTY_BG: Color = Color::Rgb { r: 40, g: 40, b: 52 };
const FOCUS_BG: Color = Color::Rgb { r: 90, g: 90, b: 120 };
const ENTER_BG: Color = Color::Rgb { r: 30, g: 60, b: 80 };
const KEY_BG: Color = Color::Rgb { r: 70, g: 70, b: 80 };

fn state_bg(state: LetterState) -> Color {
    match state {
        LetterState::Unset => EMPTY_BG,
        LetterState::Absent => Color::Rgb { r: 58, g: 58, b: 60 },
        LetterState::Present => Color::Rgb { r: 181, g: 159, b: 59 },
        LetterState::Correct => Color::Rgb { r: 83, g: 141, b: 78 },
    }
}

fn key_width(label: &str) -> usize {
    match label {
        KEY_ENTER => 7,
        KEY_BACKSPACE => 5,
        _ => 3,
    }
}

fn key_caption(label: &str) -> &str {
    match label {
        KEY_ENTER => "ENTER",
        KEY_BACKSPACE => "<-",
        other => other,
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    hits: Vec<HitRegion>,
    laid_out_rows: usize,
    last_round: Option<u32>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            hits: Vec::new(),
            laid_out_rows: 0,
            last_round: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableBracketedPaste,
            SetBackgroundColor(Glyph::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame.
        self.back.cells.fill(Glyph::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            DisableBracketedPaste,
            DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Board rows present on the surface after the last frame.
    pub fn laid_out_rows(&self) -> usize {
        self.laid_out_rows
    }

    /// What is under screen position (x, y)?
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        let (x, y) = (x as usize, y as usize);
        self.hits.iter()
            .find(|h| h.y == y && x >= h.x && x < h.x + h.w)
            .map(|h| h.target)
    }

    pub fn render(&mut self, session: &GameSession) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Glyph::INVALID);
            queue!(self.writer, SetBackgroundColor(Glyph::BASE_BG), Clear(ClearType::All))?;
        }

        // New round → clean repaint (the board shrinks back to one row).
        if self.last_round != Some(session.round()) {
            self.back.cells.fill(Glyph::INVALID);
            queue!(self.writer, SetBackgroundColor(Glyph::BASE_BG), Clear(ClearType::All))?;
            self.last_round = Some(session.round());
        }

        self.front.clear();
        self.hits.clear();
        self.compose(session);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        self.laid_out_rows = session.board().len();
        Ok(())
    }

    // ── Diff flush: only write changed glyphs ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Glyph::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        // Explicit base colors; ResetColor would fall back to the terminal default.
        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Glyph::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let g = self.front.get(x, y);
                if g == self.back.get(x, y) { continue; }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if g.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(g.fg))?;
                    last_fg = g.fg;
                }
                if g.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(g.bg))?;
                    last_bg = g.bg;
                }
                queue!(self.writer, Print(g.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, s: &GameSession) {
        self.compose_hud(s);

        let board_x = self.front.width.saturating_sub(BOARD_W) / 2;
        let visible = (self.front.height.saturating_sub(BOARD_TOP + FOOTER_H) / ROW_H).max(1);
        let rows = s.board().rows();
        // Older rows scroll off the top; the active row stays visible.
        let first = rows.len().saturating_sub(visible);

        for (i, row) in rows.iter().enumerate().skip(first) {
            let y = BOARD_TOP + (i - first) * ROW_H;
            self.compose_row(i, row, s.focused(), board_x, y);
        }

        let shown = rows.len() - first;
        let kb_top = BOARD_TOP + shown * ROW_H + 1;
        self.compose_keyboard(&s.key_states(), kb_top);

        let msg_row = kb_top + KEY_ROWS.len() * ROW_H;
        if s.game_over() {
            let msg = format!(
                " Solved: {} in {} {}! New round shortly... ",
                s.target().as_string(),
                s.attempts(),
                if s.attempts() == 1 { "guess" } else { "guesses" },
            );
            let bg = state_bg(LetterState::Correct);
            self.front.fill_row(msg_row, bg);
            let x = self.front.width.saturating_sub(msg.chars().count()) / 2;
            self.front.put_str(x, msg_row, &msg, Color::White, bg);
        }

        let help = " Type to guess · Enter submit · Click a cell to edit it · \u{2190}/\u{2192} move · Esc unfocus · Ctrl+Q quit";
        self.front.put_str(0, msg_row + 2, help, Color::DarkGrey, Glyph::BASE_BG);
    }

    fn compose_hud(&mut self, s: &GameSession) {
        self.front.fill_row(HUD_ROW, HUD_BG);
        let hud = format!(
            " WORDGRID   Round {:<3}  Guesses {:<3}  Row {} ",
            s.round(),
            s.attempts(),
            s.active_row() + 1,
        );
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);
    }

    fn compose_row(&mut self, idx: usize, row: &Row, focus: Option<CellPos>, x0: usize, y: usize) {
        for (col, cell) in row.cells.iter().enumerate() {
            let x = x0 + col * (CELL_W + CELL_GAP);
            let focused = focus == Some(CellPos::new(idx, col));
            let bg = if focused {
                FOCUS_BG
            } else if row.enter {
                ENTER_BG
            } else {
                state_bg(cell.state)
            };
            let fg = if focused { Color::Yellow } else { Color::White };
            let text = match cell.letter {
                Some(c) => c.to_string(),
                None if focused => "_".to_string(),
                None => String::new(),
            };
            self.front.put_box(x, y, CELL_W, &text, fg, bg);
            if !row.locked {
                self.hits.push(HitRegion {
                    x,
                    y,
                    w: CELL_W,
                    target: HitTarget::Cell(CellPos::new(idx, col)),
                });
            }
        }
    }

    fn compose_keyboard(&mut self, states: &HashMap<char, LetterState>, top: usize) {
        for (r, keys) in KEY_ROWS.iter().enumerate() {
            let y = top + r * ROW_H;
            let total: usize = keys.iter().map(|k| key_width(k) + 1).sum::<usize>().saturating_sub(1);
            let mut x = self.front.width.saturating_sub(total) / 2;
            for &label in keys.iter() {
                let w = key_width(label);
                let bg = match key_state(states, label) {
                    LetterState::Unset => KEY_BG,
                    st => state_bg(st),
                };
                self.front.put_box(x, y, w, key_caption(label), Color::White, bg);
                self.hits.push(HitRegion { x, y, w, target: HitTarget::Key(label) });
                x += w + 1;
            }
        }
    }
}
