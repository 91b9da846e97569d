/// Terminal event drain.
///
/// Collects every pending crossterm event once per frame without blocking.
/// Key events are kept raw (modifiers included) for the router; mouse
/// left-clicks keep only their screen position for the renderer's hit test.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Click { x: u16, y: u16 },
    Paste(String),
}

pub struct InputState {
    /// Events collected during the most recent `drain_events()`.
    pub events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.events.push(InputEvent::Key(key)),
                Ok(Event::Mouse(m)) => {
                    if m.kind == MouseEventKind::Down(MouseButton::Left) {
                        self.events.push(InputEvent::Click { x: m.column, y: m.row });
                    }
                }
                Ok(Event::Paste(text)) => self.events.push(InputEvent::Paste(text)),
                // Resize is picked up by the renderer on the next frame.
                _ => {}
            }
        }
    }

    /// Ctrl+C or Ctrl+Q pressed this frame?
    pub fn quit_pressed(&self) -> bool {
        self.events.iter().any(|e| match e {
            InputEvent::Key(k) => is_quit(k),
            _ => false,
        })
    }
}

fn is_quit(k: &KeyEvent) -> bool {
    k.kind != KeyEventKind::Release
        && k.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(k.code, KeyCode::Char('c' | 'C' | 'q' | 'Q'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_needs_control() {
        let mut input = InputState::new();
        input.events.push(InputEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!input.quit_pressed());
        input.events.push(InputEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(input.quit_pressed());
    }
}
