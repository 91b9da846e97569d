/// Input router: terminal key events and on-screen key clicks → `KeyRequest`.
///
/// The origin tag replaces any "which widget got the event" inspection:
///   - `Grid`     — a letter cell has focus and handles the key itself
///   - `Document` — no cell has focus; only Enter, Backspace and letters pass
///   - `OnScreen` — a click on the on-screen keyboard, identified by label
///
/// Releases and anything with Ctrl/Alt/Super/Meta held are dropped so
/// terminal and OS shortcuts are never intercepted. Shift is allowed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::input::{KeyRequest, LogicalKey, Origin};
use crate::domain::keyboard::{KEY_BACKSPACE, KEY_ENTER};
use crate::domain::letter::{fold_letter, is_letter};

const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::META);

/// Route a physical key event. `grid_focused`: a letter cell currently has focus.
pub fn route_key(event: &KeyEvent, grid_focused: bool) -> Option<KeyRequest> {
    if event.kind == KeyEventKind::Release { return None; }
    if event.modifiers.intersects(SHORTCUT_MODIFIERS) { return None; }

    if grid_focused {
        let key = match event.code {
            KeyCode::Left => LogicalKey::Left,
            KeyCode::Right => LogicalKey::Right,
            KeyCode::Enter => LogicalKey::Enter,
            KeyCode::Backspace => LogicalKey::Backspace,
            KeyCode::Char(c) if is_letter(c) => LogicalKey::Letter(fold_letter(c)),
            KeyCode::Char(c) if !c.is_control() => LogicalKey::Other(c),
            _ => return None,
        };
        return Some(KeyRequest::new(key, Origin::Grid));
    }

    let key = match event.code {
        KeyCode::Enter => LogicalKey::Enter,
        KeyCode::Backspace => LogicalKey::Backspace,
        KeyCode::Char(c) if is_letter(c) => LogicalKey::Letter(fold_letter(c)),
        _ => return None,
    };
    Some(KeyRequest::new(key, Origin::Document))
}

/// Route an on-screen keyboard click by key label.
pub fn route_click(label: &str) -> Option<KeyRequest> {
    let key = match label {
        KEY_ENTER => LogicalKey::Enter,
        KEY_BACKSPACE => LogicalKey::Backspace,
        _ => {
            let mut chars = label.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if is_letter(c) => LogicalKey::Letter(fold_letter(c)),
                _ => return None,
            }
        }
    };
    Some(KeyRequest::new(key, Origin::OnScreen))
}
