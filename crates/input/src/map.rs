//! Key mapping from terminal events to game input events.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{InputEvent, Key};

/// Map a terminal key code to a game key.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Check if key should close the window (Ctrl+C).
pub fn is_window_close(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a keyboard event to an input event.
///
/// Terminal auto-repeat (`KeyEventKind::Repeat`) is dropped: held keys are
/// repeated by the game's own timing.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if is_window_close(key) {
        return match key.kind {
            KeyEventKind::Press => Some(InputEvent::WindowClose),
            _ => None,
        };
    }

    let mapped = map_key_code(key.code)?;
    match key.kind {
        KeyEventKind::Press => Some(InputEvent::KeyDown(mapped)),
        KeyEventKind::Release => Some(InputEvent::KeyUp(mapped)),
        KeyEventKind::Repeat => None,
    }
}

/// Map any terminal event. Non-key events produce nothing.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key_event(*key),
        _ => None,
    }
}
