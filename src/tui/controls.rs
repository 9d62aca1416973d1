//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::sim::types::{ChargeIntent, OverrideMode};

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.speed_up(),
        KeyCode::Char('-') | KeyCode::Left => app.speed_down(),
        KeyCode::Char('c') => app.charge(ChargeIntent::On),
        KeyCode::Char('x') => app.charge(ChargeIntent::Off),
        KeyCode::Char('a') => app.set_override(OverrideMode::Auto),
        KeyCode::Char('f') => app.set_override(OverrideMode::ForceOn),
        KeyCode::Char('n') => app.set_override(OverrideMode::ForceOff),
        KeyCode::Char('d') => app.reset(),
        _ => {}
    }
}
