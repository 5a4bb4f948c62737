//! Key input - crossterm events to host commands.

use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

// =============================================================================
// Host Command
// =============================================================================

/// What the host loop does in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    FocusNext,
    FocusPrevious,
    /// Click the focused element.
    Activate,
    /// Run a pull walk over the whole tree.
    Refresh,
    /// Repaint without touching state (resize).
    Redraw,
    Quit,
}

// =============================================================================
// Conversion
// =============================================================================

/// Map a key event to a command. Releases and repeats are ignored.
pub fn convert_key_event(event: KeyEvent) -> Option<HostCommand> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);

    match event.code {
        KeyCode::Char('c') if ctrl => Some(HostCommand::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(HostCommand::Quit),
        KeyCode::Tab if shift => Some(HostCommand::FocusPrevious),
        KeyCode::Tab | KeyCode::Down | KeyCode::Right => Some(HostCommand::FocusNext),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Left => Some(HostCommand::FocusPrevious),
        KeyCode::Enter | KeyCode::Char(' ') => Some(HostCommand::Activate),
        KeyCode::Char('r') => Some(HostCommand::Refresh),
        _ => None,
    }
}

/// Wait up to `timeout` for the next command.
///
/// Returns `Ok(None)` on timeout or for input that maps to nothing.
pub fn read_command(timeout: Duration) -> io::Result<Option<HostCommand>> {
    if !poll(timeout)? {
        return Ok(None);
    }
    Ok(match read()? {
        Event::Key(key) => convert_key_event(key),
        Event::Resize(_, _) => Some(HostCommand::Redraw),
        _ => None,
    })
}
