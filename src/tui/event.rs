use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::core::format::InlineFormat;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global commands
    Quit,
    Save,
    FocusNext,
    FocusPrev,
    Resize,

    // Routed to the focused pane
    Submit,
    Escape,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    SelectAll,
    Format(InlineFormat),
    ScrollUp,
    ScrollDown,

    // Pointer
    MouseMove(u16, u16),
    MouseClick(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
            let alt = key_event.modifiers.contains(KeyModifiers::ALT);
            let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);
            match key_event.code {
                KeyCode::Char('q') | KeyCode::Char('c') if ctrl => Some(TuiEvent::Quit),
                KeyCode::Char('s') if ctrl => Some(TuiEvent::Save),
                KeyCode::Char('b') if ctrl => Some(TuiEvent::Format(InlineFormat::Bold)),
                // Ctrl+I only arrives as such with keyboard enhancement; Alt+I always works
                KeyCode::Char('i') if ctrl || alt => Some(TuiEvent::Format(InlineFormat::Italic)),
                KeyCode::Char('u') if ctrl => Some(TuiEvent::Format(InlineFormat::Underline)),
                KeyCode::Char('a') if ctrl => Some(TuiEvent::SelectAll),
                KeyCode::Char(_) if ctrl || alt => None,
                KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
                KeyCode::Tab => Some(TuiEvent::FocusNext),
                KeyCode::BackTab => Some(TuiEvent::FocusPrev),
                KeyCode::Enter => Some(TuiEvent::Submit),
                KeyCode::Esc => Some(TuiEvent::Escape),
                KeyCode::Backspace => Some(TuiEvent::Backspace),
                KeyCode::Delete => Some(TuiEvent::Delete),
                KeyCode::Left if shift => Some(TuiEvent::SelectLeft),
                KeyCode::Right if shift => Some(TuiEvent::SelectRight),
                KeyCode::Up if shift => Some(TuiEvent::SelectUp),
                KeyCode::Down if shift => Some(TuiEvent::SelectDown),
                KeyCode::Left => Some(TuiEvent::CursorLeft),
                KeyCode::Right => Some(TuiEvent::CursorRight),
                KeyCode::Up => Some(TuiEvent::CursorUp),
                KeyCode::Down => Some(TuiEvent::CursorDown),
                KeyCode::Home => Some(TuiEvent::CursorHome),
                KeyCode::End => Some(TuiEvent::CursorEnd),
                KeyCode::PageUp => Some(TuiEvent::ScrollUp),
                KeyCode::PageDown => Some(TuiEvent::ScrollDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            translate(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Save)
        );
        assert_eq!(
            translate(key(KeyCode::Char('b'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Format(InlineFormat::Bold))
        );
        assert_eq!(
            translate(key(KeyCode::Char('i'), KeyModifiers::ALT)),
            Some(TuiEvent::Format(InlineFormat::Italic))
        );
        assert_eq!(
            translate(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
    }

    #[test]
    fn test_plain_and_shifted_chars_are_input() {
        assert_eq!(
            translate(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('x'))
        );
        assert_eq!(
            translate(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('X'))
        );
    }

    #[test]
    fn test_unbound_control_chars_dropped() {
        assert_eq!(translate(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_shift_arrows_select() {
        assert_eq!(
            translate(key(KeyCode::Left, KeyModifiers::SHIFT)),
            Some(TuiEvent::SelectLeft)
        );
        assert_eq!(
            translate(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(TuiEvent::CursorLeft)
        );
    }

    #[test]
    fn test_mouse_events() {
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(moved), Some(TuiEvent::MouseMove(3, 4)));

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 9,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(click), Some(TuiEvent::MouseClick(9, 1)));
    }
}
