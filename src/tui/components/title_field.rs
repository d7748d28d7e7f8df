//! # TitleField Component
//!
//! Single-line input holding the open note's title.
//!
//! Every edit emits `TitleEvent::Changed` with the whole new title; the
//! caller feeds it straight to the registry (renames are not gated by
//! save). The field is reseeded from the registry whenever a note opens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Note title...";

/// High-level events emitted by the TitleField
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleEvent {
    Changed(String),
    /// Enter pressed: move on to the body.
    Submit,
}

pub struct TitleField {
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    pub focused: bool,
}

impl Default for TitleField {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleField {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            focused: false,
        }
    }

    /// Replace the content, cursor at the end.
    pub fn load(&mut self, title: &str) {
        self.buffer = title.to_string();
        self.cursor = self.buffer.len();
    }

    fn changed(&self) -> Option<TitleEvent> {
        Some(TitleEvent::Changed(self.buffer.clone()))
    }
}

impl Component for TitleField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Title ");
        let inner = block.inner(area);

        let cursor_col = self.buffer[..self.cursor].width() as u16;
        let scroll = cursor_col.saturating_sub(inner.width.saturating_sub(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.buffer.as_str())
                .style(Style::default().add_modifier(Modifier::BOLD))
                .scroll((0, scroll))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && inner.width > 0 {
            frame.set_cursor_position((inner.x + cursor_col - scroll, inner.y));
        }
    }
}

impl EventHandler for TitleField {
    type Event = TitleEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                let line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.buffer.insert_str(self.cursor, &line);
                self.cursor += line.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(TitleEvent::Submit),
            _ => None,
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_every_keystroke_reports_full_title() {
        let mut field = TitleField::new();
        field.load("Journa");
        assert_eq!(
            field.handle_event(&TuiEvent::InputChar('l')),
            Some(TitleEvent::Changed("Journal".to_string()))
        );
        assert_eq!(
            field.handle_event(&TuiEvent::Backspace),
            Some(TitleEvent::Changed("Journa".to_string()))
        );
    }

    #[test]
    fn test_cursor_movement_does_not_rename() {
        let mut field = TitleField::new();
        field.load("abc");
        assert_eq!(field.handle_event(&TuiEvent::CursorLeft), None);
        assert_eq!(field.handle_event(&TuiEvent::CursorHome), None);
        assert_eq!(
            field.handle_event(&TuiEvent::Delete),
            Some(TitleEvent::Changed("bc".to_string()))
        );
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TitleField::new();
        field.load("café");
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(field.buffer, "caf!é");
        field.handle_event(&TuiEvent::CursorEnd);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.buffer, "caf!");
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut field = TitleField::new();
        field.handle_event(&TuiEvent::Paste("two\nlines".to_string()));
        assert_eq!(field.buffer, "twolines");
    }

    #[test]
    fn test_backspace_at_start_is_silent() {
        let mut field = TitleField::new();
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        let mut field = TitleField::new();
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Note title..."));
    }
}
