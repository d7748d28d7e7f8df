//! # Notes Drawer Component
//!
//! Lists the active book's notes as cards (title + preview). Shown only
//! while a book is selected. The header carries the book's emoji and name
//! and a `+` button that adds a note.
//!
//! Cards are rendered into a `tui_scrollview::ScrollView` so long books
//! scroll; the keyboard cursor is kept in view.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::model::{Book, Note, NoteId};
use crate::tui::component::{Component, hit};
use crate::tui::event::TuiEvent;

const ADD_BUTTON: &str = " + ";
/// Preview lines shown per card.
const PREVIEW_LINES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerRow {
    Note(usize),
    AddNote,
}

/// Events emitted by the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    Select(usize),
    AddNote,
}

/// Persistent state for the notes drawer.
#[derive(Default)]
pub struct NotesDrawerState {
    pub highlighted: usize,
    pub scroll_state: ScrollViewState,
    /// Card extents in scroll-content coordinates: (top, height).
    cards: Vec<(u16, u16)>,
    list_area: Rect,
    add_button: Rect,
}

impl NotesDrawerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, for a freshly opened book.
    pub fn reset(&mut self) {
        self.highlighted = 0;
        self.scroll_state = ScrollViewState::default();
    }

    pub fn handle_event(&mut self, event: &TuiEvent, note_count: usize) -> Option<DrawerEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if note_count > 0 {
                    self.highlighted = (self.highlighted + 1).min(note_count - 1);
                }
                None
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::Submit if self.highlighted < note_count => {
                Some(DrawerEvent::Select(self.highlighted))
            }
            TuiEvent::InputChar('n') | TuiEvent::InputChar('+') => Some(DrawerEvent::AddNote),
            _ => None,
        }
    }

    pub fn row_at(&self, col: u16, row: u16) -> Option<DrawerRow> {
        if hit(self.add_button, col, row) {
            return Some(DrawerRow::AddNote);
        }
        if !hit(self.list_area, col, row) {
            return None;
        }
        let content_y = row - self.list_area.y + self.scroll_state.offset().y;
        self.cards
            .iter()
            .position(|&(top, height)| content_y >= top && content_y < top + height)
            .map(DrawerRow::Note)
    }

    fn keep_highlight_visible(&mut self) {
        let Some(&(top, height)) = self.cards.get(self.highlighted) else {
            return;
        };
        let offset = self.scroll_state.offset();
        let viewport = self.list_area.height;
        let y = if top < offset.y {
            top
        } else if top + height > offset.y + viewport {
            (top + height).saturating_sub(viewport)
        } else {
            return;
        };
        self.scroll_state.set_offset(Position { x: offset.x, y });
    }
}

/// Transient render wrapper for the drawer.
pub struct NotesDrawer<'a> {
    state: &'a mut NotesDrawerState,
    book: &'a Book,
    notes: &'a [Note],
    active: Option<NoteId>,
    focused: bool,
}

impl<'a> NotesDrawer<'a> {
    pub fn new(
        state: &'a mut NotesDrawerState,
        book: &'a Book,
        notes: &'a [Note],
        active: Option<NoteId>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            book,
            notes,
            active,
            focused,
        }
    }
}

impl Component for NotesDrawer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} {} ", self.book.emoji, self.book.name))
            .title_top(Line::from(ADD_BUTTON).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let add_width = ADD_BUTTON.width() as u16;
        self.state.add_button = Rect::new(
            (area.x + area.width).saturating_sub(add_width + 1),
            area.y,
            add_width,
            1,
        );
        self.state.list_area = inner;
        self.state.cards.clear();

        if self.notes.is_empty() {
            let empty = Paragraph::new("No notes yet. Press + to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(empty, inner);
            return;
        }

        // Leave one column for the scrollbar
        let card_width = inner.width.saturating_sub(1);
        let text_width = card_width.saturating_sub(2).max(1) as usize;

        let mut cards = Vec::with_capacity(self.notes.len());
        let mut top: u16 = 0;
        for (index, note) in self.notes.iter().enumerate() {
            let preview: Vec<Line> = textwrap::wrap(&note.preview, text_width)
                .into_iter()
                .take(PREVIEW_LINES)
                .map(|l| Line::from(l.into_owned()))
                .collect();
            let height = preview.len().max(1) as u16 + 2;

            let is_active = self.active == Some(note.id);
            let is_highlighted = self.focused && index == self.state.highlighted;
            let mut border = Style::default().fg(Color::DarkGray);
            if is_active {
                border = Style::default().fg(Color::Cyan);
            } else if is_highlighted {
                border = Style::default().fg(Color::White);
            }
            let title_style = if is_active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let card = Paragraph::new(preview)
                .style(Style::default().fg(Color::Gray))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(border)
                        .title(Line::styled(note.title.clone(), title_style)),
                );
            cards.push((card, top, height));
            self.state.cards.push((top, height));
            top += height;
        }

        self.state.highlighted = self.state.highlighted.min(self.notes.len() - 1);
        self.state.keep_highlight_visible();

        let mut scroll_view = ScrollView::new(Size::new(card_width, top))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        for (card, y, height) in cards {
            scroll_view.render_widget(card, Rect::new(0, y, card_width, height));
        }
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::BookId;
    use crate::core::sample::{sample_books, sample_notes};
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut NotesDrawerState, book: BookId, active: Option<NoteId>) -> String {
        let books = sample_books();
        let notes = sample_notes();
        let book = books.iter().find(|b| b.id == book).unwrap();
        let notes = notes.get(&book.id).cloned().unwrap_or_default();
        let mut terminal = Terminal::new(TestBackend::new(34, 20)).unwrap();
        terminal
            .draw(|f| {
                NotesDrawer::new(state, book, &notes, active, true).render(f, f.area());
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_header_and_cards() {
        let mut state = NotesDrawerState::new();
        let text = render(&mut state, BookId(1), None);
        assert!(text.contains("Personal"));
        assert!(text.contains("Daily Journal"));
        assert!(text.contains("Weekend Plans"));
        assert!(text.contains("Today was a productive day..."));
        assert!(!text.contains("Meeting Notes"));
    }

    #[test]
    fn test_card_hit_testing() {
        let mut state = NotesDrawerState::new();
        render(&mut state, BookId(2), None);
        // Drawer border on row 0; first card occupies rows 1..=3
        assert_eq!(state.row_at(5, 2), Some(DrawerRow::Note(0)));
        let (second_top, _) = state.cards[1];
        assert_eq!(state.row_at(5, 1 + second_top), Some(DrawerRow::Note(1)));
    }

    #[test]
    fn test_add_button_hit_testing() {
        let mut state = NotesDrawerState::new();
        render(&mut state, BookId(3), None);
        assert_eq!(state.row_at(31, 0), Some(DrawerRow::AddNote));
        assert_eq!(state.row_at(2, 0), None);
    }

    #[test]
    fn test_keyboard_selection() {
        let mut state = NotesDrawerState::new();
        state.handle_event(&TuiEvent::CursorDown, 2);
        state.handle_event(&TuiEvent::CursorDown, 2);
        assert_eq!(state.handle_event(&TuiEvent::Submit, 2), Some(DrawerEvent::Select(1)));
        assert_eq!(state.handle_event(&TuiEvent::Submit, 0), None);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('n'), 2),
            Some(DrawerEvent::AddNote)
        );
    }
}
