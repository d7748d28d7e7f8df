//! # Sidebar Component
//!
//! Column of books on the left edge. Collapsed it shows only each book's
//! emoji; expanded it adds the "My Books" header and book names. The last
//! row is always the "Add Book" button.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::model::{Book, BookColor, BookId};
use crate::tui::component::{Component, hit};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    Book(usize),
    AddBook,
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    Select(usize),
    AddBook,
}

/// Persistent state for the sidebar.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// Keyboard cursor; `book_count` means the Add Book row.
    pub highlighted: usize,
    /// Screen rows recorded during the last render.
    rows: Vec<(SidebarRow, Rect)>,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event, returning a SidebarEvent if a row was activated.
    pub fn handle_event(&mut self, event: &TuiEvent, book_count: usize) -> Option<SidebarEvent> {
        self.highlighted = self.highlighted.min(book_count);
        match event {
            TuiEvent::CursorUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.highlighted = (self.highlighted + 1).min(book_count);
                None
            }
            TuiEvent::Submit => Some(if self.highlighted < book_count {
                SidebarEvent::Select(self.highlighted)
            } else {
                SidebarEvent::AddBook
            }),
            TuiEvent::InputChar('a') | TuiEvent::InputChar('+') => Some(SidebarEvent::AddBook),
            _ => None,
        }
    }

    /// Hit test against the rows drawn last frame.
    pub fn row_at(&self, col: u16, row: u16) -> Option<SidebarRow> {
        self.rows
            .iter()
            .find(|(_, rect)| hit(*rect, col, row))
            .map(|(r, _)| *r)
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    books: &'a [Book],
    selected: Option<BookId>,
    expanded: bool,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        books: &'a [Book],
        selected: Option<BookId>,
        expanded: bool,
        focused: bool,
    ) -> Self {
        Self {
            state,
            books,
            selected,
            expanded,
            focused,
        }
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.expanded { " 📖 My Books " } else { " 📖 " };
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.state.rows.clear();
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let total_rows = self.books.len() + 1;
        let visible = inner.height as usize;
        let first = self.state.highlighted.min(total_rows - 1).saturating_sub(visible - 1);

        for (slot, index) in (first..total_rows).take(visible).enumerate() {
            let rect = Rect::new(inner.x, inner.y + slot as u16, inner.width, 1);
            let row = if index < self.books.len() {
                SidebarRow::Book(index)
            } else {
                SidebarRow::AddBook
            };
            let highlighted = self.focused && index == self.state.highlighted;
            let line = match row {
                SidebarRow::Book(i) => self.book_line(&self.books[i], highlighted),
                SidebarRow::AddBook => {
                    let label = if self.expanded { "+ Add Book" } else { "+" };
                    let mut style = Style::default().fg(Color::Gray);
                    if highlighted {
                        style = style.bg(Color::DarkGray);
                    }
                    Line::from(Span::styled(label, style))
                }
            };
            frame.render_widget(Paragraph::new(line), rect);
            self.state.rows.push((row, rect));
        }
    }
}

impl Sidebar<'_> {
    fn book_line(&self, book: &Book, highlighted: bool) -> Line<'static> {
        let mut style = Style::default().fg(book_color(book.color));
        if self.selected == Some(book.id) {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        } else if highlighted {
            style = style.bg(Color::DarkGray);
        }
        let text = if self.expanded {
            format!("{} {}", book.emoji, book.name)
        } else {
            book.emoji.clone()
        };
        Line::from(Span::styled(text, style))
    }
}

fn book_color(color: BookColor) -> Color {
    match color {
        BookColor::Blue => Color::Blue,
        BookColor::Purple => Color::Magenta,
        BookColor::Yellow => Color::Yellow,
        BookColor::Random => Color::Green,
    }
}
