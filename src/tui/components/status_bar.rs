//! # StatusBar Component
//!
//! Top line of the screen: where you are, the last status message, and the
//! key hints for the focused pane.
//!
//! ```text
//! Inkwell | 📝 Personal › Daily Journal | Note saved           Tab focus · ^S save · ^Q quit
//! ```
//!
//! Stateless: every field is a prop copied from `App` or `TuiState` each
//! frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct StatusBar {
    /// "emoji name" of the active book, if any.
    pub book: Option<String>,
    /// Title of the open note, if any.
    pub note: Option<String>,
    pub status_message: String,
    pub hints: &'static str,
}

impl StatusBar {
    pub fn new(
        book: Option<String>,
        note: Option<String>,
        status_message: String,
        hints: &'static str,
    ) -> Self {
        Self {
            book,
            note,
            status_message,
            hints,
        }
    }

    fn location(&self) -> Option<String> {
        match (&self.book, &self.note) {
            (Some(book), Some(note)) => Some(format!("{book} › {note}")),
            (Some(book), None) => Some(book.clone()),
            _ => None,
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "Inkwell",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if let Some(location) = self.location() {
            spans.push(Span::raw(format!(" | {location}")));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", self.status_message),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        frame.render_widget(
            Paragraph::new(Line::from(self.hints).right_aligned())
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}
