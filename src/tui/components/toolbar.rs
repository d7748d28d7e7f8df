//! # Toolbar Component
//!
//! Formatting buttons above the editor plus the Save button.
//!
//! ```text
//! │ B  I  U │ [ ] HL Link Img │                 ✎ Save │
//! ```
//!
//! Bold, italic and underline run the formatting backend. Checklist,
//! highlight, link and image are drawn and clickable but have no action.
//! Save flips to "✓ Saved!" while the saved indicator is up.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::format::InlineFormat;
use crate::tui::component::{Component, hit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    Bold,
    Italic,
    Underline,
    Checklist,
    Highlight,
    Link,
    Image,
    Save,
}

const FORMAT_GROUP: [ToolbarButton; 3] = [
    ToolbarButton::Bold,
    ToolbarButton::Italic,
    ToolbarButton::Underline,
];

const INSERT_GROUP: [ToolbarButton; 4] = [
    ToolbarButton::Checklist,
    ToolbarButton::Highlight,
    ToolbarButton::Link,
    ToolbarButton::Image,
];

const SEPARATOR: &str = " │ ";

impl ToolbarButton {
    /// Inline format run by this button, if any.
    pub fn format(self) -> Option<InlineFormat> {
        match self {
            ToolbarButton::Bold => Some(InlineFormat::Bold),
            ToolbarButton::Italic => Some(InlineFormat::Italic),
            ToolbarButton::Underline => Some(InlineFormat::Underline),
            _ => None,
        }
    }

    /// Buttons drawn without any wired behavior.
    pub fn is_inert(self) -> bool {
        matches!(
            self,
            ToolbarButton::Checklist
                | ToolbarButton::Highlight
                | ToolbarButton::Link
                | ToolbarButton::Image
        )
    }

    fn label(self, saved: bool) -> &'static str {
        match self {
            ToolbarButton::Bold => " B ",
            ToolbarButton::Italic => " I ",
            ToolbarButton::Underline => " U ",
            ToolbarButton::Checklist => " [ ] ",
            ToolbarButton::Highlight => " HL ",
            ToolbarButton::Link => " Link ",
            ToolbarButton::Image => " Img ",
            ToolbarButton::Save if saved => " ✓ Saved! ",
            ToolbarButton::Save => " ✎ Save ",
        }
    }

    fn style(self, saved: bool) -> Style {
        let base = Style::default().fg(Color::Gray);
        match self {
            ToolbarButton::Bold => base.add_modifier(Modifier::BOLD),
            ToolbarButton::Italic => base.add_modifier(Modifier::ITALIC),
            ToolbarButton::Underline => base.add_modifier(Modifier::UNDERLINED),
            ToolbarButton::Save if saved => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            ToolbarButton::Save => Style::default().fg(Color::Black).bg(Color::Cyan),
            _ => base,
        }
    }
}

/// Persistent state: button extents from the last render.
#[derive(Debug, Default)]
pub struct ToolbarState {
    buttons: Vec<(ToolbarButton, Rect)>,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button_at(&self, col: u16, row: u16) -> Option<ToolbarButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| hit(*rect, col, row))
            .map(|(b, _)| *b)
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
    }
}

/// Transient render wrapper for the toolbar.
pub struct Toolbar<'a> {
    state: &'a mut ToolbarState,
    saved: bool,
}

impl<'a> Toolbar<'a> {
    pub fn new(state: &'a mut ToolbarState, saved: bool) -> Self {
        Self { state, saved }
    }
}

impl Component for Toolbar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.state.buttons.clear();
        if inner.height == 0 {
            return;
        }

        let mut spans = Vec::new();
        let mut x = inner.x;
        let right = inner.x + inner.width;
        let groups: [&[ToolbarButton]; 2] = [&FORMAT_GROUP, &INSERT_GROUP];
        for (i, group) in groups.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
                x = x.saturating_add(SEPARATOR.width() as u16);
            }
            for &button in group {
                let label = button.label(self.saved);
                let width = label.width() as u16;
                if x + width > right {
                    break;
                }
                spans.push(Span::styled(label, button.style(self.saved)));
                self.state
                    .buttons
                    .push((button, Rect::new(x, inner.y, width, 1)));
                x += width;
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);

        // Save sits on the right edge
        let save = ToolbarButton::Save;
        let label = save.label(self.saved);
        let width = label.width() as u16;
        if inner.width >= width && right - width >= x {
            let rect = Rect::new(right - width, inner.y, width, 1);
            frame.render_widget(Paragraph::new(Span::styled(label, save.style(self.saved))), rect);
            self.state.buttons.push((save, rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut ToolbarState, saved: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|f| Toolbar::new(state, saved).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_save_label_follows_indicator() {
        let mut state = ToolbarState::new();
        assert!(render(&mut state, false).contains("Save"));
        let text = render(&mut state, true);
        assert!(text.contains("Saved!"));
    }

    #[test]
    fn test_every_button_is_hittable() {
        let mut state = ToolbarState::new();
        render(&mut state, false);
        // Bold starts right after the left border
        assert_eq!(state.button_at(1, 1), Some(ToolbarButton::Bold));
        assert_eq!(state.button_at(58, 1), Some(ToolbarButton::Save));
        let found: Vec<ToolbarButton> = state.buttons.iter().map(|(b, _)| *b).collect();
        assert_eq!(found.len(), 8);
        assert!(found.contains(&ToolbarButton::Image));
    }

    #[test]
    fn test_only_format_buttons_have_formats() {
        assert_eq!(ToolbarButton::Bold.format(), Some(InlineFormat::Bold));
        assert_eq!(ToolbarButton::Underline.format(), Some(InlineFormat::Underline));
        for button in INSERT_GROUP {
            assert!(button.is_inert());
            assert_eq!(button.format(), None);
        }
        assert!(!ToolbarButton::Save.is_inert());
    }
}
