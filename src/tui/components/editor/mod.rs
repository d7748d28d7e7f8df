//! # Editor Surface
//!
//! Rich-text body of the open note. Holds the text as `RichText` and
//! reports the serialized HTML after every edit with `EditorEvent::Input`;
//! the caller stores that in the editor buffer. Nothing reaches the note
//! registry until save.
//!
//! The surface is also the `FormattingBackend` the toolbar drives:
//!
//! ```text
//! toolbar B ──▶ format_text(&mut surface, Bold)
//!                 ├─ apply_inline_format  (selection, or pending caret style)
//!                 ├─ focus                (surface asks to take focus)
//!                 └─ serialized_content   ──▶ EditorInput(html)
//! ```

mod layout;

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::format::{FormattingBackend, InlineFormat};
use crate::core::markup::{self, InlineStyle, RichText};
use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::event::TuiEvent;

use layout::VisualLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Content changed; carries the serialized body.
    Input(String),
}

#[derive(Debug, Default)]
pub struct EditorSurface {
    text: RichText,
    /// Caret as a glyph index (0..=text.len())
    cursor: usize,
    /// Other end of the selection, if one is being extended.
    anchor: Option<usize>,
    /// Style for the next typed text, set by formatting with no selection.
    pending: Option<InlineStyle>,
    /// First visible visual line.
    scroll: usize,
    /// Scrolled away from the caret by wheel or page keys; the next caret
    /// movement or edit snaps the view back.
    free_scroll: bool,
    /// Text area from the last render.
    area: Rect,
    focus_requested: bool,
    pub focused: bool,
}

impl EditorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the body with stored note content; caret at the end.
    pub fn load(&mut self, html: &str) {
        self.text = markup::trusted(html);
        self.cursor = self.text.len();
        self.anchor = None;
        self.pending = None;
        self.scroll = 0;
        self.free_scroll = false;
    }

    pub fn html(&self) -> String {
        self.text.to_html()
    }

    /// Whether a formatting command asked for focus since the last call.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        hit(self.area, col, row)
    }

    /// Place the caret under a mouse click. Returns false if the click
    /// missed the text area.
    pub fn click(&mut self, col: u16, row: u16) -> bool {
        if !self.contains(col, row) {
            return false;
        }
        let lines = self.lines();
        let line = self.scroll + (row - self.area.y) as usize;
        let target = if line < lines.len() {
            layout::index_at(self.text.glyphs(), &lines, line, (col - self.area.x) as usize)
        } else {
            self.text.len()
        };
        self.collapse_to(target);
        true
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.cursor) {
            std::cmp::Ordering::Less => Some(anchor..self.cursor),
            std::cmp::Ordering::Greater => Some(self.cursor..anchor),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Visual lines at the last rendered width; unwrapped before the first render.
    fn lines(&self) -> Vec<VisualLine> {
        let width = match self.area.width {
            0 => usize::MAX,
            w => w as usize,
        };
        layout::wrap(self.text.glyphs(), width)
    }

    fn collapse_to(&mut self, index: usize) {
        self.free_scroll = false;
        self.cursor = index.min(self.text.len());
        self.anchor = None;
        self.pending = None;
    }

    fn extend_to(&mut self, index: usize) {
        self.anchor.get_or_insert(self.cursor);
        self.cursor = index.min(self.text.len());
        self.pending = None;
    }

    fn input(&self) -> Option<EditorEvent> {
        Some(EditorEvent::Input(self.text.to_html()))
    }

    /// Delete the selection, if any. Returns whether anything was removed.
    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.cursor = range.start;
        self.text.remove(range);
        self.anchor = None;
        true
    }

    fn insert(&mut self, text: &str) -> Option<EditorEvent> {
        self.delete_selection();
        let style = self
            .pending
            .unwrap_or_else(|| self.text.style_before(self.cursor));
        self.cursor += self.text.insert_str(self.cursor, text, style);
        self.input()
    }

    fn vertical_target(&self, down: bool) -> usize {
        let lines = self.lines();
        let glyphs = self.text.glyphs();
        let (line, col) = layout::locate(glyphs, &lines, self.cursor);
        if down {
            if line + 1 >= lines.len() {
                return self.text.len();
            }
            layout::index_at(glyphs, &lines, line + 1, col)
        } else {
            if line == 0 {
                return 0;
            }
            layout::index_at(glyphs, &lines, line - 1, col)
        }
    }

    fn line_bounds(&self) -> VisualLine {
        let lines = self.lines();
        let (line, _) = layout::locate(self.text.glyphs(), &lines, self.cursor);
        lines[line]
    }
}

impl FormattingBackend for EditorSurface {
    fn apply_inline_format(&mut self, format: InlineFormat) {
        self.free_scroll = false;
        match self.selection() {
            Some(range) => self.text.apply_format(range, format),
            None => {
                let current = self
                    .pending
                    .unwrap_or_else(|| self.text.style_before(self.cursor));
                self.pending = Some(current.toggled(format));
            }
        }
    }

    fn serialized_content(&self) -> String {
        self.text.to_html()
    }

    fn focus(&mut self) {
        self.focus_requested = true;
    }
}

impl EventHandler for EditorSurface {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !matches!(event, TuiEvent::ScrollUp | TuiEvent::ScrollDown) {
            self.free_scroll = false;
        }
        match event {
            TuiEvent::InputChar(c) => self.insert(&c.to_string()),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Submit => self.insert("\n"),
            TuiEvent::Backspace => {
                if !self.delete_selection() {
                    if self.cursor == 0 {
                        return None;
                    }
                    self.text.remove(self.cursor - 1..self.cursor);
                    self.cursor -= 1;
                }
                self.pending = None;
                self.input()
            }
            TuiEvent::Delete => {
                if !self.delete_selection() {
                    if self.cursor >= self.text.len() {
                        return None;
                    }
                    self.text.remove(self.cursor..self.cursor + 1);
                }
                self.pending = None;
                self.input()
            }
            TuiEvent::CursorLeft => {
                let target = match self.selection() {
                    Some(range) => range.start,
                    None => self.cursor.saturating_sub(1),
                };
                self.collapse_to(target);
                None
            }
            TuiEvent::CursorRight => {
                let target = match self.selection() {
                    Some(range) => range.end,
                    None => self.cursor + 1,
                };
                self.collapse_to(target);
                None
            }
            TuiEvent::CursorUp => {
                self.collapse_to(self.vertical_target(false));
                None
            }
            TuiEvent::CursorDown => {
                self.collapse_to(self.vertical_target(true));
                None
            }
            TuiEvent::CursorHome => {
                self.collapse_to(self.line_bounds().start);
                None
            }
            TuiEvent::CursorEnd => {
                self.collapse_to(self.line_bounds().end);
                None
            }
            TuiEvent::SelectLeft => {
                self.extend_to(self.cursor.saturating_sub(1));
                None
            }
            TuiEvent::SelectRight => {
                self.extend_to(self.cursor + 1);
                None
            }
            TuiEvent::SelectUp => {
                self.extend_to(self.vertical_target(false));
                None
            }
            TuiEvent::SelectDown => {
                self.extend_to(self.vertical_target(true));
                None
            }
            TuiEvent::SelectAll => {
                self.anchor = Some(0);
                self.cursor = self.text.len();
                self.pending = None;
                None
            }
            TuiEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                self.free_scroll = true;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll += 1;
                self.free_scroll = true;
                None
            }
            _ => None,
        }
    }
}

impl Component for EditorSurface {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.area = inner;
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.lines();
        let glyphs = self.text.glyphs();
        let (cursor_line, cursor_col) = layout::locate(glyphs, &lines, self.cursor);
        let height = inner.height as usize;
        self.scroll = self.scroll.min(lines.len().saturating_sub(1));
        if !self.free_scroll {
            if cursor_line < self.scroll {
                self.scroll = cursor_line;
            } else if cursor_line >= self.scroll + height {
                self.scroll = cursor_line + 1 - height;
            }
        }

        let selection = self.selection();
        let rendered: Vec<Line> = lines
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|visual| {
                let mut spans: Vec<Span> = Vec::new();
                let mut run = String::new();
                let mut run_style = Style::default();
                for index in visual.start..visual.end {
                    let glyph = glyphs[index];
                    let mut style = glyph_style(glyph.style);
                    if selection.as_ref().is_some_and(|r| r.contains(&index)) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    if style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    run_style = style;
                    run.push(glyph.ch);
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, run_style));
                }
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(rendered), inner);

        let caret_visible = (self.scroll..self.scroll + height).contains(&cursor_line);
        if self.focused && caret_visible {
            let x = (cursor_col as u16).min(inner.width.saturating_sub(1));
            let y = (cursor_line - self.scroll) as u16;
            frame.set_cursor_position((inner.x + x, inner.y + y));
        }
    }
}

fn glyph_style(style: InlineStyle) -> Style {
    let mut out = Style::default();
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::format_text;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn loaded(html: &str) -> EditorSurface {
        let mut editor = EditorSurface::new();
        editor.load(html);
        editor
    }

    fn type_str(editor: &mut EditorSurface, text: &str) -> Option<EditorEvent> {
        let mut last = None;
        for c in text.chars() {
            last = editor.handle_event(&TuiEvent::InputChar(c));
        }
        last
    }

    #[test]
    fn test_typing_appends_and_reports_html() {
        let mut editor = loaded("Today was a productive day...");
        let event = type_str(&mut editor, " Done.");
        assert_eq!(
            event,
            Some(EditorEvent::Input(
                "Today was a productive day... Done.".to_string()
            ))
        );
    }

    #[test]
    fn test_enter_inserts_line_break() {
        let mut editor = loaded("a");
        assert_eq!(
            editor.handle_event(&TuiEvent::Submit),
            Some(EditorEvent::Input("a<br>".to_string()))
        );
    }

    #[test]
    fn test_bold_selection() {
        let mut editor = loaded("hello");
        editor.handle_event(&TuiEvent::SelectAll);
        let html = format_text(&mut editor, InlineFormat::Bold);
        assert_eq!(html, "<b>hello</b>");
        assert!(editor.take_focus_request());
        assert!(!editor.take_focus_request());
    }

    #[test]
    fn test_format_twice_restores() {
        let mut editor = loaded("hello");
        editor.handle_event(&TuiEvent::SelectAll);
        format_text(&mut editor, InlineFormat::Italic);
        let html = format_text(&mut editor, InlineFormat::Italic);
        assert_eq!(html, "hello");
    }

    #[test]
    fn test_caret_format_styles_next_input() {
        let mut editor = loaded("a");
        let html = format_text(&mut editor, InlineFormat::Underline);
        assert_eq!(html, "a");
        assert_eq!(
            type_str(&mut editor, "b"),
            Some(EditorEvent::Input("a<u>b</u>".to_string()))
        );
    }

    #[test]
    fn test_typing_inherits_style_before_caret() {
        let mut editor = loaded("<b>x</b>");
        assert_eq!(
            type_str(&mut editor, "y"),
            Some(EditorEvent::Input("<b>xy</b>".to_string()))
        );
    }

    #[test]
    fn test_shift_select_then_type_replaces() {
        let mut editor = loaded("abc");
        editor.handle_event(&TuiEvent::SelectLeft);
        editor.handle_event(&TuiEvent::SelectLeft);
        assert_eq!(editor.selection(), Some(1..3));
        assert_eq!(
            type_str(&mut editor, "Z"),
            Some(EditorEvent::Input("aZ".to_string()))
        );
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut editor = loaded("abc");
        assert_eq!(
            editor.handle_event(&TuiEvent::Backspace),
            Some(EditorEvent::Input("ab".to_string()))
        );
        editor.handle_event(&TuiEvent::CursorHome);
        assert_eq!(
            editor.handle_event(&TuiEvent::Delete),
            Some(EditorEvent::Input("b".to_string()))
        );
        editor.handle_event(&TuiEvent::CursorHome);
        assert_eq!(editor.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        let mut editor = loaded("");
        assert_eq!(
            type_str(&mut editor, "<b>"),
            Some(EditorEvent::Input("&lt;b&gt;".to_string()))
        );
    }

    #[test]
    fn test_load_resets_caret_and_selection() {
        let mut editor = loaded("first");
        editor.handle_event(&TuiEvent::SelectAll);
        editor.load("second");
        assert_eq!(editor.selection(), None);
        type_str(&mut editor, "!");
        assert_eq!(editor.html(), "second!");
    }

    #[test]
    fn test_render_and_click() {
        let mut terminal = Terminal::new(TestBackend::new(12, 5)).unwrap();
        let mut editor = loaded("hello<br>world");
        editor.focused = true;
        terminal.draw(|f| editor.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("hello"));
        assert!(text.contains("world"));

        // Inner area starts at (1, 1); click before "l" of "world"
        assert!(editor.click(4, 2));
        type_str(&mut editor, "_");
        assert_eq!(editor.html(), "hello<br>wor_ld");
        assert!(!editor.click(0, 0));
    }

    #[test]
    fn test_wheel_scroll_moves_view_until_caret_moves() {
        let mut terminal = Terminal::new(TestBackend::new(12, 5)).unwrap();
        let mut editor = loaded("one<br>two<br>three<br>four<br>five");
        let mut draw = |editor: &mut EditorSurface| {
            terminal.draw(|f| editor.render(f, f.area())).unwrap();
            buffer_text(terminal.backend().buffer())
        };
        // Three text rows; the caret at the end keeps the last lines in view
        assert!(!draw(&mut editor).contains("one"));

        editor.handle_event(&TuiEvent::ScrollUp);
        editor.handle_event(&TuiEvent::ScrollUp);
        let text = draw(&mut editor);
        assert!(text.contains("one"));
        assert!(!text.contains("five"));

        type_str(&mut editor, "!");
        let text = draw(&mut editor);
        assert!(text.contains("five!"));
        assert!(!text.contains("one"));
    }

    #[test]
    fn test_vertical_movement() {
        let mut terminal = Terminal::new(TestBackend::new(12, 5)).unwrap();
        let mut editor = loaded("abc<br>defgh");
        terminal.draw(|f| editor.render(f, f.area())).unwrap();
        editor.handle_event(&TuiEvent::CursorUp);
        type_str(&mut editor, "^");
        assert_eq!(editor.html(), "abc^<br>defgh");
        editor.handle_event(&TuiEvent::CursorDown);
        type_str(&mut editor, "v");
        assert_eq!(editor.html(), "abc^<br>defgvh");
    }
}
