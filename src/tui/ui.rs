//! Frame layout: status line on top, then the sidebar, the notes drawer
//! (only while a book is selected) and the editor column.
//!
//! ```text
//! ┌ status bar ──────────────────────────────────────────┐
//! │ sidebar │ drawer     │ toolbar                        │
//! │         │            │ title                          │
//! │         │            │ body                           │
//! └─────────┴────────────┴────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{EmptyState, NotesDrawer, Sidebar, StatusBar, Toolbar};
use crate::tui::{Focus, Regions, TuiState};

const TOOLBAR_HEIGHT: u16 = 3;
const TITLE_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [status_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let sidebar_width = if app.sidebar_expanded {
        tui.layout.sidebar_expanded_width
    } else {
        tui.layout.sidebar_collapsed_width
    };
    let book = app.selected_book();
    let mut constraints = vec![Length(sidebar_width)];
    if book.is_some() {
        constraints.push(Length(tui.layout.drawer_width));
    }
    constraints.push(Min(0));
    let columns = Layout::horizontal(constraints).split(main_area);

    let mut regions = Regions {
        sidebar: columns[0],
        ..Regions::default()
    };

    Sidebar::new(
        &mut tui.sidebar,
        &app.books,
        app.selection.book(),
        app.sidebar_expanded,
        tui.focus == Focus::Sidebar,
    )
    .render(frame, columns[0]);

    if let Some(book) = book {
        regions.drawer = columns[1];
        NotesDrawer::new(
            &mut tui.drawer,
            book,
            app.drawer_notes(),
            app.selection.note(),
            tui.focus == Focus::Drawer,
        )
        .render(frame, columns[1]);
    }

    let editor_area = columns[columns.len() - 1];
    if app.selected_note().is_some() {
        draw_editor(frame, editor_area, app, tui, &mut regions);
    } else {
        tui.toolbar.clear();
        EmptyState.render(frame, editor_area);
    }
    tui.regions = regions;

    let mut status_bar = StatusBar::new(
        book.map(|b| format!("{} {}", b.emoji, b.name)),
        app.selected_note().map(|n| n.title.clone()),
        app.status_message.clone(),
        hints(tui.focus),
    );
    status_bar.render(frame, status_area);
}

fn draw_editor(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, regions: &mut Regions) {
    use Constraint::{Length, Min};
    let [toolbar_area, title_area, body_area] =
        Layout::vertical([Length(TOOLBAR_HEIGHT), Length(TITLE_HEIGHT), Min(0)]).areas(area);

    Toolbar::new(&mut tui.toolbar, app.saved_indicator.visible).render(frame, toolbar_area);

    tui.title_field.focused = tui.focus == Focus::Title;
    tui.title_field.render(frame, title_area);
    regions.title = title_area;

    tui.editor.focused = tui.focus == Focus::Body;
    tui.editor.render(frame, body_area);
}

fn hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Sidebar => "↑↓ move · ⏎ open · a add book · Tab next · ^Q quit ",
        Focus::Drawer => "↑↓ move · ⏎ open · n new note · Tab next · ^Q quit ",
        Focus::Title => "type to rename · ⏎ body · ^S save · ^Q quit ",
        Focus::Body => "^B ^I ^U format · ^S save · Tab next · ^Q quit ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::config::Layout as PaneWidths;
    use crate::core::model::{BookId, NoteId};
    use crate::test_support::{buffer_text, open_note, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_initial_screen() {
        let app = test_app();
        let mut tui = TuiState::new(PaneWidths::default());
        let text = draw(&app, &mut tui);
        assert!(text.contains("Inkwell"));
        assert!(text.contains("Select a note to start writing"));
        // Collapsed sidebar: emoji only
        assert!(!text.contains("My Books"));
        assert_eq!(tui.regions.drawer, Rect::default());
    }

    #[test]
    fn test_drawer_appears_with_book() {
        let mut app = test_app();
        update(&mut app, Action::SelectBook(BookId(2)));
        let mut tui = TuiState::new(PaneWidths::default());
        let text = draw(&app, &mut tui);
        assert!(text.contains("Meeting Notes"));
        assert!(text.contains("Project Ideas"));
        assert!(text.contains("Select a note to start writing"));
        assert_ne!(tui.regions.drawer, Rect::default());
    }

    #[test]
    fn test_open_note_shows_editor() {
        let mut app = test_app();
        open_note(&mut app, BookId(1), NoteId(1));
        let mut tui = TuiState::new(PaneWidths::default());
        tui.load_editor(&app);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Save"));
        assert!(text.contains("Daily Journal"));
        assert!(text.contains("Today was a productive day..."));
        assert!(!text.contains("Select a note to start writing"));
    }

    #[test]
    fn test_saved_label() {
        let mut app = test_app();
        open_note(&mut app, BookId(1), NoteId(1));
        app.saved_indicator.visible = true;
        let mut tui = TuiState::new(PaneWidths::default());
        let text = draw(&app, &mut tui);
        assert!(text.contains("Saved!"));
    }

    #[test]
    fn test_expanded_sidebar_is_wider() {
        let mut app = test_app();
        let mut tui = TuiState::new(PaneWidths::default());
        draw(&app, &mut tui);
        let collapsed = tui.regions.sidebar.width;
        app.sidebar_expanded = true;
        let text = draw(&app, &mut tui);
        assert!(tui.regions.sidebar.width > collapsed);
        assert!(text.contains("My Books"));
    }
}
