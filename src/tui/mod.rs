//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ─▶ TuiEvent ─▶ route_event ─▶ component event ─▶ Action
//!                                                             │
//!                        Dispatcher::dispatch ◀───────────────┘
//!                          ├─ update(app, action) ─▶ Effect
//!                          ├─ LoadEditor          ─▶ TuiState::load_editor
//!                          └─ ScheduleSavedReset  ─▶ tokio timer ─▶ mpsc ─▶ Action
//! ```
//!
//! Keyboard focus stands in for the pointer: moving focus onto the sidebar
//! counts as the pointer entering it, moving away as leaving.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{Layout, ResolvedConfig};
use crate::core::format::{InlineFormat, format_text};
use crate::core::model::BookId;
use crate::core::state::App;
use crate::tui::component::{EventHandler, hit};
use crate::tui::components::{
    DrawerEvent, DrawerRow, EditorEvent, EditorSurface, NotesDrawerState, SidebarEvent,
    SidebarRow, SidebarState, TitleEvent, TitleField, ToolbarButton, ToolbarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Pane receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Drawer,
    Title,
    Body,
}

/// Screen areas recorded during the last draw, for pointer hit tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
    pub sidebar: Rect,
    pub drawer: Rect,
    pub title: Rect,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub sidebar: SidebarState,
    pub drawer: NotesDrawerState,
    pub toolbar: ToolbarState,
    pub title_field: TitleField,
    pub editor: EditorSurface,
    /// Book the drawer state was last reset for.
    drawer_book: Option<BookId>,
    pub pointer_in_sidebar: bool,
    /// Keyboard focus moved onto the sidebar and expanded it; a pointer
    /// leave does not collapse it while this holds.
    pub keyboard_in_sidebar: bool,
    pub layout: Layout,
    pub regions: Regions,
}

impl TuiState {
    pub fn new(layout: Layout) -> Self {
        Self {
            focus: Focus::Sidebar,
            sidebar: SidebarState::new(),
            drawer: NotesDrawerState::new(),
            toolbar: ToolbarState::new(),
            title_field: TitleField::new(),
            editor: EditorSurface::new(),
            drawer_book: None,
            pointer_in_sidebar: false,
            keyboard_in_sidebar: false,
            layout,
            regions: Regions::default(),
        }
    }

    /// Reseed the title field and editing surface from `app` after the
    /// selection changed.
    pub fn load_editor(&mut self, app: &App) {
        match app.selected_note() {
            Some(note) => {
                self.title_field.load(&note.title);
                self.editor.load(&app.editor_buffer);
            }
            None => {
                self.title_field.load("");
                self.editor.load("");
                if matches!(self.focus, Focus::Title | Focus::Body) {
                    self.focus = Focus::Drawer;
                }
            }
        }

        let book = app.selection.book();
        if book != self.drawer_book {
            self.drawer.reset();
            self.drawer_book = book;
        }
        if let Some(book) = book
            && let Some(index) = app.books.iter().position(|b| b.id == book)
        {
            self.sidebar.highlighted = index;
        }
        if let Some(note) = app.selection.note()
            && let Some(index) = app.drawer_notes().iter().position(|n| n.id == note)
        {
            self.drawer.highlighted = index;
        }
    }

    /// Panes that can take focus in the current state, in Tab order.
    fn focus_order(app: &App) -> Vec<Focus> {
        let mut order = vec![Focus::Sidebar];
        if app.selection.book().is_some() {
            order.push(Focus::Drawer);
        }
        if app.selected_note().is_some() {
            order.extend([Focus::Title, Focus::Body]);
        }
        order
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+I arrive distinct from Tab; terminals
        // without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Applies actions to the app and carries out the effects they request.
pub struct Dispatcher {
    tx: mpsc::Sender<Action>,
    saved_timer: Option<AbortHandle>,
    saved_delay: Duration,
}

impl Dispatcher {
    pub fn new(tx: mpsc::Sender<Action>, saved_delay: Duration) -> Self {
        Self {
            tx,
            saved_timer: None,
            saved_delay,
        }
    }

    /// Returns true when the app should quit.
    pub fn dispatch(&mut self, app: &mut App, tui: &mut TuiState, action: Action) -> bool {
        debug!("Dispatching {:?}", action);
        match update(app, action) {
            Effect::None => false,
            Effect::Quit => true,
            Effect::LoadEditor => {
                tui.load_editor(app);
                false
            }
            Effect::ScheduleSavedReset { generation } => {
                self.schedule_saved_reset(generation);
                false
            }
        }
    }

    /// Arm the revert timer, cancelling any pending one.
    fn schedule_saved_reset(&mut self, generation: u64) {
        if let Some(previous) = self.saved_timer.take() {
            previous.abort();
        }
        self.saved_timer = Some(spawn_saved_reset(
            self.saved_delay,
            generation,
            self.tx.clone(),
        ));
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(timer) = self.saved_timer.take() {
            timer.abort();
        }
    }
}

fn spawn_saved_reset(delay: Duration, generation: u64, tx: mpsc::Sender<Action>) -> AbortHandle {
    debug!("Saved indicator reverts in {:?} (generation {})", delay, generation);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(Action::SavedIndicatorExpired { generation }).is_err() {
            warn!("Failed to send SavedIndicatorExpired: receiver dropped");
        }
    })
    .abort_handle()
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(config.layout);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut dispatcher = Dispatcher::new(tx, Duration::from_millis(config.saved_indicator_ms));

    let result = event_loop(&mut terminal, &mut app, &mut tui, &mut dispatcher, &rx);

    info!("Inkwell shutting down");
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    dispatcher: &mut Dispatcher,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(POLL_INTERVAL)?;
        if first_event.is_some() {
            needs_redraw = true;
        }
        // Process first event + drain all pending events before next draw
        let mut pending = first_event;
        while let Some(event) = pending {
            if route_event(app, tui, dispatcher, event) {
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }

        // Timer actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if dispatcher.dispatch(app, tui, action) {
                return Ok(());
            }
        }
    }
}

/// Move keyboard focus, reporting sidebar enter/leave transitions.
fn set_focus(app: &mut App, tui: &mut TuiState, dispatcher: &mut Dispatcher, focus: Focus) {
    let previous = tui.focus;
    if previous == focus {
        return;
    }
    tui.focus = focus;
    if focus == Focus::Sidebar {
        tui.keyboard_in_sidebar = true;
        dispatcher.dispatch(app, tui, Action::SidebarPointerEnter);
    } else if previous == Focus::Sidebar {
        tui.keyboard_in_sidebar = false;
        if !tui.pointer_in_sidebar {
            dispatcher.dispatch(app, tui, Action::SidebarPointerLeave);
        }
    }
}

fn cycle_focus(app: &mut App, tui: &mut TuiState, dispatcher: &mut Dispatcher, forward: bool) {
    let order = TuiState::focus_order(app);
    let current = order.iter().position(|f| *f == tui.focus).unwrap_or(0);
    let next = if forward {
        (current + 1) % order.len()
    } else {
        (current + order.len() - 1) % order.len()
    };
    set_focus(app, tui, dispatcher, order[next]);
}

/// Run a formatting command against the editing surface and report the
/// resulting content as editor input.
fn apply_format(
    app: &mut App,
    tui: &mut TuiState,
    dispatcher: &mut Dispatcher,
    format: InlineFormat,
) -> bool {
    if app.selected_note().is_none() {
        return false;
    }
    let html = format_text(&mut tui.editor, format);
    if tui.editor.take_focus_request() {
        set_focus(app, tui, dispatcher, Focus::Body);
    }
    dispatcher.dispatch(app, tui, Action::EditorInput(html))
}

fn press_button(
    app: &mut App,
    tui: &mut TuiState,
    dispatcher: &mut Dispatcher,
    button: ToolbarButton,
) -> bool {
    if let Some(format) = button.format() {
        return apply_format(app, tui, dispatcher, format);
    }
    if button.is_inert() {
        debug!("Toolbar button {:?} has no action", button);
        return false;
    }
    dispatcher.dispatch(app, tui, Action::Save)
}

fn on_pointer_move(
    app: &mut App,
    tui: &mut TuiState,
    dispatcher: &mut Dispatcher,
    col: u16,
    row: u16,
) {
    let inside = hit(tui.regions.sidebar, col, row);
    if inside == tui.pointer_in_sidebar {
        return;
    }
    tui.pointer_in_sidebar = inside;
    if inside {
        dispatcher.dispatch(app, tui, Action::SidebarPointerEnter);
    } else if !tui.keyboard_in_sidebar {
        dispatcher.dispatch(app, tui, Action::SidebarPointerLeave);
    }
}

fn on_click(
    app: &mut App,
    tui: &mut TuiState,
    dispatcher: &mut Dispatcher,
    col: u16,
    row: u16,
) -> bool {
    if let Some(target) = tui.sidebar.row_at(col, row) {
        // The pointer is already over the sidebar; this is not a keyboard enter
        if tui.focus != Focus::Sidebar {
            tui.focus = Focus::Sidebar;
            tui.keyboard_in_sidebar = false;
        }
        let action = match target {
            SidebarRow::Book(index) => match app.books.get(index) {
                Some(book) => Action::SelectBook(book.id),
                None => return false,
            },
            SidebarRow::AddBook => Action::AddBook,
        };
        return dispatcher.dispatch(app, tui, action);
    }

    if app.selection.book().is_some()
        && let Some(target) = tui.drawer.row_at(col, row)
    {
        set_focus(app, tui, dispatcher, Focus::Drawer);
        let action = match target {
            DrawerRow::Note(index) => match app.drawer_notes().get(index) {
                Some(note) => Action::SelectNote(note.id),
                None => return false,
            },
            DrawerRow::AddNote => Action::AddNote,
        };
        return dispatcher.dispatch(app, tui, action);
    }

    if app.selected_note().is_none() {
        return false;
    }
    if let Some(button) = tui.toolbar.button_at(col, row) {
        return press_button(app, tui, dispatcher, button);
    }
    if hit(tui.regions.title, col, row) {
        set_focus(app, tui, dispatcher, Focus::Title);
    } else if tui.editor.click(col, row) {
        set_focus(app, tui, dispatcher, Focus::Body);
    }
    false
}

/// Route one terminal event. Returns true when the app should quit.
fn route_event(
    app: &mut App,
    tui: &mut TuiState,
    dispatcher: &mut Dispatcher,
    event: TuiEvent,
) -> bool {
    match event {
        TuiEvent::Quit => return dispatcher.dispatch(app, tui, Action::Quit),
        TuiEvent::Resize => return false,
        TuiEvent::Save => return dispatcher.dispatch(app, tui, Action::Save),
        TuiEvent::FocusNext => {
            cycle_focus(app, tui, dispatcher, true);
            return false;
        }
        TuiEvent::FocusPrev => {
            cycle_focus(app, tui, dispatcher, false);
            return false;
        }
        TuiEvent::Format(format) => return apply_format(app, tui, dispatcher, format),
        TuiEvent::MouseMove(col, row) => {
            on_pointer_move(app, tui, dispatcher, col, row);
            return false;
        }
        TuiEvent::MouseClick(col, row) => return on_click(app, tui, dispatcher, col, row),
        _ => {}
    }

    match tui.focus {
        Focus::Sidebar => match tui.sidebar.handle_event(&event, app.books.len()) {
            Some(SidebarEvent::Select(index)) => {
                let Some(id) = app.books.get(index).map(|b| b.id) else {
                    return false;
                };
                let quit = dispatcher.dispatch(app, tui, Action::SelectBook(id));
                set_focus(app, tui, dispatcher, Focus::Drawer);
                quit
            }
            Some(SidebarEvent::AddBook) => dispatcher.dispatch(app, tui, Action::AddBook),
            None => false,
        },
        Focus::Drawer => {
            if event == TuiEvent::Escape {
                set_focus(app, tui, dispatcher, Focus::Sidebar);
                return false;
            }
            let count = app.drawer_notes().len();
            match tui.drawer.handle_event(&event, count) {
                Some(DrawerEvent::Select(index)) => {
                    let Some(id) = app.drawer_notes().get(index).map(|n| n.id) else {
                        return false;
                    };
                    let quit = dispatcher.dispatch(app, tui, Action::SelectNote(id));
                    set_focus(app, tui, dispatcher, Focus::Body);
                    quit
                }
                Some(DrawerEvent::AddNote) => dispatcher.dispatch(app, tui, Action::AddNote),
                None => false,
            }
        }
        Focus::Title => {
            if event == TuiEvent::Escape {
                set_focus(app, tui, dispatcher, Focus::Drawer);
                return false;
            }
            match tui.title_field.handle_event(&event) {
                Some(TitleEvent::Changed(title)) => {
                    dispatcher.dispatch(app, tui, Action::RenameNote(title))
                }
                Some(TitleEvent::Submit) => {
                    set_focus(app, tui, dispatcher, Focus::Body);
                    false
                }
                None => false,
            }
        }
        Focus::Body => {
            if event == TuiEvent::Escape {
                set_focus(app, tui, dispatcher, Focus::Drawer);
                return false;
            }
            match tui.editor.handle_event(&event) {
                Some(EditorEvent::Input(html)) => {
                    dispatcher.dispatch(app, tui, Action::EditorInput(html))
                }
                None => false,
            }
        }
    }
}
