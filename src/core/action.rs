//! # Actions
//!
//! Everything that can happen in Inkwell becomes an `Action`.
//! User clicks "Add Book"? That's `Action::AddBook`.
//! The saved-indicator timer fires? That's `Action::SavedIndicatorExpired`.
//!
//! The `update()` function takes the current state and an action, applies
//! the transition, and returns an `Effect` describing follow-up work for
//! the adapter (reseeding the editor surface, arming a timer). No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Actions whose preconditions are not met (no book selected, no note
//! open, unknown id) are no-ops rather than errors.

use log::{debug, info};

use crate::core::model::{
    Book, BookColor, BookId, EMPTY_NOTE_PREVIEW, NEW_BOOK_EMOJI, Note, NoteId, preview_of,
};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddBook,
    SelectBook(BookId),
    SidebarPointerEnter,
    SidebarPointerLeave,
    AddNote,
    SelectNote(NoteId),
    /// Title field changed; applied to the registry immediately.
    RenameNote(String),
    /// Serialized HTML from the editing surface after an input event.
    EditorInput(String),
    Save,
    SavedIndicatorExpired { generation: u64 },
    Quit,
}

/// Follow-up work requested by `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// The editor buffer was replaced wholesale; reseed the editing surface.
    LoadEditor,
    /// Revert the saved indicator after the configured delay.
    ScheduleSavedReset { generation: u64 },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::AddBook => {
            let id = BookId(app.ids.issue());
            let book = Book {
                id,
                name: format!("Book {}", app.books.len() + 1),
                emoji: NEW_BOOK_EMOJI.to_string(),
                color: BookColor::Random,
            };
            info!("Book created: {} (id={}, color={})", book.name, id, book.color.tag());
            app.status_message = format!("Added {}", book.name);
            app.books.push(book);
            Effect::None
        }
        Action::SelectBook(id) => {
            if app.book(id).is_none() {
                debug!("SelectBook ignored: unknown book id={}", id);
                return Effect::None;
            }
            app.selection = app.selection.select_book(id);
            app.editor_buffer.clear();
            Effect::LoadEditor
        }
        Action::SidebarPointerEnter => {
            app.sidebar_expanded = true;
            Effect::None
        }
        Action::SidebarPointerLeave => {
            // An active book pins the sidebar open.
            if app.selection.book().is_none() {
                app.sidebar_expanded = false;
            }
            Effect::None
        }
        Action::AddNote => {
            let Some(book) = app.selection.book() else {
                debug!("AddNote ignored: no book selected");
                return Effect::None;
            };
            let id = NoteId(app.ids.issue());
            let notes = app.notes.entry(book).or_default();
            let note = Note {
                id,
                title: format!("New Note {}", notes.len() + 1),
                content: String::new(),
                preview: EMPTY_NOTE_PREVIEW.to_string(),
            };
            info!("Note created: {} (id={}, book={})", note.title, id, book);
            app.status_message = format!("Added {}", note.title);
            notes.push(note);
            Effect::None
        }
        Action::SelectNote(id) => {
            let Some(book) = app.selection.book() else {
                debug!("SelectNote ignored: no book selected");
                return Effect::None;
            };
            let Some(content) = app.note_in_book(book, id).map(|n| n.content.clone()) else {
                debug!("SelectNote ignored: note id={} not in book={}", id, book);
                return Effect::None;
            };
            app.selection = app.selection.select_note(id);
            app.editor_buffer = content;
            Effect::LoadEditor
        }
        Action::RenameNote(title) => {
            if let Some(note) = app.selected_note_mut() {
                note.title = title;
            }
            Effect::None
        }
        Action::EditorInput(html) => {
            if app.selection.note().is_some() {
                app.editor_buffer = html;
            }
            Effect::None
        }
        Action::Save => {
            let buffer = app.editor_buffer.clone();
            let Some(note) = app.selected_note_mut() else {
                debug!("Save ignored: no note selected");
                return Effect::None;
            };
            note.preview = preview_of(&buffer);
            note.content = buffer;
            info!("Note saved: {} (id={})", note.title, note.id);
            app.saved_indicator.visible = true;
            app.saved_indicator.generation += 1;
            Effect::ScheduleSavedReset {
                generation: app.saved_indicator.generation,
            }
        }
        Action::SavedIndicatorExpired { generation } => {
            if generation == app.saved_indicator.generation {
                app.saved_indicator.visible = false;
            } else {
                debug!(
                    "Stale saved-indicator timer ignored (generation {} < {})",
                    generation, app.saved_indicator.generation
                );
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
