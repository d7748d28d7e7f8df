//! # Application State
//!
//! Core business state for Inkwell. Domain logic only, no TUI-specific
//! types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── books: Vec<Book>                      // Book Registry (ordered)
//! ├── notes: BTreeMap<BookId, Vec<Note>>    // Note Registry
//! ├── selection: Selection                  // active book / note
//! ├── sidebar_expanded: bool                // sidebar expand flag
//! ├── editor_buffer: String                 // uncommitted HTML of the open note
//! ├── saved_indicator: SavedIndicator       // "Saved!" confirmation
//! ├── ids: IdSource                         // time-based id generator
//! └── status_message: String                // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::BTreeMap;

use crate::core::config::ResolvedConfig;
use crate::core::model::{Book, BookId, IdSource, Note, NoteId};
use crate::core::sample;
use crate::core::selection::Selection;

/// Transient "saved" confirmation.
///
/// Every save bumps `generation`; a pending revert only applies when it
/// carries the current generation, so a newer save supersedes older timers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedIndicator {
    pub visible: bool,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub books: Vec<Book>,
    pub notes: BTreeMap<BookId, Vec<Note>>,
    pub selection: Selection,
    pub sidebar_expanded: bool,
    pub editor_buffer: String,
    pub saved_indicator: SavedIndicator,
    pub ids: IdSource,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            notes: BTreeMap::new(),
            selection: Selection::default(),
            sidebar_expanded: false,
            editor_buffer: String::new(),
            saved_indicator: SavedIndicator::default(),
            ids: IdSource::new(),
            status_message: String::from("Welcome to Inkwell!"),
        }
    }

    /// Starts from the given registries, reserving their ids.
    pub fn with_library(books: Vec<Book>, notes: BTreeMap<BookId, Vec<Note>>) -> Self {
        let mut app = Self::new();
        let highest = books
            .iter()
            .map(|b| b.id.0)
            .chain(notes.values().flatten().map(|n| n.id.0))
            .max()
            .unwrap_or(0);
        app.ids.reserve(highest);
        app.books = books;
        app.notes = notes;
        app
    }

    pub fn with_sample_library() -> Self {
        Self::with_library(sample::sample_books(), sample::sample_notes())
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        if config.sample_library {
            Self::with_sample_library()
        } else {
            Self::new()
        }
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.selection.book().and_then(|id| self.book(id))
    }

    /// Notes of a book in display order (empty if the book has none yet).
    pub fn notes_of(&self, book: BookId) -> &[Note] {
        self.notes.get(&book).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Notes listed in the drawer for the active book.
    pub fn drawer_notes(&self) -> &[Note] {
        self.selection
            .book()
            .map(|id| self.notes_of(id))
            .unwrap_or(&[])
    }

    /// The open note, read straight from the registry.
    pub fn selected_note(&self) -> Option<&Note> {
        let note = self.selection.note()?;
        self.drawer_notes().iter().find(|n| n.id == note)
    }

    pub(crate) fn selected_note_mut(&mut self) -> Option<&mut Note> {
        let book = self.selection.book()?;
        let note = self.selection.note()?;
        self.notes
            .get_mut(&book)?
            .iter_mut()
            .find(|n| n.id == note)
    }

    pub fn note_in_book(&self, book: BookId, note: NoteId) -> Option<&Note> {
        self.notes_of(book).iter().find(|n| n.id == note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert!(app.books.is_empty());
        assert!(app.notes.is_empty());
        assert_eq!(app.selection, Selection::NoBookSelected);
        assert!(!app.sidebar_expanded);
        assert!(app.editor_buffer.is_empty());
        assert!(!app.saved_indicator.visible);
        assert_eq!(app.status_message, "Welcome to Inkwell!");
    }

    #[test]
    fn test_sample_library_reserves_ids() {
        let mut app = test_app();
        assert_eq!(app.books.len(), 3);
        assert!(app.ids.issue_at(0) > 5);
    }

    #[test]
    fn test_drawer_notes_empty_without_selection() {
        let app = test_app();
        assert!(app.drawer_notes().is_empty());
        assert!(app.selected_book().is_none());
        assert!(app.selected_note().is_none());
    }

    #[test]
    fn test_selected_note_reads_registry() {
        let mut app = test_app();
        app.selection = Selection::BookAndNoteSelected {
            book: BookId(2),
            note: NoteId(4),
        };
        assert_eq!(app.selected_book().map(|b| b.name.as_str()), Some("Work"));
        assert_eq!(
            app.selected_note().map(|n| n.title.as_str()),
            Some("Meeting Notes")
        );
    }

    #[test]
    fn test_selected_note_ignores_note_of_other_book() {
        let mut app = test_app();
        app.selection = Selection::BookAndNoteSelected {
            book: BookId(1),
            note: NoteId(5),
        };
        assert!(app.selected_note().is_none());
        assert!(app.note_in_book(BookId(3), NoteId(5)).is_some());
    }
}
