//! # Selection Lifecycle
//!
//! ```text
//! NoBookSelected ──select_book──▶ BookSelected(b) ──select_note──▶ BookAndNoteSelected(b, n)
//!                                      ▲                                   │
//!                                      └────────── select_book ────────────┘
//! ```
//!
//! Every transition is a pure function `Selection -> Selection`. There is no
//! way back to `NoBookSelected` and no terminal state.

use crate::core::model::{BookId, NoteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoBookSelected,
    BookSelected(BookId),
    BookAndNoteSelected { book: BookId, note: NoteId },
}

impl Selection {
    /// Always lands in `BookSelected`, dropping any open note.
    pub fn select_book(self, book: BookId) -> Self {
        Selection::BookSelected(book)
    }

    /// Opens a note within the active book. Without an active book there is
    /// nothing for the note to belong to, so the state is returned unchanged.
    pub fn select_note(self, note: NoteId) -> Self {
        match self.book() {
            Some(book) => Selection::BookAndNoteSelected { book, note },
            None => self,
        }
    }

    pub fn book(&self) -> Option<BookId> {
        match *self {
            Selection::NoBookSelected => None,
            Selection::BookSelected(book) | Selection::BookAndNoteSelected { book, .. } => {
                Some(book)
            }
        }
    }

    pub fn note(&self) -> Option<NoteId> {
        match *self {
            Selection::BookAndNoteSelected { note, .. } => Some(note),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_no_book() {
        let selection = Selection::default();
        assert_eq!(selection, Selection::NoBookSelected);
        assert_eq!(selection.book(), None);
        assert_eq!(selection.note(), None);
    }

    #[test]
    fn test_select_book_from_any_state() {
        let b1 = BookId(1);
        let b2 = BookId(2);
        assert_eq!(
            Selection::NoBookSelected.select_book(b1),
            Selection::BookSelected(b1)
        );
        assert_eq!(
            Selection::BookSelected(b1).select_book(b2),
            Selection::BookSelected(b2)
        );
        let open = Selection::BookAndNoteSelected {
            book: b1,
            note: NoteId(7),
        };
        assert_eq!(open.select_book(b2), Selection::BookSelected(b2));
    }

    #[test]
    fn test_reselecting_same_book_closes_note() {
        let open = Selection::BookAndNoteSelected {
            book: BookId(1),
            note: NoteId(1),
        };
        assert_eq!(open.select_book(BookId(1)).note(), None);
    }

    #[test]
    fn test_select_note_requires_book() {
        assert_eq!(
            Selection::NoBookSelected.select_note(NoteId(3)),
            Selection::NoBookSelected
        );
    }

    #[test]
    fn test_select_note_switches_between_notes() {
        let selection = Selection::BookSelected(BookId(1))
            .select_note(NoteId(1))
            .select_note(NoteId(2));
        assert_eq!(selection.book(), Some(BookId(1)));
        assert_eq!(selection.note(), Some(NoteId(2)));
    }
}
