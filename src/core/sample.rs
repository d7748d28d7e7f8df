//! Sample library loaded on startup unless disabled in config.

use std::collections::BTreeMap;

use crate::core::model::{Book, BookColor, BookId, Note, NoteId};

pub fn sample_books() -> Vec<Book> {
    vec![
        book(1, "Personal", "📝", BookColor::Blue),
        book(2, "Work", "💼", BookColor::Purple),
        book(3, "Ideas", "💡", BookColor::Yellow),
    ]
}

pub fn sample_notes() -> BTreeMap<BookId, Vec<Note>> {
    BTreeMap::from([
        (
            BookId(1),
            vec![
                Note::with_content(NoteId(1), "Daily Journal", "Today was a productive day..."),
                Note::with_content(
                    NoteId(2),
                    "Weekend Plans",
                    "Need to plan activities for the weekend",
                ),
            ],
        ),
        (
            BookId(2),
            vec![
                Note::with_content(
                    NoteId(3),
                    "Project Ideas",
                    "Brainstorming new project concepts",
                ),
                Note::with_content(
                    NoteId(4),
                    "Meeting Notes",
                    "Important points from today's meeting",
                ),
            ],
        ),
        (
            BookId(3),
            vec![Note::with_content(
                NoteId(5),
                "App Concepts",
                "New mobile app ideas to explore",
            )],
        ),
    ])
}

fn book(id: u64, name: &str, emoji: &str, color: BookColor) -> Book {
    Book {
        id: BookId(id),
        name: name.to_string(),
        emoji: emoji.to_string(),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_book_has_notes() {
        let notes = sample_notes();
        for book in sample_books() {
            assert!(notes.get(&book.id).is_some_and(|n| !n.is_empty()), "{}", book.name);
        }
    }

    #[test]
    fn test_sample_note_ids_are_unique() {
        let mut ids: Vec<u64> = sample_notes()
            .values()
            .flatten()
            .map(|note| note.id.0)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
