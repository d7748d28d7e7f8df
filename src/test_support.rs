//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::{Action, update};
use crate::core::model::{BookId, NoteId};
use crate::core::state::App;

/// Creates a test App holding the sample library.
pub fn test_app() -> App {
    App::with_sample_library()
}

/// Selects `book` then `note`, as a user clicking through would.
pub fn open_note(app: &mut App, book: BookId, note: NoteId) {
    update(app, Action::SelectBook(book));
    update(app, Action::SelectNote(note));
}

/// Collects every cell symbol of a rendered test buffer into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
