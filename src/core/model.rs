//! # Domain Model
//!
//! Books, notes, and the identifier source that names them.
//!
//! ```text
//! Book ──owns──▶ Vec<Note>      (keyed by BookId in App::notes)
//! Note.preview = first 50 chars of Note.content + "..."   (recomputed on save)
//! ```

use std::fmt;

use chrono::Utc;

/// Number of content characters kept in a note preview.
pub const PREVIEW_CHARS: usize = 50;

/// Preview shown on a freshly created, never-saved note.
pub const EMPTY_NOTE_PREVIEW: &str = "Start writing your note...";

/// Emoji given to books created from the sidebar.
pub const NEW_BOOK_EMOJI: &str = "📚";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category tag used to tint a book in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookColor {
    Blue,
    Purple,
    Yellow,
    /// Placeholder tag for books created at runtime.
    Random,
}

impl BookColor {
    pub fn tag(self) -> &'static str {
        match self {
            BookColor::Blue => "book-blue",
            BookColor::Purple => "book-purple",
            BookColor::Yellow => "book-yellow",
            BookColor::Random => "book-random",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub emoji: String,
    pub color: BookColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Committed HTML body.
    pub content: String,
    /// Denormalized summary of `content`; may lag behind until the next save.
    pub preview: String,
}

impl Note {
    /// A note whose preview mirrors its content, as sample notes are stored.
    pub fn with_content(id: NoteId, title: &str, content: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            preview: content.to_string(),
        }
    }
}

/// Builds the preview for committed content.
///
/// The ellipsis is appended unconditionally, even when the content is
/// shorter than the preview length.
pub fn preview_of(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Time-based identifier source.
///
/// Issues milliseconds since the Unix epoch, bumped so every id is strictly
/// greater than the previous one (two clicks in the same millisecond still
/// get distinct ids).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSource {
    last: u64,
}

impl IdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve everything up to `floor` so issued ids never collide with
    /// pre-existing ones.
    pub fn reserve(&mut self, floor: u64) {
        self.last = self.last.max(floor);
    }

    pub fn issue(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.issue_at(now)
    }

    /// Issue an id for the given clock reading.
    pub fn issue_at(&mut self, now_millis: u64) -> u64 {
        let id = now_millis.max(self.last + 1);
        self.last = id;
        id
    }
}
