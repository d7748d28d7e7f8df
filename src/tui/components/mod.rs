//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they show as struct fields, built fresh each frame:
//! - `StatusBar`: top line with breadcrumb, status message and key hints
//! - `EmptyState`: editor column while no note is open
//!
//! ### Stateful Components
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! together with props from `App` for one render:
//! - `SidebarState` / `Sidebar`: book list, collapsed or expanded
//! - `NotesDrawerState` / `NotesDrawer`: note cards of the active book
//! - `ToolbarState` / `Toolbar`: formatting and save buttons
//!
//! Self-contained inputs own their text and emit events:
//! - `TitleField`: single-line title, emits `TitleEvent`
//! - `EditorSurface`: rich-text body, emits `EditorEvent`
//!
//! Stateful components record the screen rects they drew so mouse clicks
//! can be hit-tested against the last frame.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── sidebar.rs
//! ├── notes_drawer.rs
//! ├── toolbar.rs
//! ├── title_field.rs
//! ├── editor/
//! │   ├── mod.rs       EditorSurface + FormattingBackend
//! │   └── layout.rs    visual line wrapping
//! ├── empty_state.rs
//! └── status_bar.rs
//! ```

pub mod editor;
pub mod empty_state;
pub mod notes_drawer;
pub mod sidebar;
pub mod status_bar;
pub mod title_field;
pub mod toolbar;

pub use editor::{EditorEvent, EditorSurface};
pub use empty_state::EmptyState;
pub use notes_drawer::{DrawerEvent, DrawerRow, NotesDrawer, NotesDrawerState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarRow, SidebarState};
pub use status_bar::StatusBar;
pub use title_field::{TitleEvent, TitleField};
pub use toolbar::{Toolbar, ToolbarButton, ToolbarState};
