//! # Core Application Logic
//!
//! This module contains Inkwell's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐              ┌───────────────────┐
//!          │    TUI     │              │ FormattingBackend │
//!          │  Adapter   │─────────────▶│ (editor surface)  │
//!          │ (ratatui)  │              └───────────────────┘
//!          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`selection`]: Pure transitions of the book/note selection lifecycle
//! - [`model`]: Books, notes, previews, id generation
//! - [`markup`]: Rich text ⇄ HTML, and the trusted-markup boundary
//! - [`format`]: The inline formatting capability
//! - [`config`]: Settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod format;
pub mod markup;
pub mod model;
pub mod sample;
pub mod selection;
pub mod state;
