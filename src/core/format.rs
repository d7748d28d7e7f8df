//! # Inline Formatting Capability
//!
//! Bold / italic / underline are not implemented by the core. They are
//! delegated to whatever editing surface hosts the note body, through
//! `FormattingBackend`. The terminal editor is one such backend; swapping
//! it does not touch selection or save logic.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
}

impl InlineFormat {
    /// Command name, as rich-text hosts spell it.
    pub fn command(self) -> &'static str {
        match self {
            InlineFormat::Bold => "bold",
            InlineFormat::Italic => "italic",
            InlineFormat::Underline => "underline",
        }
    }

    /// HTML element the command produces.
    pub fn tag(self) -> &'static str {
        match self {
            InlineFormat::Bold => "b",
            InlineFormat::Italic => "i",
            InlineFormat::Underline => "u",
        }
    }
}

impl fmt::Display for InlineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// A rich-text editing surface able to format its current selection.
pub trait FormattingBackend {
    /// Apply `format` to the current selection, or to the caret when the
    /// selection is collapsed.
    fn apply_inline_format(&mut self, format: InlineFormat);

    /// The surface's current content as HTML.
    fn serialized_content(&self) -> String;

    /// Return input focus to the surface.
    fn focus(&mut self);
}

/// Runs a formatting command the way a toolbar button does: format, hand
/// focus back to the surface, and report the resulting content so it can
/// be fed to the editor buffer as an input event.
pub fn format_text<B: FormattingBackend + ?Sized>(backend: &mut B, format: InlineFormat) -> String {
    backend.apply_inline_format(format);
    backend.focus();
    backend.serialized_content()
}
