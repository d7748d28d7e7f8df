//! Visual line layout for the editor body.
//!
//! Glyphs are hard-wrapped at the display width; `\n` glyphs end a line and
//! are not part of either neighbour. Positions are glyph indices into the
//! `RichText`.

use unicode_width::UnicodeWidthChar;

use crate::core::markup::Glyph;

/// One screen row of body text: glyphs `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    pub start: usize,
    pub end: usize,
}

pub fn wrap(glyphs: &[Glyph], width: usize) -> Vec<VisualLine> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    let mut col = 0;
    for (i, glyph) in glyphs.iter().enumerate() {
        if glyph.ch == '\n' {
            lines.push(VisualLine { start, end: i });
            start = i + 1;
            col = 0;
            continue;
        }
        let w = glyph.ch.width().unwrap_or(0);
        if col > 0 && col + w > width {
            lines.push(VisualLine { start, end: i });
            start = i;
            col = 0;
        }
        col += w;
    }
    lines.push(VisualLine {
        start,
        end: glyphs.len(),
    });
    lines
}

/// Screen position (line, column) of the caret at glyph index `cursor`.
///
/// A caret on a wrap boundary belongs to the later line.
pub fn locate(glyphs: &[Glyph], lines: &[VisualLine], cursor: usize) -> (usize, usize) {
    let line = lines
        .iter()
        .rposition(|l| l.start <= cursor)
        .unwrap_or(0);
    let start = lines.get(line).map(|l| l.start).unwrap_or(0);
    let col = glyphs[start..cursor.min(glyphs.len()).max(start)]
        .iter()
        .map(|g| g.ch.width().unwrap_or(0))
        .sum();
    (line, col)
}

/// Glyph index closest to `col` on visual line `line`.
pub fn index_at(glyphs: &[Glyph], lines: &[VisualLine], line: usize, col: usize) -> usize {
    let Some(visual) = lines.get(line) else {
        return glyphs.len();
    };
    let mut x = 0;
    for (offset, glyph) in glyphs[visual.start..visual.end].iter().enumerate() {
        let w = glyph.ch.width().unwrap_or(0);
        if x + w > col {
            return visual.start + offset;
        }
        x += w;
    }
    visual.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::trusted;

    #[test]
    fn test_hard_wrap_at_width() {
        let text = trusted("abcdefg");
        let lines = wrap(text.glyphs(), 3);
        assert_eq!(
            lines,
            vec![
                VisualLine { start: 0, end: 3 },
                VisualLine { start: 3, end: 6 },
                VisualLine { start: 6, end: 7 },
            ]
        );
    }

    #[test]
    fn test_newline_splits_lines() {
        let text = trusted("ab<br>c");
        let lines = wrap(text.glyphs(), 10);
        assert_eq!(
            lines,
            vec![VisualLine { start: 0, end: 2 }, VisualLine { start: 3, end: 4 }]
        );
    }

    #[test]
    fn test_empty_text_has_one_line() {
        assert_eq!(wrap(&[], 10), vec![VisualLine { start: 0, end: 0 }]);
    }

    #[test]
    fn test_wide_chars_wrap_early() {
        let text = trusted("日本語");
        let lines = wrap(text.glyphs(), 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], VisualLine { start: 0, end: 2 });
    }

    #[test]
    fn test_locate_and_index_round_trip() {
        let text = trusted("hello<br>world");
        let glyphs = text.glyphs();
        let lines = wrap(glyphs, 20);
        assert_eq!(locate(glyphs, &lines, 5), (0, 5));
        assert_eq!(locate(glyphs, &lines, 8), (1, 2));
        assert_eq!(index_at(glyphs, &lines, 1, 2), 8);
        // Past the end of a short line clamps to its end
        assert_eq!(index_at(glyphs, &lines, 0, 40), 5);
    }

    #[test]
    fn test_caret_on_wrap_boundary_moves_down() {
        let text = trusted("abcdef");
        let glyphs = text.glyphs();
        let lines = wrap(glyphs, 3);
        assert_eq!(locate(glyphs, &lines, 3), (1, 0));
    }
}
