//! # Rich Text Markup
//!
//! Note bodies are stored as inline HTML. The editor works on `RichText`,
//! a flat sequence of styled characters, and serializes back to HTML after
//! every edit.
//!
//! ```text
//! "a<b>bc</b><br>d"  ──trusted()──▶  [a][b:B][c:B][\n][d]  ──to_html()──▶  "a<b>bc</b><br>d"
//! ```
//!
//! Understood elements: `b`/`strong`, `i`/`em`, `u`, `br`, and `div`/`p` as
//! line breaks. Other tags are dropped and their text kept. Character
//! entities are decoded on the way in; `&`, `<`, `>` are escaped on the way
//! out.

use std::ops::Range;

use crate::core::format::InlineFormat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl InlineStyle {
    pub fn has(self, format: InlineFormat) -> bool {
        match format {
            InlineFormat::Bold => self.bold,
            InlineFormat::Italic => self.italic,
            InlineFormat::Underline => self.underline,
        }
    }

    pub fn with(mut self, format: InlineFormat, on: bool) -> Self {
        match format {
            InlineFormat::Bold => self.bold = on,
            InlineFormat::Italic => self.italic = on,
            InlineFormat::Underline => self.underline = on,
        }
        self
    }

    pub fn toggled(self, format: InlineFormat) -> Self {
        self.with(format, !self.has(format))
    }

    fn formats(self) -> impl Iterator<Item = InlineFormat> {
        [InlineFormat::Bold, InlineFormat::Italic, InlineFormat::Underline]
            .into_iter()
            .filter(move |f| self.has(*f))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    glyphs: Vec<Glyph>,
}

/// Treats stored HTML as trusted live markup.
///
/// This is the one place note content becomes markup. Nothing is
/// sanitized: content only ever comes from the local user.
pub fn trusted(html: &str) -> RichText {
    parse_html(html)
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn plain_text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    /// Insert `text` at glyph index `at`; returns the number of glyphs added.
    pub fn insert_str(&mut self, at: usize, text: &str, style: InlineStyle) -> usize {
        let at = at.min(self.glyphs.len());
        let inserted: Vec<Glyph> = text
            .chars()
            .filter(|c| *c != '\r')
            .map(|ch| Glyph { ch, style })
            .collect();
        let count = inserted.len();
        self.glyphs.splice(at..at, inserted);
        count
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.glyphs.len());
        let start = range.start.min(end);
        self.glyphs.drain(start..end);
    }

    /// Style a character typed at `at` inherits: that of the glyph before it.
    pub fn style_before(&self, at: usize) -> InlineStyle {
        at.checked_sub(1)
            .and_then(|i| self.glyphs.get(i))
            .map(|g| g.style)
            .unwrap_or_default()
    }

    /// Toggle `format` over `range`: removed when every glyph already has
    /// it, applied to all of them otherwise.
    pub fn apply_format(&mut self, range: Range<usize>, format: InlineFormat) {
        let end = range.end.min(self.glyphs.len());
        let start = range.start.min(end);
        let span = &mut self.glyphs[start..end];
        if span.is_empty() {
            return;
        }
        let on = !span.iter().all(|g| g.style.has(format));
        for glyph in span {
            glyph.style = glyph.style.with(format, on);
        }
    }

    /// Consecutive glyphs grouped by style.
    pub fn runs(&self) -> Vec<(InlineStyle, String)> {
        let mut runs: Vec<(InlineStyle, String)> = Vec::new();
        for glyph in &self.glyphs {
            match runs.last_mut() {
                Some((style, text)) if *style == glyph.style => text.push(glyph.ch),
                _ => runs.push((glyph.style, glyph.ch.to_string())),
            }
        }
        runs
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (style, text) in self.runs() {
            let formats: Vec<InlineFormat> = style.formats().collect();
            for format in &formats {
                html.push('<');
                html.push_str(format.tag());
                html.push('>');
            }
            for ch in text.chars() {
                match ch {
                    '&' => html.push_str("&amp;"),
                    '<' => html.push_str("&lt;"),
                    '>' => html.push_str("&gt;"),
                    '\n' => html.push_str("<br>"),
                    c => html.push(c),
                }
            }
            for format in formats.iter().rev() {
                html.push_str("</");
                html.push_str(format.tag());
                html.push('>');
            }
        }
        html
    }
}

#[derive(Default)]
struct Depths {
    bold: u32,
    italic: u32,
    underline: u32,
}

impl Depths {
    fn style(&self) -> InlineStyle {
        InlineStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
        }
    }

    fn counter(&mut self, name: &str) -> Option<&mut u32> {
        match name {
            "b" | "strong" => Some(&mut self.bold),
            "i" | "em" => Some(&mut self.italic),
            "u" => Some(&mut self.underline),
            _ => None,
        }
    }
}

fn parse_html(html: &str) -> RichText {
    let mut text = RichText::new();
    let mut depths = Depths::default();
    let mut rest = html;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' if starts_tag(rest) => {
                if let Some(close) = rest.find('>') {
                    apply_tag(&rest[1..close], &mut depths, &mut text);
                    rest = &rest[close + 1..];
                    continue;
                }
                push(&mut text, '<', depths.style());
            }
            '&' => {
                if let Some((decoded, len)) = decode_entity(rest) {
                    push(&mut text, decoded, depths.style());
                    rest = &rest[len..];
                    continue;
                }
                push(&mut text, '&', depths.style());
            }
            '\r' => {}
            c => push(&mut text, c, depths.style()),
        }
        rest = &rest[ch.len_utf8()..];
    }
    text
}

/// Whether the `<` at the start of `s` opens a tag rather than being text.
fn starts_tag(s: &str) -> bool {
    s[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn push(text: &mut RichText, ch: char, style: InlineStyle) {
    text.glyphs.push(Glyph { ch, style });
}

fn apply_tag(raw: &str, depths: &mut Depths, text: &mut RichText) {
    let raw = raw.trim();
    let (closing, body) = match raw.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, raw),
    };
    let name = body
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match name.as_str() {
        "br" => push(text, '\n', depths.style()),
        "div" | "p" if !closing => {
            if text.glyphs.last().is_some_and(|g| g.ch != '\n') {
                push(text, '\n', depths.style());
            }
        }
        _ => {
            if let Some(depth) = depths.counter(&name) {
                if closing {
                    *depth = depth.saturating_sub(1);
                } else if !body.ends_with('/') {
                    *depth += 1;
                }
            }
        }
    }
}

/// Decodes an entity at the start of `s`; returns the char and bytes used.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let end = s.get(..12).unwrap_or(s).find(';')?;
    let name = &s[1..end];
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((ch, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOLD: InlineStyle = InlineStyle {
        bold: true,
        italic: false,
        underline: false,
    };

    #[test]
    fn test_plain_text_passes_through() {
        let html = "Important points from today's meeting";
        let text = trusted(html);
        assert_eq!(text.plain_text(), html);
        assert_eq!(text.to_html(), html);
    }

    #[test]
    fn test_inline_tags_become_styles() {
        let text = trusted("a<b>b<i>c</i></b><u>d</u>");
        let styles: Vec<InlineStyle> = text.glyphs().iter().map(|g| g.style).collect();
        assert_eq!(styles[0], InlineStyle::default());
        assert_eq!(styles[1], BOLD);
        assert!(styles[2].bold && styles[2].italic);
        assert!(styles[3].underline && !styles[3].bold);
    }

    #[test]
    fn test_strong_and_em_aliases() {
        let text = trusted("<strong>x</strong><em>y</em>");
        assert!(text.glyphs()[0].style.bold);
        assert!(text.glyphs()[1].style.italic);
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(trusted("a<br>b<br/>c").plain_text(), "a\nb\nc");
        assert_eq!(trusted("a<div>b</div><div>c</div>").plain_text(), "a\nb\nc");
        assert_eq!(trusted("<div>first</div>").plain_text(), "first");
    }

    #[test]
    fn test_unknown_tags_dropped_text_kept() {
        let text = trusted(r#"<span style="color:red">hi</span> <a href="x">there</a>"#);
        assert_eq!(text.plain_text(), "hi there");
    }

    #[test]
    fn test_entities_decoded_and_reescaped() {
        let text = trusted("1 &lt; 2 &amp;&amp; 3 &gt; 2&nbsp;&#65;&#x42;");
        assert_eq!(text.plain_text(), "1 < 2 && 3 > 2 AB");
        assert_eq!(text.to_html(), "1 &lt; 2 &amp;&amp; 3 &gt; 2 AB");
    }

    #[test]
    fn test_stray_brackets_and_ampersands_are_text() {
        assert_eq!(trusted("a < b").plain_text(), "a < b");
        assert_eq!(trusted("a < b and c > d").plain_text(), "a < b and c > d");
        assert_eq!(trusted("1 <2 <b>x</b>").plain_text(), "1 <2 x");
        assert_eq!(trusted("fish & chips").plain_text(), "fish & chips");
        assert_eq!(trusted("&bogus;").plain_text(), "&bogus;");
    }

    #[test]
    fn test_to_html_nests_in_fixed_order() {
        let mut text = RichText::new();
        text.insert_str(0, "ab", InlineStyle::default());
        text.apply_format(0..2, InlineFormat::Underline);
        text.apply_format(0..1, InlineFormat::Bold);
        assert_eq!(text.to_html(), "<b><u>a</u></b><u>b</u>");
    }

    #[test]
    fn test_apply_format_toggles_when_uniform() {
        let mut text = trusted("<b>ab</b>c");
        text.apply_format(0..2, InlineFormat::Bold);
        assert_eq!(text.to_html(), "abc");
    }

    #[test]
    fn test_apply_format_mixed_range_turns_on() {
        let mut text = trusted("<b>a</b>bc");
        text.apply_format(0..3, InlineFormat::Bold);
        assert_eq!(text.to_html(), "<b>abc</b>");
    }

    #[test]
    fn test_apply_format_empty_range_is_noop() {
        let mut text = trusted("abc");
        text.apply_format(1..1, InlineFormat::Italic);
        assert_eq!(text.to_html(), "abc");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut text = trusted("held");
        let added = text.insert_str(3, "lo wor", InlineStyle::default());
        assert_eq!(added, 6);
        assert_eq!(text.plain_text(), "hello word");
        text.remove(5..10);
        assert_eq!(text.plain_text(), "hello");
    }

    #[test]
    fn test_style_before() {
        let text = trusted("<i>a</i>b");
        assert!(text.style_before(1).italic);
        assert!(!text.style_before(2).italic);
        assert_eq!(text.style_before(0), InlineStyle::default());
    }

    #[test]
    fn test_newlines_serialize_as_br() {
        let mut text = RichText::new();
        text.insert_str(0, "one\r\ntwo", InlineStyle::default());
        assert_eq!(text.to_html(), "one<br>two");
    }
}
