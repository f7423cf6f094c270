//! Text paired with its colored spans.

use std::fmt;

use crate::color::{Palette, Style};
use crate::error::{Error, Result};
use crate::intervals::{Interval, IntervalMap};

/// An immutable string plus the disjoint spans colored so far.
///
/// Offsets are byte offsets into [`ColoredText::text`].
///
/// ```
/// use grec::{Color, ColoredText, Style};
///
/// let mut s = ColoredText::new("a word with color");
/// s.apply_color(2, 6, Style::fg(Color::Red).on(Color::White)).unwrap();
/// assert_eq!(s.to_string(), "a \x1b[47m\x1b[31mword\x1b[0m with color");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    spans: IntervalMap<Style>,
}

impl ColoredText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), spans: IntervalMap::new() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &IntervalMap<Style> {
        &self.spans
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Color `start..end`, replacing any color previously applied there.
    pub fn apply_color(&mut self, start: usize, end: usize, style: Style) -> Result<()> {
        let interval = Interval::new(start, end)?;
        if end > self.text.len() || !self.text.is_char_boundary(start) || !self.text.is_char_boundary(end) {
            return Err(Error::SpanOutOfBounds { start, end, len: self.text.len() });
        }
        self.paint(interval, style);
        Ok(())
    }

    /// Style covering byte `offset`, if it is colored.
    pub fn style_at(&self, offset: usize) -> Option<&Style> {
        self.spans.at(offset).map(|(_, style)| style)
    }

    pub(crate) fn paint(&mut self, interval: Interval, style: Style) {
        self.spans.insert(interval, style);
    }

    /// Render with `palette`: plain text between spans, painted text inside.
    pub fn render(&self, palette: &Palette) -> String {
        let mut out = String::with_capacity(self.text.len() + self.spans.len() * 14);
        let mut offset = 0;
        for (interval, style) in &self.spans {
            out.push_str(&self.text[offset..interval.start()]);
            palette.paint_into(&mut out, &self.text[interval.range()], style);
            offset = interval.end();
        }
        out.push_str(&self.text[offset..]);
        out
    }
}

impl fmt::Display for ColoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Palette::default()))
    }
}
