//! Named terminal colors and the ANSI renderer.
//!
//! The vocabulary is the classic eight-color set (`grey`, `red`, `green`,
//! `yellow`, `blue`, `magenta`, `cyan`, `white`), usable both as foreground
//! (SGR 30..37) and background (SGR 40..47).

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::{Error, Result};

pub const RESET: &str = "\x1b[0m";

/// One of the eight basic ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Grey,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Parse a color name. Names are case-sensitive.
    ///
    /// ```
    /// use grec::Color;
    ///
    /// assert_eq!(Color::parse("red").unwrap(), Color::Red);
    /// assert!(Color::parse("purple").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name).ok_or_else(|| Error::UnknownColor(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Grey => "grey",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }

    fn offset(self) -> u8 {
        match self {
            Color::Grey => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
        }
    }

    /// SGR code when used as foreground.
    pub fn fg_code(self) -> u8 {
        30 + self.offset()
    }

    /// SGR code when used as background.
    pub fn bg_code(self) -> u8 {
        40 + self.offset()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

/// Foreground/background pair attached to a colored span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Style {
    pub fn new(fg: Option<Color>, bg: Option<Color>) -> Self {
        Self { fg, bg }
    }

    /// Foreground only.
    pub fn fg(color: Color) -> Self {
        Self { fg: Some(color), bg: None }
    }

    pub fn on(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Build a style from color names, validating both.
    ///
    /// An empty foreground name means "no foreground". A background, when
    /// given, must name a color.
    pub fn named(fg: Option<&str>, bg: Option<&str>) -> Result<Self> {
        let fg = fg.filter(|name| !name.is_empty()).map(Color::parse).transpose()?;
        let bg = bg.map(Color::parse).transpose()?;
        Ok(Self { fg, bg })
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }
}

/// Parses color info strings such as `"red"`, `"red_on_blue"`,
/// `"red on blue"` or `"green white"`.
///
/// The string is split on runs of non-word characters and underscores, and the
/// literal word `on` is dropped. The first component names the foreground,
/// the second the background. A trailing separator (`"red_"`) leaves an empty
/// background name and is rejected.
impl FromStr for Style {
    type Err = Error;

    fn from_str(info: &str) -> Result<Self> {
        let parts = split_color_info(info);
        match parts.as_slice() {
            [] => Ok(Style::default()),
            [fg] => Style::named(Some(*fg), None),
            [fg, bg] => Style::named(Some(*fg), Some(*bg)),
            _ => Err(Error::InvalidColorInfo(info.to_string())),
        }
    }
}

fn split_color_info(info: &str) -> Vec<&str> {
    crate::regex!(r"\W+|_").split(info).filter(|part| *part != "on").collect()
}

/// Renders styled text as ANSI escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `text` in the escape codes for `style`, followed by a reset.
    ///
    /// The background code is emitted before the foreground code. A style
    /// without colors still gets the reset, which clears whatever the
    /// terminal had active. A disabled palette returns `text` unchanged.
    ///
    /// ```
    /// use grec::{Color, Palette, Style};
    ///
    /// let style = Style::fg(Color::Red).on(Color::White);
    /// assert_eq!(Palette::default().paint("word", &style), "\x1b[47m\x1b[31mword\x1b[0m");
    /// ```
    pub fn paint(&self, text: &str, style: &Style) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() + 14);
        self.paint_into(&mut out, text, style);
        out
    }

    pub(crate) fn paint_into(&self, out: &mut String, text: &str, style: &Style) {
        if !self.enabled {
            out.push_str(text);
            return;
        }
        // Writing into a String cannot fail.
        if let Some(bg) = style.bg {
            let _ = write!(out, "\x1b[{}m", bg.bg_code());
        }
        if let Some(fg) = style.fg {
            let _ = write!(out, "\x1b[{}m", fg.fg_code());
        }
        out.push_str(text);
        out.push_str(RESET);
    }
}
