//! Colorize terminal text with regular expressions.
//!
//! A [`Matcher`] holds an ordered set of pattern rules. Colorizing a line runs
//! every rule over it, paints the matched spans into a [`ColoredText`], and
//! renders the result with ANSI escape codes. Where matches of different rules
//! overlap, the rule added last wins on every character it covers; earlier
//! rules keep only the parts outside it.
//!
//! ```
//! use grec::{Color, Matcher, Style};
//!
//! let mut m = Matcher::new();
//! m.add_pattern("ax", Style::fg(Color::Red)).unwrap();
//! m.add_pattern("xc", Style::fg(Color::Green)).unwrap();
//! m.add_pattern("xbx", Style::fg(Color::Blue)).unwrap();
//!
//! assert_eq!(
//!     m.colorize("axbxc").to_string(),
//!     "\x1b[31ma\x1b[0m\x1b[34mxbx\x1b[0m\x1b[32mc\x1b[0m",
//! );
//! ```

#[macro_use]
mod macros;
mod api;
mod color;
mod engine;
mod error;
mod intervals;
mod rules;

pub use api::Matcher;
pub use color::{Color, Palette, RESET, Style};
pub use engine::{ColoredText, ColorizeIter, colorize};
pub use error::{Error, Result};
pub use intervals::{Interval, IntervalMap, Iter as IntervalIter};
pub use rules::{Rule, RuleSet};
