//! Rule application.
//!
//! Every rule runs over the whole input in application order. Each match is
//! turned into one span (whole-match rules) or one span per participating
//! capture group (group rules), and the spans are painted onto the
//! [`ColoredText`] in match order, then group order. Because painting
//! overrides, the last rule to touch a character decides its color.
//!
//! ```text
//! text   a x b x c
//! "ax"   R R              red
//! "xc"         G G        green
//! "xbx"    B B B          blue
//! final  R B B B G
//! ```
//!
//! Zero-length spans (an empty match such as `^$` on an empty line, or an
//! empty group such as `()`) are dropped here: they would color nothing and
//! are not valid intervals.

use super::colored::ColoredText;
use crate::intervals::Interval;
use crate::rules::{Rule, RuleSet};

/// Apply every rule in `rules` to `text`.
pub fn colorize(rules: &RuleSet, text: &str) -> ColoredText {
    let mut colored = ColoredText::new(text);
    for rule in rules {
        apply_rule(rule, &mut colored);
    }
    colored
}

fn apply_rule(rule: &Rule, colored: &mut ColoredText) {
    let mut queued = Vec::new();
    let mut matches = 0usize;
    for caps in rule.regex().captures_iter(colored.text()) {
        matches += 1;
        queued.extend(rule.spans(&caps));
    }

    if matches > 0 {
        log::trace!("rule {:?}: {} matches, {} spans", rule.pattern(), matches, queued.len());
    }

    for (start, end, style) in queued {
        match Interval::new(start, end) {
            Ok(interval) => colored.paint(interval, *style),
            Err(_) => log::trace!("rule {:?}: skipping empty span at {}", rule.pattern(), start),
        }
    }
}

/// Lazily colorizes a sequence of lines, one [`ColoredText`] per line.
///
/// Lines are pulled from the underlying iterator only when the next result is
/// requested, so an unbounded source is fine.
#[derive(Debug, Clone)]
pub struct ColorizeIter<'r, I> {
    rules: &'r RuleSet,
    lines: I,
}

impl<'r, I> ColorizeIter<'r, I> {
    pub(crate) fn new(rules: &'r RuleSet, lines: I) -> Self {
        Self { rules, lines }
    }
}

impl<I> Iterator for ColorizeIter<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = ColoredText;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(colorize(self.rules, line.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}
