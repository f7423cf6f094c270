//! Pattern rules and the ordered rule set.
//!
//! Rules are applied in the order they were added and later rules win where
//! their matches overlap earlier ones. Adding a pattern that is already
//! present replaces its colors *and* moves it to the back, so it becomes the
//! highest-priority rule.

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::color::Style;
use crate::error::{Error, Result};

/// A compiled pattern together with how its matches are colored.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Color the whole span of every match.
    WholeMatch { regex: Regex, style: Style },
    /// Color capture groups positionally. When there are more groups than
    /// styles the last style is reused; surplus styles are ignored.
    Groups { regex: Regex, styles: Vec<Style> },
}

impl Rule {
    pub fn whole_match(pattern: &str, style: Style) -> Result<Self> {
        Ok(Rule::WholeMatch { regex: Regex::new(pattern)?, style })
    }

    pub fn groups(pattern: &str, styles: Vec<Style>) -> Result<Self> {
        Ok(Rule::Groups { regex: Regex::new(pattern)?, styles })
    }

    pub fn regex(&self) -> &Regex {
        match self {
            Rule::WholeMatch { regex, .. } | Rule::Groups { regex, .. } => regex,
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex().as_str()
    }

    /// Style for capture group `index` (0-based, counting from group 1).
    pub(crate) fn group_style(styles: &[Style], index: usize) -> Option<&Style> {
        styles.get(index.min(styles.len().checked_sub(1)?))
    }

    /// Spans and styles produced by one match, in group order.
    ///
    /// Groups that did not participate in the match are skipped. A group
    /// rule without styles yields nothing.
    pub(crate) fn spans<'r>(&'r self, caps: &Captures<'_>) -> Vec<(usize, usize, &'r Style)> {
        match self {
            Rule::WholeMatch { style, .. } => {
                let whole = caps.get_match();
                vec![(whole.start(), whole.end(), style)]
            }
            Rule::Groups { styles, .. } => caps
                .iter()
                .skip(1)
                .enumerate()
                .filter_map(|(idx, group)| {
                    let group = group?;
                    let style = Self::group_style(styles, idx)?;
                    Some((group.start(), group.end(), style))
                })
                .collect(),
        }
    }
}

/// Insertion-ordered collection of rules keyed by pattern string.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or re-add) a rule coloring whole matches of `pattern`.
    pub fn add_whole_match_rule(&mut self, pattern: &str, style: Style) -> Result<()> {
        let rule = Rule::whole_match(pattern, style)?;
        self.push(pattern, rule);
        Ok(())
    }

    /// Add (or re-add) a rule coloring the capture groups of `pattern`.
    pub fn add_group_rule(&mut self, pattern: &str, styles: Vec<Style>) -> Result<()> {
        let rule = Rule::groups(pattern, styles)?;
        self.push(pattern, rule);
        Ok(())
    }

    fn push(&mut self, pattern: &str, rule: Rule) {
        let replaced = self.rules.shift_remove(pattern).is_some();
        let action = if replaced { "replaced" } else { "added" };
        log::debug!("rule {:?} {} at position {}", pattern, action, self.rules.len());
        self.rules.insert(pattern.to_string(), rule);
    }

    pub fn remove_rule(&mut self, pattern: &str) -> Result<Rule> {
        let rule = self.rules.shift_remove(pattern).ok_or_else(|| Error::RuleNotFound(pattern.to_string()))?;
        log::debug!("rule {:?} removed", pattern);
        Ok(rule)
    }

    pub fn get(&self, pattern: &str) -> Option<&Rule> {
        self.rules.get(pattern)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Rule> + DoubleEndedIterator {
        self.rules.values()
    }

    /// Pattern strings in application order.
    pub fn patterns(&self) -> impl ExactSizeIterator<Item = &str> + DoubleEndedIterator {
        self.rules.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = indexmap::map::Values<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.values()
    }
}
