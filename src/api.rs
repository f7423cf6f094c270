use crate::color::Style;
use crate::engine::{self, ColoredText, ColorizeIter};
use crate::error::Result;
use crate::rules::RuleSet;

/// Colorize text based on regular expression matches.
///
/// Patterns are applied in the order they were added; where matches overlap
/// the most recently added pattern wins.
///
/// # Example
/// ```
/// use grec::{Color, Matcher, Style};
///
/// let mut m = Matcher::new();
/// m.add_pattern("A", Style::fg(Color::Red)).unwrap();
/// m.add_pattern("B.", Style::fg(Color::Blue)).unwrap();
///
/// let colored = m.colorize("ABC");
/// assert_eq!(colored.text(), "ABC");
/// assert_eq!(colored.to_string(), "\x1b[31mA\x1b[0m\x1b[34mBC\x1b[0m");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    rules: RuleSet,
}

impl Matcher {
    /// Create a matcher without any patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Color every match of `pattern` with `style`.
    ///
    /// Adding a pattern string that is already present replaces the old rule
    /// and moves it to the end of the application order.
    pub fn add_pattern(&mut self, pattern: &str, style: Style) -> Result<()> {
        self.rules.add_whole_match_rule(pattern, style)
    }

    /// Like [`Matcher::add_pattern`], taking color names.
    ///
    /// Unknown names reject the whole pattern.
    ///
    /// ```
    /// use grec::Matcher;
    ///
    /// let mut m = Matcher::new();
    /// m.add_pattern_named("^$", Some("red"), None).unwrap();
    /// m.add_pattern_named("[A-Z]+", Some("blue"), Some("white")).unwrap();
    /// assert!(m.add_pattern_named("x", Some("purple"), None).is_err());
    /// assert_eq!(m.rules().len(), 2);
    /// ```
    pub fn add_pattern_named(&mut self, pattern: &str, fg: Option<&str>, bg: Option<&str>) -> Result<()> {
        let style = Style::named(fg, bg)?;
        self.add_pattern(pattern, style)
    }

    /// Color the capture groups of `pattern`, one style per group.
    ///
    /// With more groups than styles the last style repeats; surplus styles
    /// are ignored.
    pub fn add_group_pattern(&mut self, pattern: &str, styles: impl IntoIterator<Item = Style>) -> Result<()> {
        self.rules.add_group_rule(pattern, styles.into_iter().collect())
    }

    /// Remove the pattern with the given regular expression.
    pub fn remove_pattern(&mut self, pattern: &str) -> Result<()> {
        self.rules.remove_rule(pattern).map(|_| ())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Colorize one piece of text.
    pub fn colorize(&self, text: &str) -> ColoredText {
        engine::colorize(&self.rules, text)
    }

    /// Colorize each item of `lines` lazily.
    ///
    /// ```
    /// use grec::{Color, Matcher, Style};
    ///
    /// let mut m = Matcher::new();
    /// m.add_pattern("2", Style::fg(Color::Green)).unwrap();
    /// let out: Vec<String> = m.colorize_iter(["1", "2", "3"]).map(|c| c.to_string()).collect();
    /// assert_eq!(out, ["1", "\x1b[32m2\x1b[0m", "3"]);
    /// ```
    pub fn colorize_iter<I>(&self, lines: I) -> ColorizeIter<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ColorizeIter::new(&self.rules, lines.into_iter())
    }
}

impl From<RuleSet> for Matcher {
    fn from(rules: RuleSet) -> Self {
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_pattern() {
        let mut m = Matcher::new();
        m.add_pattern("x", Style::fg(Color::Red)).unwrap();
        assert_eq!(m.colorize("axbxc").to_string(), "a\x1b[31mx\x1b[0mb\x1b[31mx\x1b[0mc");
    }

    #[test]
    fn trailing_number() {
        let mut m = Matcher::new();
        m.add_pattern_named("5", Some("red"), None).unwrap();
        assert_eq!(m.colorize("1 2 3 4 5").to_string(), "1 2 3 4 \x1b[31m5\x1b[0m");
    }

    #[test]
    fn unknown_color_rejects_the_whole_group_pattern() {
        let mut m = Matcher::new();
        let styles =
            ["blue", "nope"].into_iter().map(|name| Style::named(Some(name), None)).collect::<Result<Vec<_>>>();
        assert!(matches!(styles, Err(Error::UnknownColor(n)) if n == "nope"));
        assert!(m.rules().is_empty());

        m.add_group_pattern("^#.*(ERROR)", [Style::fg(Color::Red)]).unwrap();
        assert_eq!(m.colorize("# fatal ERROR").to_string(), "# fatal \x1b[31mERROR\x1b[0m");
    }

    #[test]
    fn remove_pattern() {
        let mut m = Matcher::new();
        m.add_pattern("[A-Z]", Style::fg(Color::Blue)).unwrap();
        assert_eq!(m.rules().len(), 1);
        m.remove_pattern("[A-Z]").unwrap();
        assert_eq!(m.rules().len(), 0);
        assert!(matches!(m.remove_pattern("[A-Z]"), Err(Error::RuleNotFound(_))));
    }

    #[test]
    fn matcher_from_rule_set() {
        let mut rules = RuleSet::new();
        rules.add_whole_match_rule("b", Style::fg(Color::Cyan)).unwrap();
        let m = Matcher::from(rules);
        assert_eq!(m.colorize("abc").to_string(), "a\x1b[36mb\x1b[0mc");
    }
}
