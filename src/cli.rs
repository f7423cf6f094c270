use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use grec::{Matcher, Style};

pub const BIN_NAME: &str = "grec";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const WHOLE_ARG: &str = "normal";
const GROUP_ARG: &str = "group";
const FILE_ARG: &str = "file";
const NO_COLOR_ARG: &str = "no-color";

/// Environment switch honored the same way as termcolor does.
const COLORS_DISABLED_ENV: &str = "ANSI_COLORS_DISABLED";

pub fn build_parser() -> Command {
    Command::new(BIN_NAME)
        .bin_name(BIN_NAME)
        .version(VERSION)
        .about("Colorize text by regular expressions")
        .override_usage("grec [-h] [-m PATTERN COLOR_INFO] [-g PATTERN [COLOR_INFO ...]] -- [FILE]")
        .arg(
            Arg::new(WHOLE_ARG)
                .short('m')
                .num_args(2)
                .value_names(["PATTERN", "COLOR_INFO"])
                .action(ArgAction::Append)
                .help(
                    "Colorize each occurrence of PATTERN with the colors in COLOR_INFO. \
                     Can be used multiple times.",
                ),
        )
        .arg(
            Arg::new(GROUP_ARG)
                .short('g')
                .num_args(1..)
                .value_names(["PATTERN", "COLOR_INFO"])
                .action(ArgAction::Append)
                .help(
                    "Colorize the groups of each occurrence of PATTERN, one COLOR_INFO per group. \
                     The last COLOR_INFO repeats for remaining groups. Can be used multiple times.",
                ),
        )
        .arg(
            Arg::new(NO_COLOR_ARG)
                .long(NO_COLOR_ARG)
                .action(ArgAction::SetTrue)
                .help("Write input through without escape codes"),
        )
        .arg(
            Arg::new(FILE_ARG)
                .value_name("FILE")
                .default_value("-")
                .help("File whose contents to colorize ('-' for stdin)"),
        )
}

/// One `-m` or `-g` occurrence, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSpec {
    Whole { pattern: String, color: String },
    Group { pattern: String, colors: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Patterns in command-line order, which is also their priority order.
    pub patterns: Vec<PatternSpec>,
    /// `None` reads stdin.
    pub input: Option<PathBuf>,
    pub color: bool,
}

impl CliConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut ordered: Vec<(usize, PatternSpec)> = Vec::new();

        for (index, mut values) in occurrences(matches, WHOLE_ARG) {
            let color = values.pop().unwrap_or_default();
            let pattern = values.pop().unwrap_or_default();
            ordered.push((index, PatternSpec::Whole { pattern, color }));
        }
        for (index, values) in occurrences(matches, GROUP_ARG) {
            let mut values = values.into_iter();
            let pattern = values.next().unwrap_or_default();
            ordered.push((index, PatternSpec::Group { pattern, colors: values.collect() }));
        }
        ordered.sort_by_key(|(index, _)| *index);

        let input = matches.get_one::<String>(FILE_ARG).filter(|path| path.as_str() != "-").map(PathBuf::from);
        let color = colors_enabled(matches.get_flag(NO_COLOR_ARG), std::env::var_os(COLORS_DISABLED_ENV).as_deref());

        CliConfig { patterns: ordered.into_iter().map(|(_, spec)| spec).collect(), input, color }
    }

    /// Compile every pattern, in order, into a [`Matcher`].
    pub fn build_matcher(&self) -> Result<Matcher> {
        let mut matcher = Matcher::new();
        for spec in &self.patterns {
            match spec {
                PatternSpec::Whole { pattern, color } => {
                    let style: Style = color.parse().with_context(|| format!("bad colors for pattern '{pattern}'"))?;
                    matcher.add_pattern(pattern, style).with_context(|| format!("bad pattern '{pattern}'"))?;
                }
                PatternSpec::Group { pattern, colors } => {
                    let styles = colors
                        .iter()
                        .map(|color| color.parse::<Style>())
                        .collect::<grec::Result<Vec<_>>>()
                        .with_context(|| format!("bad colors for group pattern '{pattern}'"))?;
                    matcher
                        .add_group_pattern(pattern, styles)
                        .with_context(|| format!("bad group pattern '{pattern}'"))?;
                }
            }
        }
        Ok(matcher)
    }
}

/// Colors stay on unless `--no-color` is given or `ANSI_COLORS_DISABLED` is
/// set to anything, including an empty value.
fn colors_enabled(no_color_flag: bool, disabled_env: Option<&OsStr>) -> bool {
    !no_color_flag && disabled_env.is_none()
}

/// Values of each occurrence of `id`, keyed by the command-line position of
/// the occurrence's first value.
fn occurrences(matches: &ArgMatches, id: &str) -> Vec<(usize, Vec<String>)> {
    let (Some(groups), Some(mut indices)) = (matches.get_occurrences::<String>(id), matches.indices_of(id)) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for group in groups {
        let values: Vec<String> = group.cloned().collect();
        let Some(first) = indices.next() else {
            break;
        };
        for _ in 1..values.len() {
            indices.next();
        }
        found.push((first, values));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config(args: &[&str]) -> CliConfig {
        let matches = build_parser().try_get_matches_from(args).unwrap();
        CliConfig::from_matches(&matches)
    }

    fn whole(pattern: &str, color: &str) -> PatternSpec {
        PatternSpec::Whole { pattern: pattern.to_string(), color: color.to_string() }
    }

    fn group(pattern: &str, colors: &[&str]) -> PatternSpec {
        PatternSpec::Group {
            pattern: pattern.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn pattern_options_keep_command_line_order() {
        let cfg = config(&[
            "grec", "-m", "a", "red", "-g", "(b)(c)", "blue", "green_on_white", "-m", "d", "yellow", "--", "log.txt",
        ]);

        assert_eq!(
            cfg.patterns,
            vec![whole("a", "red"), group("(b)(c)", &["blue", "green_on_white"]), whole("d", "yellow")]
        );
        assert_eq!(cfg.input, Some(PathBuf::from("log.txt")));
    }

    #[test]
    fn group_option_first() {
        let cfg = config(&["grec", "-g", "(x)", "cyan", "-m", "y", "red"]);
        assert_eq!(cfg.patterns, vec![group("(x)", &["cyan"]), whole("y", "red")]);
    }

    #[test]
    fn group_pattern_without_colors() {
        let cfg = config(&["grec", "-g", "(x)"]);
        assert_eq!(cfg.patterns, vec![group("(x)", &[])]);
    }

    #[test]
    fn missing_or_dash_file_reads_stdin() {
        assert_eq!(config(&["grec", "-m", "a", "red"]).input, None);
        assert_eq!(config(&["grec", "-m", "a", "red", "--", "-"]).input, None);
    }

    #[test]
    fn no_color_flag() {
        assert!(!config(&["grec", "--no-color"]).color);
    }

    #[rstest]
    #[case(false, None, true)]
    #[case(true, None, false)]
    #[case(false, Some("1"), false)]
    #[case(false, Some(""), false)]
    #[case(true, Some("1"), false)]
    fn color_switches(#[case] no_color_flag: bool, #[case] env: Option<&str>, #[case] expected: bool) {
        assert_eq!(colors_enabled(no_color_flag, env.map(OsStr::new)), expected);
    }

    #[test]
    fn whole_pattern_needs_two_values() {
        assert!(build_parser().try_get_matches_from(["grec", "-m", "a"]).is_err());
    }

    #[test]
    fn build_matcher_in_order() {
        let cfg = config(&["grec", "-m", "[a-c]+", "red", "-m", "b", "blue"]);
        let matcher = cfg.build_matcher().unwrap();

        assert_eq!(matcher.rules().patterns().collect::<Vec<_>>(), vec!["[a-c]+", "b"]);
        assert_eq!(matcher.colorize("abc").to_string(), "\x1b[31ma\x1b[0m\x1b[34mb\x1b[0m\x1b[31mc\x1b[0m");
    }

    #[test]
    fn build_matcher_rejects_unknown_colors_and_bad_patterns() {
        assert!(config(&["grec", "-m", "a", "purple"]).build_matcher().is_err());
        assert!(config(&["grec", "-g", "(a)", "red", "on_mauve"]).build_matcher().is_err());
        assert!(config(&["grec", "-m", "(a", "red"]).build_matcher().is_err());
    }
}
