mod cli;
mod log_init;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use grec::{Matcher, Palette};

fn main() -> Result<()> {
    log_init::init_logger();

    let matches = cli::build_parser().get_matches();
    let config = cli::CliConfig::from_matches(&matches);
    let matcher = config.build_matcher()?;
    log::debug!("{} patterns, color output {}", matcher.rules().len(), if config.color { "on" } else { "off" });

    let reader = open_input(config.input.as_deref())?;
    finish(run(&matcher, reader, &Palette::new(config.color), io::stdout().lock()))
}

/// A closed pipe downstream (`grec ... | head`) ends the run quietly.
fn finish(result: io::Result<()>) -> Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to colorize input"),
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Colorize `reader` line by line onto `out`.
///
/// Line terminators (`\n` or `\r\n`) are stripped before matching, so `$`
/// anchors at the end of the visible text, and written back as `\n`.
fn run(matcher: &Matcher, reader: impl BufRead, palette: &Palette, out: impl Write) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    let mut read_error = None;

    let lines = reader.lines().map_while(|line| line.map_err(|err| read_error = Some(err)).ok());
    for colored in matcher.colorize_iter(lines) {
        writeln!(out, "{}", colored.render(palette))?;
    }
    out.flush()?;

    match read_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grec::{Color, Style};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn blue_b() -> Matcher {
        let mut matcher = Matcher::new();
        matcher.add_pattern("b", Style::fg(Color::Blue)).unwrap();
        matcher
    }

    fn colorize_bytes(matcher: &Matcher, input: &[u8], palette: Palette) -> (io::Result<()>, String) {
        let mut out = Vec::new();
        let result = run(matcher, Cursor::new(input.to_vec()), &palette, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn crlf_becomes_lf_and_last_line_gets_a_newline() {
        let (result, out) = colorize_bytes(&blue_b(), b"a\r\nb", Palette::default());
        assert!(result.is_ok());
        assert_eq!(out, "a\n\x1b[34mb\x1b[0m\n");
    }

    #[test]
    fn dollar_anchors_before_the_line_terminator() {
        let mut matcher = Matcher::new();
        matcher.add_pattern("x$", Style::fg(Color::Red)).unwrap();

        let (_, out) = colorize_bytes(&matcher, b"xx\r\nx\n", Palette::default());
        assert_eq!(out, "x\x1b[31mx\x1b[0m\n\x1b[31mx\x1b[0m\n");
    }

    #[test]
    fn empty_input_writes_nothing() {
        let (result, out) = colorize_bytes(&blue_b(), b"", Palette::default());
        assert!(result.is_ok());
        assert_eq!(out, "");
    }

    #[test]
    fn disabled_palette_passes_lines_through() {
        let (_, out) = colorize_bytes(&blue_b(), b"abc\n\nb\n", Palette::new(false));
        assert_eq!(out, "abc\n\nb\n");
    }

    #[test]
    fn read_errors_stop_after_earlier_lines_are_written() {
        let (result, out) = colorize_bytes(&blue_b(), b"b\n\xff\nb\n", Palette::default());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert_eq!(out, "\x1b[34mb\x1b[0m\n");
    }

    #[test]
    fn broken_pipe_ends_quietly() {
        let result = run(&blue_b(), Cursor::new(b"b\n".to_vec()), &Palette::default(), ClosedPipe);
        assert_eq!(result.as_ref().unwrap_err().kind(), io::ErrorKind::BrokenPipe);
        assert!(finish(result).is_ok());
    }

    #[test]
    fn other_write_errors_are_reported() {
        let err = finish(Err(io::Error::other("disk full"))).unwrap_err();
        assert_eq!(err.to_string(), "failed to colorize input");
        assert_eq!(err.root_cause().to_string(), "disk full");
    }
}
