//! Cell reader for the translation table CSV dialect.
//!
//! The dialect differs from RFC 4180 in two ways: quoted cells understand a
//! `\n` escape, and a quote that is followed by anything other than a quote,
//! a comma or the end of the line is kept as a literal character.

use std::iter::Peekable;
use std::str::Chars;

/// Quote character that opens a quoted cell.
pub const QUOTE: char = '"';
/// Cell separator.
pub const SEPARATOR: char = ',';
/// Escape character inside quoted cells.
pub const ESCAPE: char = '\\';

/// Cursor over the remaining characters of one logical line.
///
/// Each call to [`CellReader::read_cell`] consumes exactly one cell together
/// with its terminating separator.
#[derive(Debug, Clone)]
pub struct CellReader<'a> {
    /// Remaining characters of the line.
    chars: Peekable<Chars<'a>>,
}

impl<'a> CellReader<'a> {
    #[must_use]
    pub fn new(line: &'a str) -> Self {
        Self { chars: line.chars().peekable() }
    }

    /// Returns true when no characters are left on the line.
    pub fn is_exhausted(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Reads the next cell and advances past its separator.
    ///
    /// An exhausted reader yields empty cells, so rows shorter than the
    /// header simply produce blanks for the missing positions.
    pub fn read_cell(&mut self) -> String {
        if self.chars.peek() == Some(&QUOTE) {
            self.chars.next();
            self.read_quoted()
        } else {
            self.read_unquoted()
        }
    }

    /// Reads the body of a quoted cell; the opening quote is already consumed.
    fn read_quoted(&mut self) -> String {
        let mut value = String::new();

        while let Some(ch) = self.chars.next() {
            match ch {
                ESCAPE => match self.chars.next() {
                    Some('n') => value.push('\n'),
                    Some(other) => {
                        value.push(ESCAPE);
                        value.push(other);
                    }
                    None => value.push(ESCAPE),
                },
                QUOTE => match self.chars.peek() {
                    Some(&QUOTE) => {
                        self.chars.next();
                        value.push(QUOTE);
                    }
                    Some(&SEPARATOR) => {
                        self.chars.next();
                        return value;
                    }
                    None => return value,
                    // Stray quote inside the cell, not a delimiter.
                    Some(_) => value.push(QUOTE),
                },
                _ => value.push(ch),
            }
        }

        value
    }

    /// Reads an unquoted cell up to the next separator.
    fn read_unquoted(&mut self) -> String {
        let mut value = String::new();

        for ch in self.chars.by_ref() {
            if ch == SEPARATOR {
                break;
            }
            value.push(ch);
        }

        value
    }
}

/// Returns true when `line` ends while still inside a quoted cell.
///
/// Runs the same state machine as [`CellReader`] without building values, so
/// the line joiner and the reader always agree on where a quoted cell ends.
#[must_use]
pub fn ends_inside_quotes(line: &str) -> bool {
    let mut chars = line.chars().peekable();

    loop {
        // At the start of a cell.
        match chars.peek() {
            None => return false,
            Some(&QUOTE) => {
                chars.next();
                if !skip_quoted(&mut chars) {
                    return true;
                }
            }
            Some(_) => {
                for ch in chars.by_ref() {
                    if ch == SEPARATOR {
                        break;
                    }
                }
            }
        }
    }
}

/// Skips a quoted cell body. Returns false if the input ran out before the
/// closing quote.
fn skip_quoted(chars: &mut Peekable<Chars<'_>>) -> bool {
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => {
                if chars.next().is_none() {
                    return false;
                }
            }
            QUOTE => match chars.peek() {
                Some(&QUOTE) => {
                    chars.next();
                }
                Some(&SEPARATOR) => {
                    chars.next();
                    return true;
                }
                None => return true,
                Some(_) => {}
            },
            _ => {}
        }
    }
    false
}

/// Splits a whole logical line into its cells.
#[must_use]
pub fn read_all_cells(line: &str) -> Vec<String> {
    let mut reader = CellReader::new(line);
    let mut cells = Vec::new();
    while !reader.is_exhausted() {
        cells.push(reader.read_cell());
    }
    cells
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn first_cell(line: &str) -> String {
        CellReader::new(line).read_cell()
    }

    #[rstest]
    #[case::plain("plain", "plain")]
    #[case::plain_with_rest("plain,next", "plain")]
    #[case::quoted(r#""Hello",Bonjour"#, "Hello")]
    #[case::doubled_quote(r#""a""b""#, r#"a"b"#)]
    #[case::newline_escape(r#""line1\nline2""#, "line1\nline2")]
    #[case::other_escape_kept(r#""tab\there""#, r"tab\there")]
    #[case::escaped_quote_kept(r#""say \"hi\"""#, r#"say \"hi\""#)]
    #[case::quoted_comma(r#""a,b",c"#, "a,b")]
    #[case::stray_quote(r#""a"b",c"#, r#"a"b"#)]
    #[case::empty_quoted(r#""",x"#, "")]
    #[case::empty_unquoted(",x", "")]
    #[case::empty_line("", "")]
    #[case::unterminated(r#""never closed"#, "never closed")]
    #[case::trailing_backslash(r#""end\"#, r"end\")]
    #[case::unquoted_keeps_inner_quote(r#"a"b,c"#, r#"a"b"#)]
    fn test_read_first_cell(#[case] line: &str, #[case] expected: &str) {
        assert_that!(first_cell(line), eq(expected));
    }

    #[rstest]
    #[case::simple("a,b,c", &["a", "b", "c"])]
    #[case::mixed(r#"KEY,"Hello, world",Bonjour"#, &["KEY", "Hello, world", "Bonjour"])]
    #[case::empty_middle("a,,c", &["a", "", "c"])]
    #[case::trailing_separator("a,b,", &["a", "b"])]
    #[case::leading_separator(",English,French", &["", "English", "French"])]
    #[case::quoted_then_empty(r#""x",,"y""#, &["x", "", "y"])]
    fn test_read_all_cells(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(read_all_cells(line), expected);
    }

    #[googletest::test]
    fn test_reader_past_end_yields_empty_cells() {
        let mut reader = CellReader::new("KEY,one");

        expect_that!(reader.read_cell(), eq("KEY"));
        expect_that!(reader.read_cell(), eq("one"));
        expect_that!(reader.is_exhausted(), eq(true));
        expect_that!(reader.read_cell(), eq(""));
        expect_that!(reader.read_cell(), eq(""));
    }

    #[googletest::test]
    fn test_embedded_real_newline_is_kept() {
        let mut reader = CellReader::new("KEY,\"first\nsecond\",x");

        expect_that!(reader.read_cell(), eq("KEY"));
        expect_that!(reader.read_cell(), eq("first\nsecond"));
        expect_that!(reader.read_cell(), eq("x"));
    }

    #[rstest]
    #[case::plain_row("KEY,a,b", false)]
    #[case::closed_quote(r#"KEY,"a",b"#, false)]
    #[case::closed_at_end(r#"KEY,"a""#, false)]
    #[case::open_quote(r#"KEY,"first line"#, true)]
    #[case::open_after_doubled(r#"KEY,"say ""hi"#, true)]
    #[case::doubled_at_end(r#"KEY,"a"""#, true)]
    #[case::escaped_char_open(r#"KEY,"a\"#, true)]
    #[case::stray_quote_open(r#"KEY,"a"b"#, true)]
    #[case::empty("", false)]
    fn test_ends_inside_quotes(#[case] line: &str, #[case] expected: bool) {
        assert_that!(ends_inside_quotes(line), eq(expected));
    }
}
