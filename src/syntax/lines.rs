//! Rejoins physical lines that were split inside quoted cells.

use super::cell::{
    QUOTE,
    ends_inside_quotes,
};

/// Splits `text` into logical lines, one per table row.
///
/// Quoted cells may contain literal line breaks, so a naive split on `\n`
/// cuts such a row into several fragments. Fragments that follow a line
/// still inside a quoted cell are appended to it with the line break put
/// back. Empty physical lines are dropped.
#[must_use]
pub fn join_lines(text: &str) -> Vec<String> {
    let mut joiner = LineJoiner::default();
    for line in text.split('\n') {
        joiner.push(line.strip_suffix('\r').unwrap_or(line));
    }
    joiner.finish()
}

/// Accumulator holding completed logical lines and at most one open line.
#[derive(Debug, Default)]
pub struct LineJoiner {
    /// Completed logical lines in source order.
    lines: Vec<String>,
    /// Line that ended inside a quoted cell and awaits its continuation.
    open: Option<String>,
}

impl LineJoiner {
    /// Feeds the next physical line.
    pub fn push(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        match self.open.take() {
            Some(open) if starts_new_row(&open, line) => {
                self.lines.push(open);
                self.start(line);
            }
            Some(mut open) => {
                open.push('\n');
                open.push_str(line);
                if ends_inside_quotes(&open) {
                    self.open = Some(open);
                } else {
                    self.lines.push(open);
                }
            }
            None => self.start(line),
        }
    }

    /// Returns the logical lines. A line still open at the end is kept as is.
    #[must_use]
    pub fn finish(mut self) -> Vec<String> {
        if let Some(open) = self.open.take() {
            tracing::warn!(
                line = %open.lines().next().unwrap_or_default(),
                "Quoted cell is never closed; keeping the row up to the end of input"
            );
            self.lines.push(open);
        }
        self.lines
    }

    /// Begins a new logical line.
    fn start(&mut self, line: &str) {
        if ends_inside_quotes(line) {
            self.open = Some(line.to_string());
        } else {
            self.lines.push(line.to_string());
        }
    }
}

/// A fragment opening with a quote after an open line closing with a quote
/// is treated as a fresh row rather than a continuation.
fn starts_new_row(open: &str, fragment: &str) -> bool {
    fragment.starts_with(QUOTE) && open.ends_with(QUOTE)
}
