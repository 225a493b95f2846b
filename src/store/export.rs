//! Renders a table back into the CSV dialect it was read from.

use std::collections::BTreeSet;

use crate::ir::table::TranslationTable;
use crate::syntax::cell::{
    QUOTE,
    SEPARATOR,
};

/// Renders `table` as table text: the header row, then one row per key in
/// sorted order.
///
/// Cells holding a separator, quote or line break are quoted with `"`
/// doubled and newlines written as the `\n` escape; other cells are written
/// as is. Missing translations are left as empty cells.
/// Every key in the default language bucket gets a row; when the table has
/// no default column, every key of every language does.
#[must_use]
pub fn export_table(table: &TranslationTable, default_language: &str) -> String {
    let mut out = String::new();

    for column in table.columns() {
        out.push(',');
        push_cell(&mut out, &column.label);
    }
    out.push('\n');

    for key in export_keys(table, default_language) {
        push_cell(&mut out, key);
        for column in table.columns() {
            out.push(',');
            if let Some(value) = column.code.as_deref().and_then(|code| table.value(code, key)) {
                push_cell(&mut out, value);
            }
        }
        out.push('\n');
    }

    out
}

/// Row keys in export order.
fn export_keys<'a>(table: &'a TranslationTable, default_language: &str) -> BTreeSet<&'a str> {
    if let Some(bucket) = table.bucket(default_language) {
        return bucket.keys().map(String::as_str).collect();
    }
    table
        .languages()
        .into_iter()
        .filter_map(|language| table.bucket(language))
        .flat_map(|bucket| bucket.keys().map(String::as_str))
        .collect()
}

/// Appends `value`, quoting it only when the unquoted form would not read
/// back the same. Unquoted cells take backslashes literally.
fn push_cell(out: &mut String, value: &str) {
    if !value.contains([SEPARATOR, QUOTE, '\n', '\r']) {
        out.push_str(value);
        return;
    }
    out.push('"');
    for ch in value.chars() {
        match ch {
            QUOTE => out.push_str("\"\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
