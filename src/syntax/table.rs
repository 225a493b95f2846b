//! Builds a [`TranslationTable`] from table text.

use super::cell::CellReader;
use super::lines::join_lines;
use crate::error::TableError;
use crate::input::language::LanguageAliases;
use crate::ir::table::{
    Column,
    TranslationTable,
};

/// Reads the header and data rows of a translation table.
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder<'a> {
    /// Header label resolution.
    aliases: &'a LanguageAliases,
    /// Language whose empty cells are still recorded.
    default_language: &'a str,
}

impl<'a> TableBuilder<'a> {
    #[must_use]
    pub const fn new(aliases: &'a LanguageAliases, default_language: &'a str) -> Self {
        Self { aliases, default_language }
    }

    /// Builds the table named `name` from its full text.
    ///
    /// # Errors
    /// Returns [`TableError::MalformedHeader`] when the text has no header row
    /// or the header declares no language column.
    pub fn build(&self, name: &str, text: &str) -> Result<TranslationTable, TableError> {
        let lines = join_lines(text);
        let mut lines = lines.iter();

        let header = lines.next().ok_or_else(|| TableError::MalformedHeader {
            table: name.to_string(),
            reason: "empty table",
        })?;
        let columns = self.read_header(header);
        if columns.iter().all(|column| column.code.is_none()) {
            return Err(TableError::MalformedHeader {
                table: name.to_string(),
                reason: "no language columns",
            });
        }

        let mut table = TranslationTable::new(name, columns);
        if !table.has_language(self.default_language) {
            tracing::warn!(
                table = name,
                default_language = self.default_language,
                "Default language has no column; lookups will have no fallback"
            );
        }

        let mut rows = 0usize;
        for line in lines {
            if !self.read_row(&mut table, line) {
                tracing::debug!(table = name, rows, "Empty key, ignoring the remaining lines");
                break;
            }
            rows += 1;
        }

        tracing::debug!(
            table = name,
            rows,
            languages = ?table.languages(),
            "Translation table built"
        );
        Ok(table)
    }

    /// Reads the header cells after the first one and resolves them.
    fn read_header(&self, header: &str) -> Vec<Column> {
        let mut reader = CellReader::new(header);
        reader.read_cell();

        let mut columns = Vec::new();
        while !reader.is_exhausted() {
            let label = reader.read_cell();
            let code =
                if label.trim().is_empty() { None } else { Some(self.aliases.resolve(&label)) };
            columns.push(Column { label, code });
        }
        columns
    }

    /// Reads one data row into `table`. Returns false on the empty-key
    /// sentinel.
    fn read_row(&self, table: &mut TranslationTable, line: &str) -> bool {
        let mut reader = CellReader::new(line);
        let key = reader.read_cell();
        if key.is_empty() {
            return false;
        }

        let codes: Vec<Option<String>> =
            table.columns().iter().map(|column| column.code.clone()).collect();
        for code in codes {
            let value = reader.read_cell();
            let Some(code) = code else {
                continue;
            };
            // Empty translations are only accepted for the default language.
            if value.is_empty() && code != self.default_language {
                continue;
            }
            table.insert(&code, &key, value);
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn build(text: &str) -> Result<TranslationTable, TableError> {
        let aliases = LanguageAliases::builtin();
        TableBuilder::new(&aliases, "en").build("Test", text)
    }

    #[googletest::test]
    fn test_build_greeting_example() {
        let table = build(",English,French\nGREETING,\"Hello\",Bonjour\nFAREWELL,Bye,\n").unwrap();

        assert_eq!(table.languages(), vec!["en", "fr"]);
        expect_that!(table.value("en", "GREETING"), some(eq("Hello")));
        expect_that!(table.value("fr", "GREETING"), some(eq("Bonjour")));
        expect_that!(table.value("en", "FAREWELL"), some(eq("Bye")));
        expect_that!(table.value("fr", "FAREWELL"), none());
    }

    #[googletest::test]
    fn test_default_language_keeps_empty_cell() {
        let table = build(",English,French\nEMPTY,,Vide\n").unwrap();

        expect_that!(table.value("en", "EMPTY"), some(eq("")));
        expect_that!(table.value("fr", "EMPTY"), some(eq("Vide")));
    }

    #[googletest::test]
    fn test_sentinel_stops_processing() {
        let table = build(",English\nA,one\n,ignored\nB,two\n").unwrap();

        expect_that!(table.value("en", "A"), some(eq("one")));
        expect_that!(table.value("en", "B"), none());
        expect_that!(table.bucket("en").map(std::collections::HashMap::len), some(eq(1)));
    }

    #[googletest::test]
    fn test_short_row_is_absorbed() {
        let table = build(",English,French,German\nKEY,Key\n").unwrap();

        expect_that!(table.value("en", "KEY"), some(eq("Key")));
        expect_that!(table.value("fr", "KEY"), none());
        expect_that!(table.value("de", "KEY"), none());
        expect_that!(table.has_language("de"), eq(true));
    }

    #[googletest::test]
    fn test_short_row_missing_default_is_recorded_empty() {
        let table = build(",French,English\nKEY,Clef\n").unwrap();

        expect_that!(table.value("fr", "KEY"), some(eq("Clef")));
        expect_that!(table.value("en", "KEY"), some(eq("")));
    }

    #[googletest::test]
    fn test_multiline_value_is_rejoined() {
        let table = build(",English\nINTRO,\"Welcome\nto the game\"\nNEXT,Next\n").unwrap();

        expect_that!(table.value("en", "INTRO"), some(eq("Welcome\nto the game")));
        expect_that!(table.value("en", "NEXT"), some(eq("Next")));
    }

    #[googletest::test]
    fn test_escaped_newline_and_quotes() {
        let table = build(",English\nQUOTE,\"She said \"\"hi\"\"\\nthen left\"\n").unwrap();

        expect_that!(table.value("en", "QUOTE"), some(eq("She said \"hi\"\nthen left")));
    }

    #[googletest::test]
    fn test_extra_cells_are_ignored() {
        let table = build(",English\nKEY,Key,surplus,more\n").unwrap();

        expect_that!(table.value("en", "KEY"), some(eq("Key")));
    }

    #[googletest::test]
    fn test_blank_header_label_keeps_alignment() {
        let table = build(",English,,French\nKEY,Key,note,Clef\n").unwrap();

        assert_eq!(table.languages(), vec!["en", "fr"]);
        expect_that!(table.value("fr", "KEY"), some(eq("Clef")));
        expect_that!(table.columns().len(), eq(3));
    }

    #[googletest::test]
    fn test_missing_default_language_still_loads() {
        let table = build(",French\nKEY,Clef\n").unwrap();

        expect_that!(table.has_language("en"), eq(false));
        expect_that!(table.value("fr", "KEY"), some(eq("Clef")));
    }

    #[rstest]
    #[case::empty_text("")]
    #[case::only_blank_lines("\n\n")]
    #[case::no_language_columns("KeyColumn\nA,one")]
    #[case::blank_labels_only(",,\nA,one")]
    fn test_malformed_header(#[case] text: &str) {
        let result = build(text);

        assert!(matches!(result, Err(TableError::MalformedHeader { .. })));
    }
}
