//! In-memory translation table.

use std::collections::HashMap;

/// Per-language key to value mapping.
pub type LanguageBucket = HashMap<String, String>;

/// A header column of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Label as written in the header row (e.g. `English`).
    pub label: String,
    /// Canonical language code, `None` for a blank label.
    pub code: Option<String>,
}

/// Two-level translation map (language code -> key -> value) built from one
/// table resource.
///
/// Immutable once built; reloading produces a new table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    name: String,
    columns: Vec<Column>,
    buckets: HashMap<String, LanguageBucket>,
}

impl TranslationTable {
    /// Creates a table with one empty bucket per resolved column code.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let buckets = columns
            .iter()
            .filter_map(|column| column.code.clone())
            .map(|code| (code, LanguageBucket::new()))
            .collect();
        Self { name: name.into(), columns, buckets }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header columns in file order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Language codes in header order, without duplicates.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for code in self.columns.iter().filter_map(|column| column.code.as_deref()) {
            if !seen.contains(&code) {
                seen.push(code);
            }
        }
        seen
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.buckets.contains_key(language)
    }

    #[must_use]
    pub fn bucket(&self, language: &str) -> Option<&LanguageBucket> {
        self.buckets.get(language)
    }

    /// Looks up `key` in a single language, without any fallback.
    #[must_use]
    pub fn value(&self, language: &str, key: &str) -> Option<&str> {
        self.buckets.get(language)?.get(key).map(String::as_str)
    }

    /// Inserts a value into an existing bucket. Unknown languages are ignored.
    pub(crate) fn insert(&mut self, language: &str, key: &str, value: String) {
        if let Some(bucket) = self.buckets.get_mut(language) {
            bucket.insert(key.to_string(), value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn column(label: &str, code: Option<&str>) -> Column {
        Column { label: label.to_string(), code: code.map(ToString::to_string) }
    }

    #[googletest::test]
    fn new_creates_bucket_per_column() {
        let table = TranslationTable::new(
            "Menu",
            vec![column("English", Some("en")), column("", None), column("French", Some("fr"))],
        );

        expect_that!(table.name(), eq("Menu"));
        expect_that!(table.has_language("en"), eq(true));
        expect_that!(table.has_language("fr"), eq(true));
        expect_that!(table.has_language(""), eq(false));
        expect_that!(table.bucket("en").map(HashMap::len), some(eq(0)));
        expect_that!(table.columns().len(), eq(3));
    }

    #[googletest::test]
    fn languages_are_deduplicated_in_header_order() {
        let table = TranslationTable::new(
            "Menu",
            vec![column("fr", Some("fr")), column("English", Some("en")), column("FR", Some("fr"))],
        );

        assert_eq!(table.languages(), vec!["fr", "en"]);
    }

    #[googletest::test]
    fn insert_ignores_unknown_language() {
        let mut table = TranslationTable::new("Menu", vec![column("English", Some("en"))]);

        table.insert("en", "HELLO", "Hello".to_string());
        table.insert("de", "HELLO", "Hallo".to_string());

        expect_that!(table.value("en", "HELLO"), some(eq("Hello")));
        expect_that!(table.value("de", "HELLO"), none());
        expect_that!(table.has_language("de"), eq(false));
    }
}
