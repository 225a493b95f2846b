//! Long-lived lookup object for one translation table.

use std::path::Path;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use super::context::TableContext;
use super::export::export_table;
use crate::error::{
    LookupError,
    TableError,
};
use crate::input::resource::{
    ResourceSource,
    decode_resource,
    resource_name,
};
use crate::ir::table::TranslationTable;
use crate::syntax::TableBuilder;

/// Serves lookups for one named table.
///
/// The table is loaded when the store is constructed. Lookups read an
/// immutable snapshot; [`TranslationStore::reload`] builds a new table and
/// swaps it in whole, so a reader never sees a partially built table.
#[derive(Debug)]
pub struct TranslationStore {
    /// Table name, as in `{prefix}Translations.{name}.csv`.
    name: String,
    /// Where the table text is read from.
    source: Arc<dyn ResourceSource>,
    /// Collaborators and lookup policy.
    context: Arc<TableContext>,
    /// Current table snapshot.
    table: RwLock<Arc<TranslationTable>>,
}

impl TranslationStore {
    /// Loads the table `name` from `source`.
    ///
    /// # Errors
    /// Fails if the resource is missing, unreadable, not UTF-8, or its header
    /// is malformed. No store exists after a failed load.
    pub fn load(
        name: impl Into<String>,
        source: Arc<dyn ResourceSource>,
        context: Arc<TableContext>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        let table = build_from_source(&name, source.as_ref(), &context)?;
        let store = Self { name, source, context, table: RwLock::new(Arc::new(table)) };
        store.export_if_enabled();
        Ok(store)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn context(&self) -> &TableContext {
        &self.context
    }

    /// Snapshot of the current table.
    #[must_use]
    pub fn table(&self) -> Arc<TranslationTable> {
        Arc::clone(&self.table.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Language codes of the table in header order.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.table().languages().into_iter().map(ToString::to_string).collect()
    }

    /// Keys translated in `language`, sorted. Empty for an unknown language.
    #[must_use]
    pub fn keys(&self, language: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .table()
            .bucket(language)
            .map(|bucket| bucket.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Looks up `key` in the caller's current language.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.get_in(&self.context.current_language(), key)
    }

    /// Looks up `key` in `language`, falling back to the default language.
    ///
    /// Keys found in neither are returned with the missing marker prepended.
    /// In strict mode an unknown language is logged as an error and the key
    /// is returned without the marker.
    #[must_use]
    pub fn get_in(&self, language: &str, key: &str) -> String {
        let table = self.table();

        if self.context.is_strict() && !table.has_language(language) {
            let error = self.unknown_language(language);
            tracing::error!(%error, key, "Translation lookup failed");
            return key.to_string();
        }

        resolve(&table, &self.context, language, key)
    }

    /// Strict lookup: like [`TranslationStore::get_in`] but an unknown
    /// language is returned as an error regardless of the configured mode.
    ///
    /// # Errors
    /// [`LookupError::UnknownLanguage`] when `language` has no column.
    pub fn try_get_in(&self, language: &str, key: &str) -> Result<String, LookupError> {
        let table = self.table();
        if !table.has_language(language) {
            return Err(self.unknown_language(language));
        }
        Ok(resolve(&table, &self.context, language, key))
    }

    /// Returns true if `key` is translated in the current language.
    ///
    /// The default language is not consulted.
    #[must_use]
    pub fn has_string(&self, key: &str) -> bool {
        self.has_string_in(&self.context.current_language(), key)
    }

    /// Returns true if `key` is translated in `language`, without fallback.
    #[must_use]
    pub fn has_string_in(&self, language: &str, key: &str) -> bool {
        self.table().value(language, key).is_some()
    }

    /// Rebuilds the table from its resource and publishes it atomically.
    ///
    /// # Errors
    /// Same as [`TranslationStore::load`]. On failure the previous table stays
    /// in place.
    pub fn reload(&self) -> Result<(), TableError> {
        let table = build_from_source(&self.name, self.source.as_ref(), &self.context)?;
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(table);
        tracing::debug!(table = %self.name, "Translation table reloaded");
        self.export_if_enabled();
        Ok(())
    }

    /// Writes the table in the CSV dialect to `path`.
    ///
    /// # Errors
    /// [`TableError::Export`] if the file cannot be written.
    pub fn export_to(&self, path: &Path) -> Result<(), TableError> {
        let text = export_table(&self.table(), self.context.default_language());
        std::fs::write(path, text).map_err(|source| TableError::Export {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(table = %self.name, "Exported translation table to {:?}", path);
        Ok(())
    }

    /// Runs the debug export when the context enables it. Failures are only
    /// logged.
    fn export_if_enabled(&self) {
        let Some(path) = self.context.debug_export() else {
            return;
        };
        if let Err(e) = self.export_to(path) {
            tracing::warn!("Debug export of table '{}' failed: {}", self.name, e);
        }
    }

    /// Builds the unknown-language error for this table.
    fn unknown_language(&self, language: &str) -> LookupError {
        LookupError::UnknownLanguage { table: self.name.clone(), language: language.to_string() }
    }
}

/// Reads, decodes and parses the table resource.
fn build_from_source(
    name: &str,
    source: &dyn ResourceSource,
    context: &TableContext,
) -> Result<TranslationTable, TableError> {
    let resource = resource_name(context.resource_prefix(), name);
    let bytes = source.open(&resource)?;
    let text = decode_resource(&resource, bytes)?;
    TableBuilder::new(context.aliases(), context.default_language()).build(name, &text)
}

/// Requested language, then default language, then the marked key.
fn resolve(table: &TranslationTable, context: &TableContext, language: &str, key: &str) -> String {
    table
        .value(language, key)
        .or_else(|| table.value(context.default_language(), key))
        .map_or_else(|| format!("{}{key}", context.missing_marker()), ToString::to_string)
}
