//! Per-name cache of translation stores.

use std::collections::HashMap;
use std::sync::{
    Arc,
    OnceLock,
    PoisonError,
    RwLock,
};

use super::context::TableContext;
use super::translation_store::TranslationStore;
use crate::error::TableError;
use crate::input::resource::ResourceSource;

/// Process-wide registry, see [`TableRegistry::install_global`].
static GLOBAL: OnceLock<TableRegistry> = OnceLock::new();

/// Creates each named table at most once and hands out shared stores.
#[derive(Debug)]
pub struct TableRegistry {
    /// Where every table is read from.
    source: Arc<dyn ResourceSource>,
    /// Context shared by every store.
    context: Arc<TableContext>,
    /// Loaded stores by table name.
    tables: RwLock<HashMap<String, Arc<TranslationStore>>>,
}

impl TableRegistry {
    #[must_use]
    pub fn new(source: Arc<dyn ResourceSource>, context: TableContext) -> Self {
        Self { source, context: Arc::new(context), tables: RwLock::new(HashMap::new()) }
    }

    #[must_use]
    pub fn context(&self) -> &TableContext {
        &self.context
    }

    #[must_use]
    pub fn source(&self) -> &dyn ResourceSource {
        self.source.as_ref()
    }

    /// Returns the store for `name`, loading it on first use.
    ///
    /// Concurrent first calls for the same name construct the store once.
    ///
    /// # Errors
    /// Propagates the load failure; nothing is cached in that case.
    pub fn get_or_load(&self, name: &str) -> Result<Arc<TranslationStore>, TableError> {
        if let Some(store) = self.tables.read().unwrap_or_else(PoisonError::into_inner).get(name) {
            return Ok(Arc::clone(store));
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = tables.get(name) {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(TranslationStore::load(
            name,
            Arc::clone(&self.source),
            Arc::clone(&self.context),
        )?);
        tracing::debug!(table = name, "Translation table registered");
        tables.insert(name.to_string(), Arc::clone(&store));
        Ok(store)
    }

    /// Returns the store for `name` if it has been loaded.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<TranslationStore>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    /// Reloads `name`, loading it if it was never requested.
    ///
    /// # Errors
    /// Propagates the load failure. A previously loaded table is kept.
    pub fn reload(&self, name: &str) -> Result<Arc<TranslationStore>, TableError> {
        match self.get(name) {
            Some(store) => {
                store.reload()?;
                Ok(store)
            }
            None => self.get_or_load(name),
        }
    }

    /// Reloads every loaded table and returns the failures by table name.
    #[must_use]
    pub fn reload_all(&self) -> Vec<(String, TableError)> {
        let stores: Vec<Arc<TranslationStore>> =
            self.tables.read().unwrap_or_else(PoisonError::into_inner).values().cloned().collect();

        let mut failures = Vec::new();
        for store in stores {
            if let Err(e) = store.reload() {
                tracing::warn!("Failed to reload translation table '{}': {}", store.name(), e);
                failures.push((store.name().to_string(), e));
            }
        }
        failures.sort_by(|a, b| a.0.cmp(&b.0));
        failures
    }

    /// Names of the loaded tables, sorted.
    #[must_use]
    pub fn loaded_tables(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.tables.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of the tables the resource source offers, sorted.
    #[must_use]
    pub fn available_tables(&self) -> Vec<String> {
        self.source.table_names(self.context.resource_prefix())
    }

    /// Installs `registry` as the process-wide instance.
    ///
    /// # Errors
    /// Returns the registry back if one is already installed.
    pub fn install_global(registry: Self) -> Result<(), Self> {
        GLOBAL.set(registry)?;
        tracing::debug!("Global translation registry installed");
        Ok(())
    }

    /// The process-wide instance, if installed.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }
}
