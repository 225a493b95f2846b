//! Host-supplied collaborators and lookup policy shared by every table.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::TableSettings;
use crate::input::language::{
    CurrentLanguage,
    LanguageAliases,
    SharedLanguage,
};

/// Marker prepended to keys that have no translation in any consulted
/// language.
pub const DEFAULT_MISSING_MARKER: char = '#';

/// Read-only context injected into translation stores.
#[derive(Debug, Clone)]
pub struct TableContext {
    /// Fallback language, also the only one accepting empty values.
    default_language: String,
    /// Header label resolution.
    aliases: LanguageAliases,
    /// Provider of the caller's active language.
    current: Arc<dyn CurrentLanguage>,
    /// Report unknown languages instead of falling back.
    strict: bool,
    /// Prefix for untranslated keys.
    missing_marker: char,
    /// Resource name prefix, as in `{prefix}Translations.{table}.csv`.
    resource_prefix: String,
    /// Where to dump loaded tables, if enabled.
    debug_export: Option<PathBuf>,
}

impl TableContext {
    /// Context with built-in aliases, the current language starting at the
    /// default language, and permissive lookups.
    ///
    /// The default language may be a code or a full name; it is resolved the
    /// same way header labels are.
    #[must_use]
    pub fn new(default_language: &str) -> Self {
        Self::with_default_resolved(default_language, LanguageAliases::builtin())
    }

    /// Resolves `default_label` through `aliases` and builds the context.
    fn with_default_resolved(default_label: &str, aliases: LanguageAliases) -> Self {
        let default_language = aliases.resolve(default_label);
        Self {
            current: Arc::new(SharedLanguage::new(default_language.clone())),
            default_language,
            aliases,
            strict: false,
            missing_marker: DEFAULT_MISSING_MARKER,
            resource_prefix: String::new(),
            debug_export: None,
        }
    }

    /// Builds a context from validated settings.
    #[must_use]
    pub fn from_settings(settings: &TableSettings) -> Self {
        let aliases = LanguageAliases::builtin().with_aliases(
            settings.language_aliases.iter().map(|(label, code)| (label.as_str(), code.as_str())),
        );
        let mut context = Self::with_default_resolved(&settings.default_language, aliases)
            .with_strict(settings.strict_languages)
            .with_missing_marker(settings.missing_marker)
            .with_resource_prefix(&settings.resource_prefix);
        if let Some(current) = &settings.current_language {
            context.set_current_language(current);
        }
        if settings.debug_export.enabled {
            context.debug_export = Some(settings.debug_export.output_path.clone());
        }
        context
    }

    /// Replaces the alias table used for header labels and language changes.
    /// The default language keeps the code it was resolved to.
    #[must_use]
    pub fn with_aliases(mut self, aliases: LanguageAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Replaces the current-language provider.
    #[must_use]
    pub fn with_current_language(mut self, current: Arc<dyn CurrentLanguage>) -> Self {
        self.current = current;
        self
    }

    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub const fn with_missing_marker(mut self, marker: char) -> Self {
        self.missing_marker = marker;
        self
    }

    #[must_use]
    pub fn with_resource_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_prefix = prefix.into();
        self
    }

    /// Enables the debug export of every loaded table to `path`.
    #[must_use]
    pub fn with_debug_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_export = Some(path.into());
        self
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    #[must_use]
    pub const fn aliases(&self) -> &LanguageAliases {
        &self.aliases
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub const fn missing_marker(&self) -> char {
        self.missing_marker
    }

    #[must_use]
    pub fn resource_prefix(&self) -> &str {
        &self.resource_prefix
    }

    #[must_use]
    pub fn debug_export(&self) -> Option<&PathBuf> {
        self.debug_export.as_ref()
    }

    /// The caller's active language code.
    #[must_use]
    pub fn current_language(&self) -> String {
        self.current.current_language()
    }

    /// Forwards a host language change. The label may be a full language
    /// name; it is resolved the same way header labels are.
    pub fn set_current_language(&self, label: &str) {
        self.current.set_current_language(&self.aliases.resolve(label));
    }
}
