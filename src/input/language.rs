//! Language label resolution and the current-language collaborator.

use std::collections::HashMap;
use std::sync::{
    Arc,
    LazyLock,
    PoisonError,
    RwLock,
};

/// Full language names that commonly appear in table headers.
static BUILTIN_ALIASES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    [
        ("arabic", "ar"),
        ("bulgarian", "bg"),
        ("chinese", "zh"),
        ("chinese (simplified)", "zh-cn"),
        ("chinese (traditional)", "zh-tw"),
        ("simplified chinese", "zh-cn"),
        ("traditional chinese", "zh-tw"),
        ("czech", "cs"),
        ("danish", "da"),
        ("dutch", "nl"),
        ("english", "en"),
        ("estonian", "et"),
        ("finnish", "fi"),
        ("french", "fr"),
        ("german", "de"),
        ("greek", "el"),
        ("hungarian", "hu"),
        ("indonesian", "id"),
        ("italian", "it"),
        ("japanese", "ja"),
        ("korean", "ko"),
        ("latvian", "lv"),
        ("lithuanian", "lt"),
        ("norwegian", "no"),
        ("polish", "pl"),
        ("portuguese", "pt"),
        ("portuguese (brazil)", "pt-br"),
        ("brazilian portuguese", "pt-br"),
        ("romanian", "ro"),
        ("russian", "ru"),
        ("slovak", "sk"),
        ("slovenian", "sl"),
        ("spanish", "es"),
        ("swedish", "sv"),
        ("thai", "th"),
        ("turkish", "tr"),
        ("ukrainian", "uk"),
        ("vietnamese", "vi"),
    ]
    .iter()
    .map(|(name, code)| ((*name).to_string(), (*code).to_string()))
    .collect()
});

/// Maps header labels to canonical language codes.
///
/// Matching is case-insensitive. Labels without an alias resolve to their
/// lower-cased form, so a header written with codes (`EN`, `fr`) works too.
#[derive(Debug, Clone)]
pub struct LanguageAliases {
    /// Lower-cased label -> code.
    aliases: HashMap<String, String>,
}

impl LanguageAliases {
    /// Alias table containing only the built-in language names.
    #[must_use]
    pub fn builtin() -> Self {
        Self { aliases: BUILTIN_ALIASES.clone() }
    }

    /// Alias table with no entries; every label is simply lower-cased.
    #[must_use]
    pub fn empty() -> Self {
        Self { aliases: HashMap::new() }
    }

    /// Adds or overrides aliases. Codes are lower-cased like header labels.
    #[must_use]
    pub fn with_aliases<'a>(
        mut self,
        aliases: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (label, code) in aliases {
            self.aliases.insert(normalize_label(label), code.to_lowercase());
        }
        self
    }

    /// Resolves a header label to a language code.
    #[must_use]
    pub fn resolve(&self, label: &str) -> String {
        let normalized = normalize_label(label);
        self.aliases.get(&normalized).cloned().unwrap_or(normalized)
    }
}

impl Default for LanguageAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Normalize a label for alias lookup (trim and lowercase)
fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Supplies the caller's active language code.
pub trait CurrentLanguage: Send + Sync + std::fmt::Debug {
    fn current_language(&self) -> String;

    /// Notification that the host switched languages. Providers that follow
    /// an external source may ignore it.
    fn set_current_language(&self, _language: &str) {}
}

/// Current-language provider holding the code in memory.
#[derive(Debug, Clone)]
pub struct SharedLanguage {
    /// Active language code.
    current: Arc<RwLock<String>>,
}

impl SharedLanguage {
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self { current: Arc::new(RwLock::new(language.into())) }
    }
}

impl CurrentLanguage for SharedLanguage {
    fn current_language(&self) -> String {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_current_language(&self, language: &str) {
        tracing::debug!(language, "Current language changed");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = language.to_string();
    }
}
