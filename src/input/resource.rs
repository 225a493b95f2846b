//! Translation table resources.
//!
//! A table named `Menu` with prefix `Game` lives in a resource called
//! `GameTranslations.Menu.csv`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    PoisonError,
    RwLock,
};

use globset::{
    Glob,
    GlobMatcher,
};

use crate::error::TableError;

/// Resource name infix between the prefix and the table name.
const TRANSLATIONS_INFIX: &str = "Translations.";
/// Resource name extension.
const EXTENSION: &str = ".csv";
/// UTF-8 byte order mark, stripped from the start of a resource.
const BOM: &str = "\u{feff}";

/// Returns the resource name of `table` under `prefix`.
///
/// # Examples
/// ```
/// use translation_tables::input::resource::resource_name;
///
/// assert_eq!(resource_name("Game", "Menu"), "GameTranslations.Menu.csv");
/// assert_eq!(resource_name("", "Menu"), "Translations.Menu.csv");
/// ```
#[must_use]
pub fn resource_name(prefix: &str, table: &str) -> String {
    format!("{prefix}{TRANSLATIONS_INFIX}{table}{EXTENSION}")
}

/// Extracts the table name from a resource name under `prefix`.
#[must_use]
pub fn table_name_of<'a>(prefix: &str, resource: &'a str) -> Option<&'a str> {
    let table = resource
        .strip_prefix(prefix)?
        .strip_prefix(TRANSLATIONS_INFIX)?
        .strip_suffix(EXTENSION)?;
    (!table.is_empty()).then_some(table)
}

/// Glob pattern matching every table resource under `prefix`.
#[must_use]
pub fn resource_pattern(prefix: &str) -> String {
    format!("{}{TRANSLATIONS_INFIX}*{EXTENSION}", globset_escape(prefix))
}

/// Escapes glob metacharacters in a literal prefix.
fn globset_escape(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '{' | '}' | '\\') {
            escaped.push('[');
            escaped.push(ch);
            escaped.push(']');
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

/// Builds the matcher for [`resource_pattern`].
///
/// # Errors
/// Returns the glob error if the pattern is invalid.
pub fn resource_matcher(prefix: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(Glob::new(&resource_pattern(prefix))?.compile_matcher())
}

/// Backing store that table resources are read from.
pub trait ResourceSource: Send + Sync + std::fmt::Debug {
    /// Returns the raw bytes of the named resource.
    ///
    /// # Errors
    /// [`TableError::ResourceMissing`] when no such resource exists, or
    /// [`TableError::UnreadableResource`] when it cannot be read.
    fn open(&self, name: &str) -> Result<Cow<'static, [u8]>, TableError>;

    /// Names of every resource this source holds.
    fn resource_names(&self) -> Vec<String>;

    /// Names of the tables available under `prefix`, sorted.
    fn table_names(&self, prefix: &str) -> Vec<String> {
        let Ok(matcher) = resource_matcher(prefix) else {
            tracing::warn!(prefix, "Invalid resource prefix pattern");
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .resource_names()
            .iter()
            .filter(|name| matcher.is_match(name.as_str()))
            .filter_map(|name| table_name_of(prefix, name).map(ToString::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Decodes resource bytes as UTF-8 text, dropping a leading byte order mark.
///
/// # Errors
/// Returns [`TableError::InvalidEncoding`] if the bytes are not UTF-8.
pub fn decode_resource(name: &str, bytes: Cow<'static, [u8]>) -> Result<String, TableError> {
    let text = String::from_utf8(bytes.into_owned())
        .map_err(|source| TableError::InvalidEncoding { name: name.to_string(), source })?;
    if let Some(stripped) = text.strip_prefix(BOM) {
        return Ok(stripped.to_string());
    }
    Ok(text)
}

/// Resources compiled into the binary, typically with `include_bytes!`.
///
/// ```
/// use translation_tables::input::resource::{EmbeddedResources, ResourceSource};
///
/// static RESOURCES: &[(&str, &[u8])] =
///     &[("Translations.Menu.csv", b",English\nSTART,Start\n")];
///
/// let source = EmbeddedResources::new(RESOURCES);
/// assert_eq!(source.table_names(""), vec!["Menu".to_string()]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    /// Resource name and content pairs.
    entries: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedResources {
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }
}

impl ResourceSource for EmbeddedResources {
    fn open(&self, name: &str) -> Result<Cow<'static, [u8]>, TableError> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
            .ok_or_else(|| TableError::ResourceMissing(name.to_string()))
    }

    fn resource_names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| (*name).to_string()).collect()
    }
}

/// Resources read from files in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    /// Directory holding the resource files.
    root: PathBuf,
}

impl DirectoryResources {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirectoryResources {
    fn open(&self, name: &str) -> Result<Cow<'static, [u8]>, TableError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(TableError::ResourceMissing(name.to_string()));
        }
        tracing::debug!("Reading translation resource: {:?}", path);
        std::fs::read(&path)
            .map(Cow::Owned)
            .map_err(|source| TableError::UnreadableResource { name: name.to_string(), source })
    }

    fn resource_names(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to list resource directory {:?}: {}", self.root, e);
                return Vec::new();
            }
        };
        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }
}

/// Resources held in memory, replaceable at runtime.
///
/// Useful for hosts that fetch table text themselves, and for forcing a
/// reload with new content.
#[derive(Debug, Default)]
pub struct MemoryResources {
    /// Resource name -> content.
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryResources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a resource.
    pub fn insert(&self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), content.into());
    }

    /// Removes a resource, returning whether it existed.
    pub fn remove(&self, name: &str) -> bool {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).remove(name).is_some()
    }
}

impl ResourceSource for MemoryResources {
    fn open(&self, name: &str) -> Result<Cow<'static, [u8]>, TableError> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|content| Cow::Owned(content.clone()))
            .ok_or_else(|| TableError::ResourceMissing(name.to_string()))
    }

    fn resource_names(&self) -> Vec<String> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect()
    }
}
