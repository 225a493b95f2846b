use std::collections::HashMap;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::resource::resource_matcher;
use crate::store::DEFAULT_MISSING_MARKER;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languageAliases.English")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableSettings {
    /// Prepended to resource names: `{prefix}Translations.{table}.csv`.
    pub resource_prefix: String,

    /// Fallback language for every lookup, as a code or a language name.
    /// Only this language keeps empty translations.
    pub default_language: String,

    /// Initial current language. Defaults to `defaultLanguage`.
    pub current_language: Option<String>,

    /// Extra header label -> language code mappings, on top of the
    /// built-in language names.
    pub language_aliases: HashMap<String, String>,

    /// Report lookups in a language the table lacks instead of falling back.
    pub strict_languages: bool,

    /// Prepended to keys with no translation.
    pub missing_marker: char,

    pub debug_export: DebugExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebugExportConfig {
    /// Write every table to `output_path` after it is loaded or reloaded.
    pub enabled: bool,
    pub output_path: PathBuf,
}

impl Default for DebugExportConfig {
    fn default() -> Self {
        Self { enabled: false, output_path: PathBuf::from("translations_dump.csv") }
    }
}

impl TableSettings {
    /// # Errors
    /// - Required field is empty
    /// - Resource prefix is not a plain file name prefix
    /// - Alias with an empty label or code
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.resource_prefix.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "resourcePrefix",
                "The prefix cannot contain path separators. Example: \"Game\"",
            ));
        } else if let Err(e) = resource_matcher(&self.resource_prefix) {
            errors.push(ValidationError::new(
                "resourcePrefix",
                format!("Invalid resource prefix '{}': {e}", self.resource_prefix),
            ));
        }

        if self.default_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language cannot be empty. Please specify a language, for example: \"en\"",
            ));
        }

        if let Some(current) = &self.current_language
            && current.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "currentLanguage",
                "The language cannot be empty. Please specify a language, or remove this field",
            ));
        }

        let mut aliases: Vec<(&String, &String)> = self.language_aliases.iter().collect();
        aliases.sort();
        for (label, code) in aliases {
            if label.trim().is_empty() {
                errors.push(ValidationError::new(
                    "languageAliases",
                    format!("Alias for '{code}' has an empty label"),
                ));
            } else if code.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("languageAliases.{label}"),
                    "The language code cannot be empty",
                ));
            }
        }

        if self.missing_marker.is_control() {
            errors.push(ValidationError::new(
                "missingMarker",
                "The marker must be a printable character. Example: \"#\"",
            ));
        }

        if self.debug_export.enabled && self.debug_export.output_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "debugExport.outputPath",
                "The output path cannot be empty when debug export is enabled",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            resource_prefix: String::new(),
            default_language: "en".to_string(),
            current_language: None,
            language_aliases: HashMap::new(),
            strict_languages: false,
            missing_marker: DEFAULT_MISSING_MARKER,
            debug_export: DebugExportConfig::default(),
        }
    }
}
