//! Error types for loading and querying translation tables.

use thiserror::Error;

/// Failures that abort loading a table.
#[derive(Error, Debug)]
pub enum TableError {
    /// The named resource does not exist in the resource source
    #[error("Translation resource not found: {0}")]
    ResourceMissing(String),
    /// The resource exists but could not be read
    #[error("Failed to read translation resource '{name}': {source}")]
    UnreadableResource {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// The resource is not valid UTF-8
    #[error("Translation resource '{name}' is not valid UTF-8: {source}")]
    InvalidEncoding {
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// The header row is missing or declares no language column
    #[error("Malformed header in translation table '{table}': {reason}")]
    MalformedHeader { table: String, reason: &'static str },
    /// Writing the debug export failed
    #[error("Failed to write translation export to '{path}': {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reported by strict lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown language '{language}' in translation table '{table}'")]
    UnknownLanguage { table: String, language: String },
}
