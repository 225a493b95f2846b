//! translation-tables
//!
//! Loads multi-language translation tables stored as CSV resources and
//! serves key lookups with default-language fallback.

pub mod config;
pub mod error;
pub mod input;
pub mod ir;
pub mod store;
pub mod syntax;
mod test_utils;

pub use error::{
    LookupError,
    TableError,
};
pub use store::{
    TableContext,
    TableRegistry,
    TranslationStore,
};
