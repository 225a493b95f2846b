//! In-memory representation of parsed tables.

pub mod table;

pub use table::{
    Column,
    LanguageBucket,
    TranslationTable,
};
