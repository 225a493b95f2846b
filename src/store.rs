//! Translation stores and the registry that shares them.

pub mod context;
pub mod export;
pub mod registry;
pub mod translation_store;

pub use context::{
    DEFAULT_MISSING_MARKER,
    TableContext,
};
pub use export::export_table;
pub use registry::TableRegistry;
pub use translation_store::TranslationStore;
