//! Shared fixtures for unit tests.
#![cfg(test)]

use std::sync::Arc;

use crate::input::resource::{
    MemoryResources,
    ResourceSource,
};

/// English/French table with a fallback row and an empty default value.
pub(crate) const GREETING_TABLE: &str =
    ",English,French\nGREETING,\"Hello\",Bonjour\nFAREWELL,Bye,\nSILENT,,\n";

/// Source holding `text` as the `Greetings` table.
pub(crate) fn memory_source(text: &str) -> Arc<dyn ResourceSource> {
    let source = MemoryResources::new();
    source.insert("Translations.Greetings.csv", text);
    Arc::new(source)
}
