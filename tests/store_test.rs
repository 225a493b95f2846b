//! End-to-end tests for loading tables and looking up keys.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use translation_tables::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
use translation_tables::input::language::{
    CurrentLanguage,
    SharedLanguage,
};
use translation_tables::input::resource::{
    DirectoryResources,
    EmbeddedResources,
    MemoryResources,
    ResourceSource,
};
use translation_tables::{
    LookupError,
    TableContext,
    TableError,
    TableRegistry,
    TranslationStore,
};

static RESOURCES: &[(&str, &[u8])] = &[(
    "Translations.Greetings.csv",
    include_bytes!("fixtures/Translations.Greetings.csv"),
)];

fn greetings(context: TableContext) -> TranslationStore {
    let source = Arc::new(EmbeddedResources::new(RESOURCES));
    TranslationStore::load("Greetings", source, Arc::new(context)).unwrap()
}

#[test]
fn test_greeting_farewell_example() {
    let source = MemoryResources::new();
    source.insert(
        "Translations.Example.csv",
        ",English,French\nGREETING,\"Hello\",Bonjour\nFAREWELL,Bye,\n",
    );
    let store =
        TranslationStore::load("Example", Arc::new(source), Arc::new(TableContext::new("en")))
            .unwrap();
    store.context().set_current_language("fr");

    assert_eq!(store.get("GREETING"), "Bonjour");
    assert_eq!(store.get("FAREWELL"), "Bye");
    assert!(!store.has_string("FAREWELL"));
    assert_eq!(store.get("MISSING"), "#MISSING");
}

#[test]
fn test_fixture_lookups() {
    let store = greetings(TableContext::new("en"));

    assert_eq!(store.languages(), vec!["en", "fr", "de"]);
    assert_eq!(store.get_in("de", "GREETING"), "Hallo");
    assert_eq!(store.get_in("fr", "FAREWELL"), "Bye");
    assert_eq!(store.get_in("en", "INTRO"), "Welcome\nto the game");
    assert_eq!(store.get_in("de", "INTRO"), "Welcome\nto the game");
    assert_eq!(store.get_in("fr", "QUOTE"), "She said \"hi\"");
    assert_eq!(store.get_in("de", "SILENT"), "");
    assert_eq!(store.get_in("en", "AFTER_SENTINEL"), "#AFTER_SENTINEL");
}

#[test]
fn test_host_supplied_current_language() {
    let current = Arc::new(SharedLanguage::new("de"));
    let provider: Arc<dyn CurrentLanguage> = current.clone();
    let store = greetings(TableContext::new("en").with_current_language(provider));

    assert_eq!(store.get("GREETING"), "Hallo");

    current.set_current_language("fr");
    assert_eq!(store.get("GREETING"), "Bonjour");
    assert!(store.has_string("INTRO"));
    assert!(!store.has_string("QUOTE"));
}

#[test]
fn test_strict_lookups() {
    let store = greetings(TableContext::new("en").with_strict(true));

    assert_eq!(store.get_in("ja", "GREETING"), "GREETING");
    assert_eq!(
        store.try_get_in("ja", "GREETING"),
        Err(LookupError::UnknownLanguage {
            table: "Greetings".to_string(),
            language: "ja".to_string(),
        })
    );
    assert_eq!(store.try_get_in("de", "NOPE"), Ok("#NOPE".to_string()));
}

#[test]
fn test_directory_registry_with_settings() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"{"resourcePrefix": "Game", "currentLanguage": "French", "missingMarker": "?"}"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("GameTranslations.Menu.csv"),
        ",English,French\nSTART,Start,Commencer\nQUIT,Quit,\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("Translations.Ignored.csv"), ",English\nA,a\n").unwrap();

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();
    let registry = TableRegistry::new(
        Arc::new(DirectoryResources::new(temp_dir.path())),
        config_manager.table_context(),
    );

    assert_eq!(registry.available_tables(), vec!["Menu".to_string()]);
    let menu = registry.get_or_load("Menu").unwrap();
    assert_eq!(menu.get("START"), "Commencer");
    assert_eq!(menu.get("QUIT"), "Quit");
    assert_eq!(menu.get("HELP"), "?HELP");
    assert!(matches!(registry.get_or_load("Ignored"), Err(TableError::ResourceMissing(_))));

    fs::write(
        temp_dir.path().join("GameTranslations.Menu.csv"),
        ",English,French\nSTART,Start,Démarrer\n",
    )
    .unwrap();
    assert!(registry.reload_all().is_empty());
    assert_eq!(menu.get("START"), "Démarrer");
    assert_eq!(menu.get("QUIT"), "?QUIT");
}

#[test]
fn test_export_round_trip_through_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = greetings(TableContext::new("en"));
    let exported = temp_dir.path().join("Translations.Greetings.csv");

    store.export_to(&exported).unwrap();
    let reloaded = TranslationStore::load(
        "Greetings",
        Arc::new(DirectoryResources::new(temp_dir.path())),
        Arc::new(TableContext::new("en")),
    )
    .unwrap();

    assert_eq!(*reloaded.table(), *store.table());
}

#[test]
fn test_debug_export_follows_reload() {
    let temp_dir = TempDir::new().unwrap();
    let dump = temp_dir.path().join("dump.csv");
    let source = Arc::new(MemoryResources::new());
    source.insert("Translations.Menu.csv", ",English\nSTART,Start\n");
    let shared: Arc<dyn ResourceSource> = source.clone();
    let store = TranslationStore::load(
        "Menu",
        shared,
        Arc::new(TableContext::new("en").with_debug_export(&dump)),
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&dump).unwrap(), ",English\nSTART,Start\n");

    source.insert("Translations.Menu.csv", ",English\nSTART,Go\n");
    store.reload().unwrap();

    assert_eq!(fs::read_to_string(&dump).unwrap(), ",English\nSTART,Go\n");
}
