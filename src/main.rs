//! Command-line front end for inspecting translation tables.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use tracing_subscriber::EnvFilter;
use translation_tables::TableRegistry;
use translation_tables::config::ConfigManager;
use translation_tables::input::resource::DirectoryResources;

/// Query translation tables stored as `{prefix}Translations.{table}.csv` files.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// Directory holding the table files and `.translation-tables.json`
    #[arg(long, short, env = "TRANSLATION_TABLES_DIR", default_value = ".")]
    dir: PathBuf,

    /// Settings file to use instead of `<dir>/.translation-tables.json`
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the tables found in the directory
    Tables,
    /// List the languages of a table
    Languages {
        /// Table name
        table: String,
    },
    /// Look up a key, with default-language fallback
    Get {
        /// Table name
        table: String,
        /// Translation key
        key: String,
        /// Language code or name (defaults to the current language)
        #[arg(long, short)]
        lang: Option<String>,
    },
    /// Check whether a key is translated, without fallback; exits 1 if not
    Has {
        /// Table name
        table: String,
        /// Translation key
        key: String,
        /// Language code or name (defaults to the current language)
        #[arg(long, short)]
        lang: Option<String>,
    },
    /// Write a table back out in the table CSV dialect
    Export {
        /// Table name
        table: String,
        /// Output file (defaults to standard output)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Arguments::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Loads settings, builds the registry and dispatches the command.
fn run(args: Arguments) -> anyhow::Result<ExitCode> {
    let mut config_manager = ConfigManager::new();
    match &args.config {
        Some(path) => config_manager
            .load_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => config_manager.load_settings(Some(args.dir.clone()))?,
    }

    let registry = TableRegistry::new(
        Arc::new(DirectoryResources::new(&args.dir)),
        config_manager.table_context(),
    );
    let mut out = std::io::stdout().lock();

    match args.command {
        Command::Tables => {
            for table in registry.available_tables() {
                writeln!(out, "{table}")?;
            }
        }
        Command::Languages { table } => {
            for language in registry.get_or_load(&table)?.languages() {
                writeln!(out, "{language}")?;
            }
        }
        Command::Get { table, key, lang } => {
            let store = registry.get_or_load(&table)?;
            let value = match lang {
                Some(lang) => store.get_in(&registry.context().aliases().resolve(&lang), &key),
                None => store.get(&key),
            };
            writeln!(out, "{value}")?;
        }
        Command::Has { table, key, lang } => {
            let store = registry.get_or_load(&table)?;
            let found = match lang {
                Some(lang) => {
                    store.has_string_in(&registry.context().aliases().resolve(&lang), &key)
                }
                None => store.has_string(&key),
            };
            writeln!(out, "{found}")?;
            if !found {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Export { table, output } => {
            let store = registry.get_or_load(&table)?;
            match output {
                Some(path) => store.export_to(&path)?,
                None => write!(
                    out,
                    "{}",
                    translation_tables::store::export_table(
                        &store.table(),
                        registry.context().default_language()
                    )
                )?,
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
