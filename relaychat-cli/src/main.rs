#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]

//! Main entry point for the `RelayChat` CLI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::ClientConfig;
use shared::ids::{FileStore, ReconciliationCache};
use std::io;
use std::path::PathBuf;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// `RelayChat` CLI
#[derive(Parser)]
#[command(name = "relaychat")]
#[command(about = "Command-line tools for the RelayChat client", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (optional)
    #[arg(
        long,
        short,
        global = true,
        help = "Path to the configuration file (e.g., config.yaml or config.json). If not provided, defaults will be used."
    )]
    config: Option<PathBuf>,

    /// Path to the thread id table
    #[arg(
        long,
        global = true,
        help = "Path to the thread id table file. Defaults to <config dir>/relaychat/<storage_key>.json."
    )]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the `RelayChat` CLI
#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage the thread id table
    Ids {
        #[command(subcommand)]
        command: IdsCommand,
    },

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(
            long,
            short,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: clap_complete::Shell,
    },

    /// Print a default configuration file
    Config {
        /// Format of the configuration file to generate (yaml or json). Defaults to yaml.
        #[arg(
            long,
            short,
            help = "Format of the configuration file to generate (yaml or json). Defaults to yaml."
        )]
        format: Option<String>,
    },
}

#[derive(Subcommand)]
enum IdsCommand {
    /// Print the local id for each source id, creating mappings as needed
    Resolve {
        #[arg(required = true)]
        source_ids: Vec<String>,
    },
    /// Print existing local ids without creating any
    Lookup {
        #[arg(required = true)]
        source_ids: Vec<String>,
    },
    /// Print the whole table as JSON
    Show,
    /// Remove the table
    Clear,
}

fn build_env_filter(config: &ClientConfig) -> EnvFilter {
    let default_level = config
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}

fn init_tracing(config: &ClientConfig) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr)) // Keep stdout for command output
        .with(build_env_filter(config))
        .init();
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = ClientConfig::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;
    init_tracing(&config);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Ids { command } => {
            let store = cli
                .store
                .map_or_else(|| FileStore::in_config_dir(&config.storage_key), FileStore::new);
            debug!(path = %store.path().display(), "using thread id table");
            let location = store.path().display().to_string();
            let cache = ReconciliationCache::new(store);
            match command {
                IdsCommand::Resolve { source_ids } => {
                    commands::ids::resolve(&cache, &source_ids, &mut stdout)?;
                }
                IdsCommand::Lookup { source_ids } => {
                    commands::ids::lookup(&cache, &source_ids, &mut stdout)?;
                }
                IdsCommand::Show => commands::ids::show(&cache, &mut stdout)?,
                IdsCommand::Clear => commands::ids::clear(&cache, &location, &mut stdout)?,
            }
        }
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
        }
        Commands::Config { format } => {
            let format = format.unwrap_or_else(|| "yaml".to_string());
            commands::config::generate_config(&format, &mut stdout)?;
        }
    }

    Ok(())
}
