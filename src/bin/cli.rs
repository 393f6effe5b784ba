//! GTWM episode CLI
//!
//! `gtwm <year>` pulls one year of episodes out of the feed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gtwm::{
    error::Result,
    models::Config,
    pipeline,
    services::parse_year,
    storage::LocalStorage,
    utils::console,
};

/// GTWM - Podcast Episode Extractor
#[derive(Parser, Debug)]
#[command(
    name = "gtwm",
    version,
    about = "Extracts a year of GTWM podcast episodes into JSON and text",
    subcommand_negates_reqs = true
)]
struct Cli {
    /// Year to extract (e.g. 2021)
    #[arg(required = true)]
    year: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "data/config.toml")]
    config: PathBuf,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a year and merge it into the yearly archive
    Update {
        /// Year to extract
        year: String,
    },

    /// Show statistics over the yearly archives
    Stats,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging; `RUST_LOG` overrides the configured level.
fn init_logging(level: &str, quiet: bool) {
    let level = if quiet { "warn" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let storage = LocalStorage::from_config(&config.output);

    match cli.command {
        Some(Command::Update { year }) => {
            let year = parse_year(&year)?;
            pipeline::run_update(&config, &storage, year).await?;
        }
        Some(Command::Stats) => {
            pipeline::run_stats(&storage).await?;
        }
        Some(Command::Validate) => pipeline::run_validate(&config)?,
        None => {
            let year = parse_year(cli.year.as_deref().unwrap_or_default())?;
            pipeline::run_fetch(&config, &storage, year).await?;
        }
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(&level, cli.quiet);

    let config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });
    console::init(config.output.console_enabled && !cli.quiet);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
