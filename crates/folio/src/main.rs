//! Folio CLI - group a portfolio's image listing into dated photo shoots.
//!
//! Folio reads a snapshot of the storage folder listing, clusters the images
//! into shoots (newest first, undated last) and writes them as JSON for the
//! gallery page.
//!
//! # Usage
//!
//! ```bash
//! # Cluster a listing snapshot
//! folio cluster listing.json --output shoots.json
//!
//! # Preview a shoot label
//! folio label 2025-12-12
//!
//! # View configuration
//! folio config show
//! ```

use clap::{Parser, Subcommand};
use folio_core::config::expand_path;
use folio_core::Config;
use std::path::PathBuf;

mod cli;
mod logging;

/// Folio - cluster portfolio images into dated photo shoots.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Cluster an image listing into photo shoots
    Cluster(cli::cluster::ClusterArgs),

    /// Show the label and credits for a day
    Label(cli::label::LabelArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = load_config(&cli)?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Folio v{}", folio_core::VERSION);

    match cli.command {
        Commands::Cluster(args) => cli::cluster::execute(args, &config),
        Commands::Label(args) => cli::label::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args, &config, &config_path),
    }
}

/// Resolve the config file path and load it.
///
/// An explicit `--config` must load, unless the command only manages the
/// file itself. The default location falls back to defaults with a warning.
fn load_config(cli: &Cli) -> anyhow::Result<(Config, PathBuf)> {
    let manages_file = matches!(&cli.command, Commands::Config(args) if !args.shows_config());

    let Some(path) = cli.config.as_deref().map(expand_path) else {
        // Logging isn't initialized yet, so use eprintln for config warnings.
        let config = Config::load().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `folio config path`."
            );
            Config::default()
        });
        return Ok((config, Config::default_path()));
    };

    let config = if manages_file {
        Config::load_from(&path).unwrap_or_default()
    } else {
        Config::load_from(&path)?
    };
    Ok((config, path))
}
