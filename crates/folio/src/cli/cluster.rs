//! The `folio cluster` command.

use chrono::Utc;
use clap::{Args, ValueEnum};
use folio_core::config::expand_path;
use folio_core::output::OutputFormat as CoreOutputFormat;
use folio_core::source::load_snapshot;
use folio_core::{Config, ShootClusterer, ShootWriter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON array of shoots
    Json,
    /// One shoot per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Arguments for the `cluster` command.
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Listing snapshot (JSON) to cluster
    #[arg(required = true)]
    pub input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the config's output.format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Zone for naive capture timestamps ("local", "UTC", "+10:00", "Pacific/Honolulu")
    #[arg(long)]
    pub timezone: Option<String>,
}

/// Execute the cluster command.
pub fn execute(args: ClusterArgs, config: &Config) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(timezone) = args.timezone {
        config.gallery.timezone = timezone;
    }
    let clusterer = ShootClusterer::from_config(&config)?;

    let input = expand_path(&args.input);
    let images = load_snapshot(&input, &config.source)?;
    tracing::info!("Loaded {} images from {}", images.len(), input.display());

    let (shoots, stats) = clusterer.cluster_with_stats(&images, Utc::now());
    if stats.catch_all {
        tracing::warn!(
            "All {} images fall on excluded days; emitting a single \"All Photos\" shoot",
            stats.input
        );
    }
    tracing::info!(
        "Clustered into {} shoots ({} dated, {} undated, {} excluded)",
        stats.shoots,
        stats.dated,
        stats.undated,
        stats.excluded
    );

    let format = resolve_format(args.format, &config);
    let pretty = args.pretty || config.output.pretty;
    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = ShootWriter::new(sink, format, pretty);
    writer.write_shoots(&shoots)?;
    writer.flush()?;

    if let Some(path) = &args.output {
        tracing::info!(
            "Wrote {} shoots ({} images) to {}",
            writer.shoots_written(),
            writer.images_written(),
            path.display()
        );
    }

    Ok(())
}

/// The CLI flag wins; otherwise the configured format, defaulting to JSON.
fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> CoreOutputFormat {
    flag.map(CoreOutputFormat::from)
        .or_else(|| CoreOutputFormat::parse(&config.output.format))
        .unwrap_or_default()
}
