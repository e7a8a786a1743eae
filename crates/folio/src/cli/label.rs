//! The `folio label` command: preview how a day renders in the gallery.

use clap::Args;
use folio_core::timestamp::is_valid_day_key;
use folio_core::{Config, PhotographerCredit, ShootClusterer};
use serde::Serialize;

/// Arguments for the `label` command.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Day key in YYYY-MM-DD form
    pub day: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// What the gallery shows for one day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DayPreview<'a> {
    day_key: &'a str,
    date_label: String,
    excluded: bool,
    photographers: &'a [PhotographerCredit],
}

/// Execute the label command.
pub fn execute(args: LabelArgs, config: &Config) -> anyhow::Result<()> {
    if !is_valid_day_key(&args.day) {
        anyhow::bail!("'{}' is not a day key; expected YYYY-MM-DD", args.day);
    }

    let clusterer = ShootClusterer::from_config(config)?;
    let preview = preview(&clusterer, &args.day);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    println!("{}", preview.date_label);
    if preview.excluded {
        println!("  (excluded from the gallery)");
    }
    for credit in preview.photographers {
        match &credit.url {
            Some(url) => println!("  Photographer: {} ({})", credit.name, url),
            None => println!("  Photographer: {}", credit.name),
        }
    }

    Ok(())
}

fn preview<'a>(clusterer: &'a ShootClusterer, day: &'a str) -> DayPreview<'a> {
    let policy = clusterer.policy();
    DayPreview {
        day_key: day,
        date_label: policy.labels.format_label(day),
        excluded: policy.is_excluded(day),
        photographers: policy.credits.credits_for(day),
    }
}
