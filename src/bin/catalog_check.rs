//! Validate the primary catalog and confirm every mirror matches it.
//!
//! Exits non-zero when the primary is malformed or a mirror has diverged or
//! cannot be read. Unknown category labels are reported as warnings only.

use anyhow::{Result, bail};
use clap::Parser;
use cssdict::{
    FsStore, MirrorState, Settings, SettingsOverrides, label_to_slug, load_catalog, logging,
    verify_mirrors,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "catalog-check")]
#[command(about = "Validate the property catalog and check its mirrors")]
struct Cli {
    #[arg(long)]
    root: Option<PathBuf>,
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long = "mirror")]
    mirrors: Vec<PathBuf>,
}

#[derive(Serialize)]
struct CheckReport {
    primary: PathBuf,
    records: usize,
    unknown_categories: Vec<String>,
    mirrors: Vec<cssdict::MirrorStatus>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(SettingsOverrides {
        root: cli.root,
        catalog: cli.catalog,
        mirrors: cli.mirrors,
        indent: None,
    })?;

    let catalog = load_catalog(&FsStore, &settings.mirrors.primary)?;
    let mut unknown_categories = Vec::new();
    for record in catalog.unknown_categories() {
        warn!(
            id = %record.id,
            category = %record.category,
            slug = label_to_slug(&record.category),
            "category label not in the slug table"
        );
        unknown_categories.push(record.id.0.clone());
    }

    let mirrors = verify_mirrors(&FsStore, &settings.mirrors)?;
    for status in &mirrors {
        if status.state == MirrorState::Equivalent {
            warn!(path = %status.path.display(), "mirror matches but is formatted differently");
        }
    }
    let failing: Vec<String> = mirrors
        .iter()
        .filter(|status| !status.is_consistent())
        .map(|status| status.path.display().to_string())
        .collect();

    let report = CheckReport {
        primary: settings.mirrors.primary.clone(),
        records: catalog.len(),
        unknown_categories,
        mirrors,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !failing.is_empty() {
        bail!("mirrors out of sync: {}", failing.join(", "));
    }
    Ok(())
}
