//! Category slug helper for static route generation.
//!
//! Usage:
//!   category-slugs                 # every slug, one per line, table order
//!   category-slugs --json          # same, as a JSON array
//!   category-slugs --label "grid"  # label -> slug
//!   category-slugs --slug grid     # slug -> label
//!
//! Unknown inputs print the fallback value; add `--strict` to fail instead.

use anyhow::{Result, bail};
use clap::Parser;
use cssdict::{all_slugs, is_known_label, is_known_slug, label_to_slug, slug_to_label};

#[derive(Parser, Debug)]
#[command(name = "category-slugs")]
#[command(about = "List category slugs or translate between labels and slugs")]
struct Cli {
    /// Translate a category label to its slug.
    #[arg(long, conflicts_with = "slug")]
    label: Option<String>,
    /// Translate a slug back to its category label.
    #[arg(long)]
    slug: Option<String>,
    /// Emit JSON instead of plain lines.
    #[arg(long)]
    json: bool,
    /// Fail on labels or slugs that are not in the table.
    #[arg(long)]
    strict: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let single = match (&cli.label, &cli.slug) {
        (Some(label), _) => {
            if cli.strict && !is_known_label(label) {
                bail!("unknown category label '{label}'");
            }
            Some(label_to_slug(label))
        }
        (None, Some(slug)) => {
            if cli.strict && !is_known_slug(slug) {
                bail!("unknown category slug '{slug}'");
            }
            Some(slug_to_label(slug))
        }
        (None, None) => None,
    };

    match single {
        Some(value) if cli.json => println!("{}", serde_json::to_string(value)?),
        Some(value) => println!("{value}"),
        None if cli.json => println!("{}", serde_json::to_string(&all_slugs())?),
        None => {
            for slug in all_slugs() {
                println!("{slug}");
            }
        }
    }
    Ok(())
}
