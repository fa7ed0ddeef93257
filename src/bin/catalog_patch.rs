//! Apply pending property fixes to the catalog and its mirrors.
//!
//! Usage:
//!   catalog-patch                          # every built-in fix
//!   catalog-patch --only opacity --dry-run
//!   catalog-patch --patch-file fixes/gap.json --mirror out/properties.json
//!
//! Prints a JSON report on stdout. When no patch finds its record, no file
//! is rewritten.

use anyhow::{Context, Result, bail};
use clap::Parser;
use cssdict::fixes::{load_patch_file, pending_patches};
use cssdict::{FieldPatch, FsStore, PatchRunner, Settings, SettingsOverrides, logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog-patch")]
#[command(about = "Apply id-scoped field fixes to the property catalog and its mirrors")]
struct Cli {
    /// Site root; relative catalog and mirror paths resolve against it.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Primary catalog path.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Mirror path (repeatable). Replaces the default mirror list.
    #[arg(long = "mirror")]
    mirrors: Vec<PathBuf>,
    /// Restrict built-in fixes to these property ids (repeatable).
    #[arg(long = "only", conflicts_with = "patch_file")]
    only: Vec<String>,
    /// Apply patches from a JSON file instead of the built-in list.
    #[arg(long)]
    patch_file: Option<PathBuf>,
    /// Report what would change without writing.
    #[arg(long)]
    dry_run: bool,
    /// Spaces per indent level in the written JSON.
    #[arg(long)]
    indent: Option<usize>,
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
    let patches = select_patches(&cli)?;

    let settings = Settings::resolve(SettingsOverrides {
        root: cli.root,
        catalog: cli.catalog,
        mirrors: cli.mirrors,
        indent: cli.indent,
    })?;
    info!(
        primary = %settings.mirrors.primary.display(),
        mirrors = settings.mirrors.mirrors.len(),
        patches = patches.len(),
        "applying catalog patches"
    );

    let mut runner = PatchRunner::new(FsStore, settings.mirrors)
        .indent(settings.indent)
        .dry_run(cli.dry_run);
    let report = runner.run(&patches).context("patching catalog")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn select_patches(cli: &Cli) -> Result<Vec<FieldPatch>> {
    if let Some(path) = &cli.patch_file {
        return load_patch_file(path);
    }

    let pending = pending_patches();
    if cli.only.is_empty() {
        return Ok(pending);
    }
    for id in &cli.only {
        if !pending.iter().any(|patch| patch.id.as_str() == id) {
            bail!("no built-in fix for property '{id}'");
        }
    }
    Ok(pending
        .into_iter()
        .filter(|patch| cli.only.iter().any(|id| id == patch.id.as_str()))
        .collect())
}
