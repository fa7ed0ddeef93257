// Patch protocol guard rails: load, patch, and write across mirrors on disk.
mod support;

use anyhow::Result;
use cssdict::fixes::{find_pending, pending_patches};
use cssdict::{
    Catalog, FieldPatch, FsStore, MirrorSet, PatchOutcome, PatchRunner, load_catalog,
    verify_mirrors,
};
use serde_json::{Value, json};
use std::fs;
use support::{MIRROR, PRIMARY, TempSite, pretty, sample_catalog};

fn mirror_set(site: &TempSite) -> MirrorSet {
    MirrorSet::new(site.path(PRIMARY), vec![site.path(MIRROR)])
}

fn entry_text(catalog: &Value, index: usize) -> String {
    serde_json::to_string(&catalog[index]).unwrap()
}

#[test]
fn opacity_fix_rewrites_only_the_opacity_record() -> Result<()> {
    let site = TempSite::with_catalog(&sample_catalog())?;
    let mut runner = PatchRunner::new(FsStore, mirror_set(&site));
    let report = runner.run(&[find_pending("opacity").expect("opacity fix")])?;
    assert_eq!(report.results[0].outcome, PatchOutcome::Applied);

    let before = sample_catalog();
    let after: Value = serde_json::from_str(&site.read(PRIMARY)?)?;
    assert_eq!(entry_text(&after, 0), entry_text(&before, 0));
    assert_eq!(entry_text(&after, 2), entry_text(&before, 2));

    let codes: Vec<_> = after[1]["examples"]
        .as_array()
        .unwrap()
        .iter()
        .map(|example| example["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["opacity: 1;", "opacity: 0.5;", "opacity: 0.1;"]);
    assert_eq!(after[1]["name"], json!("opacity"));

    // Untouched records keep their exact on-disk text.
    let original = pretty(&before);
    let written = site.read(PRIMARY)?;
    let color_block = &original[..original.find("  {\n    \"id\": \"opacity\"").unwrap()];
    assert!(written.starts_with(color_block));
    let display_block = &original[original.find("  {\n    \"id\": \"display\"").unwrap()..];
    assert!(written.ends_with(display_block));
    Ok(())
}

#[test]
fn primary_and_mirror_match_after_patch() -> Result<()> {
    let site = TempSite::with_catalog(&sample_catalog())?;
    site.write(MIRROR, "[]\n")?;
    let set = mirror_set(&site);
    let mut runner = PatchRunner::new(FsStore, set.clone());
    let report = runner.run(&pending_patches())?;
    assert_eq!(report.written, vec![site.path(PRIMARY), site.path(MIRROR)]);

    assert_eq!(site.read(PRIMARY)?, site.read(MIRROR)?);
    let primary = load_catalog(&FsStore, &set.primary)?;
    let mirror = load_catalog(&FsStore, &set.mirrors[0])?;
    assert_eq!(primary, mirror);
    assert!(verify_mirrors(&FsStore, &set)?.iter().all(|s| s.is_consistent()));
    Ok(())
}

#[test]
fn applying_twice_matches_applying_once() -> Result<()> {
    let site = TempSite::with_catalog(&sample_catalog())?;
    let patches = pending_patches();
    let mut runner = PatchRunner::new(FsStore, mirror_set(&site));

    runner.run(&patches)?;
    let once = site.read(PRIMARY)?;
    let report = runner.run(&patches)?;
    let twice = site.read(PRIMARY)?;

    assert_eq!(once, twice);
    assert!(
        report
            .results
            .iter()
            .all(|r| r.outcome == PatchOutcome::Unchanged)
    );
    Ok(())
}

#[test]
fn missing_record_leaves_every_file_untouched() -> Result<()> {
    let catalog = json!([{"id": "color", "category": "typography", "examples": []}]);
    let site = TempSite::with_catalog(&catalog)?;
    // Compact on purpose: any rewrite would reformat it.
    let primary_before = serde_json::to_string(&catalog)?;
    site.write(PRIMARY, &primary_before)?;
    site.write(MIRROR, "[]")?;

    let mut runner = PatchRunner::new(FsStore, mirror_set(&site));
    let report = runner.run(&pending_patches())?;

    assert_eq!(report.results[0].outcome, PatchOutcome::NotFound);
    assert!(report.written.is_empty());
    assert_eq!(site.read(PRIMARY)?, primary_before);
    assert_eq!(site.read(MIRROR)?, "[]");
    Ok(())
}

#[test]
fn missing_mirror_is_created_on_write() -> Result<()> {
    let site = TempSite::with_catalog(&sample_catalog())?;
    let nested = site.path("out/static/data/properties.json");
    let set = MirrorSet::new(site.path(PRIMARY), vec![site.path(MIRROR), nested.clone()]);
    PatchRunner::new(FsStore, set).run(&pending_patches())?;
    assert_eq!(fs::read_to_string(nested)?, site.read(PRIMARY)?);
    Ok(())
}

#[test]
fn malformed_primary_writes_nothing() -> Result<()> {
    let site = TempSite::with_catalog(&sample_catalog())?;
    site.write(PRIMARY, "[{\"id\": \"opacity\"}]")?;
    let mut runner = PatchRunner::new(FsStore, mirror_set(&site));
    let err = runner.run(&pending_patches()).unwrap_err();
    assert!(err.to_string().contains("malformed catalog"), "{err}");
    assert!(!site.path(MIRROR).exists());
    Ok(())
}

#[test]
fn custom_field_patch_preserves_order() -> Result<()> {
    let site = TempSite::with_catalog(&sample_catalog())?;
    let patch = FieldPatch::new("display", "category", json!("flexbox"));
    PatchRunner::new(FsStore, mirror_set(&site)).run(&[patch])?;

    let catalog = Catalog::from_json(&site.read(MIRROR)?)?;
    let ids: Vec<_> = catalog.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["color", "opacity", "display"]);
    assert_eq!(catalog.record("display").unwrap().category, "flexbox");
    let keys: Vec<_> = catalog.entry("display").unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["id", "name", "category", "syntax", "examples"]);
    Ok(())
}
