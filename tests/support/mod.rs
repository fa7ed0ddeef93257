#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PRIMARY: &str = "data/properties.json";
pub const MIRROR: &str = "public/data/properties.json";

/// A throwaway site checkout with a seeded `data/properties.json`.
pub struct TempSite {
    pub dir: TempDir,
}

impl TempSite {
    pub fn with_catalog(catalog: &Value) -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate temp site")?;
        fs::write(dir.path().join("package.json"), "{\"name\": \"css-dictionary\"}\n")?;
        let site = Self { dir };
        site.write(PRIMARY, &pretty(catalog))?;
        Ok(site)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path(relative);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }
}

pub fn pretty(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).expect("fixture serializes");
    text.push('\n');
    text
}

/// Three records shaped like the site's data file; opacity carries the
/// broken examples the built-in fix replaces.
pub fn sample_catalog() -> Value {
    json!([
        {
            "id": "color",
            "name": "color",
            "category": "typography",
            "examples": [
                {"code": "color: tomato;", "description": "Named color."}
            ]
        },
        {
            "id": "opacity",
            "name": "opacity",
            "category": "visual effects",
            "examples": [
                {"code": "opacity: 100;", "description": "Out of range."}
            ]
        },
        {
            "id": "display",
            "name": "display",
            "category": "layout & positioning",
            "syntax": "display: <display-outside> || <display-inside>",
            "examples": []
        }
    ])
}

pub fn run_bin(path: &str, site: &TempSite, args: &[&str]) -> Result<Output> {
    Command::new(path)
        .args(args)
        .current_dir(site.root())
        .env("CSSDICT_ROOT", site.root())
        .env_remove("CSSDICT_CATALOG")
        .env_remove("CSSDICT_MIRRORS")
        .env_remove("CSSDICT_INDENT")
        .env("RUST_LOG", "warn")
        .output()
        .with_context(|| format!("failed to run {path}"))
}
