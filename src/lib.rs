use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod category;
pub mod config;
pub mod error;
pub mod fixes;
pub mod logging;

pub use catalog::{
    Catalog, CatalogStore, Example, FieldPatch, FsStore, MemoryStore, MirrorSet, MirrorState,
    MirrorStatus, PatchOutcome, PatchReport, PatchResult, PatchRunner, PropertyId,
    PropertyRecord, apply_field_patch, load_catalog, verify_mirrors, write_all,
};
pub use category::{
    CATEGORY_TABLE, DEFAULT_LABEL, DEFAULT_SLUG, SlugTable, all_slugs, is_known_label,
    is_known_slug, is_valid_slug, label_to_slug, slug_to_label,
};
pub use config::{Settings, SettingsOverrides};
pub use error::{CatalogError, PatchError, SlugTableError};

const ROOT_SENTINEL: &str = catalog::DEFAULT_CATALOG_PATH;
const ROOT_ENV: &str = "CSSDICT_ROOT";

fn is_site_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file()
}

fn site_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.is_dir() {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_site_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the website checkout that owns the property catalog.
///
/// `CSSDICT_ROOT` wins when it names a directory. Otherwise the nearest
/// ancestor holding `data/properties.json` is used, starting from the
/// current directory and then from the executable. The build-time
/// `CSSDICT_ROOT_HINT` is the last resort.
pub fn find_site_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = site_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("CSSDICT_ROOT_HINT") {
        if let Some(root) = site_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate the site root. Set {ROOT_ENV} or pass --root.");
}

/// Split a comma- or whitespace-separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
