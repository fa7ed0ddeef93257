//! Runtime settings shared by the binaries.
//!
//! Each value comes from the command line, then the `CSSDICT_*` environment
//! variables, then the built-in defaults. Relative catalog and mirror paths
//! resolve against the site root.

use crate::catalog::{DEFAULT_CATALOG_PATH, DEFAULT_INDENT, DEFAULT_MIRROR_PATH, MirrorSet};
use crate::{find_site_root, split_list};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub const ENV_ROOT: &str = "CSSDICT_ROOT";
pub const ENV_CATALOG: &str = "CSSDICT_CATALOG";
pub const ENV_MIRRORS: &str = "CSSDICT_MIRRORS";
pub const ENV_INDENT: &str = "CSSDICT_INDENT";

const MAX_INDENT: usize = 8;

/// Values supplied on the command line. Anything left unset falls back to
/// the environment and then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub root: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub mirrors: Vec<PathBuf>,
    pub indent: Option<usize>,
}

/// Resolved locations and formatting for catalog tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub mirrors: MirrorSet,
    pub indent: usize,
}

impl Settings {
    /// Resolve settings from overrides and the process environment.
    ///
    /// Environment:
    /// - `CSSDICT_ROOT`: site root (otherwise the nearest ancestor holding
    ///   `data/properties.json`)
    /// - `CSSDICT_CATALOG`: primary catalog path
    /// - `CSSDICT_MIRRORS`: comma or space separated mirror paths
    /// - `CSSDICT_INDENT`: spaces per indent level (1..=8)
    pub fn resolve(overrides: SettingsOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok(), find_site_root)
    }

    pub fn resolve_with(
        overrides: SettingsOverrides,
        env: impl Fn(&str) -> Option<String>,
        discover_root: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let env_value = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let root = match overrides.root.or_else(|| env_value(ENV_ROOT).map(PathBuf::from)) {
            Some(root) => root,
            None => discover_root().context("locating site root")?,
        };

        let primary = overrides
            .catalog
            .or_else(|| env_value(ENV_CATALOG).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let mirrors = if !overrides.mirrors.is_empty() {
            overrides.mirrors
        } else if let Some(raw) = env_value(ENV_MIRRORS) {
            split_list(&raw).into_iter().map(PathBuf::from).collect()
        } else {
            vec![PathBuf::from(DEFAULT_MIRROR_PATH)]
        };

        let indent = match overrides.indent {
            Some(indent) => indent,
            None => match env_value(ENV_INDENT) {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("{ENV_INDENT} must be a number, got '{raw}'"))?,
                None => DEFAULT_INDENT,
            },
        };
        if !(1..=MAX_INDENT).contains(&indent) {
            bail!("indent must be between 1 and {MAX_INDENT}, got {indent}");
        }

        let primary = resolve_against(&root, &primary);
        let mirrors: Vec<PathBuf> = mirrors
            .iter()
            .map(|mirror| resolve_against(&root, mirror))
            .collect();
        if mirrors.iter().any(|mirror| *mirror == primary) {
            bail!(
                "mirror list includes the primary catalog {}",
                primary.display()
            );
        }

        Ok(Self {
            root,
            mirrors: MirrorSet::new(primary, mirrors),
            indent,
        })
    }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
