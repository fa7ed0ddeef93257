//! Catalog persistence: the storage seam, the mirror set, and the
//! load/write/verify helpers built on them.
//!
//! Writes are whole-file replacements. There is no atomicity across files:
//! if a run stops after the primary is written, the remaining mirrors stay
//! stale until the next successful run.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub trait CatalogStore {
    fn read(&self, path: &Path) -> io::Result<String>;
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Filesystem-backed store.
///
/// Each write goes to a temp file beside the destination which is then
/// renamed over it, so readers never see a half-written catalog. The rename
/// replaces the path itself: a mirror that is a symlink becomes a regular
/// file holding the new catalog, and the link target is left as it was.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl CatalogStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        match fs::metadata(path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
            Err(_) => set_default_permissions(tmp.as_file())?,
        }
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

// NamedTempFile is created 0600; published copies must stay world-readable.
#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

/// In-memory store for tests and previews. Records the order of writes and
/// can be told to fail writes to one path.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
    writes: Vec<PathBuf>,
    fail_writes_to: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn fail_writes_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_writes_to = Some(path.into());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> &[PathBuf] {
        &self.writes
    }
}

impl CatalogStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not in memory store", path.display()),
            )
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if self.fail_writes_to.as_deref() == Some(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {} refused", path.display()),
            ));
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        self.writes.push(path.to_path_buf());
        Ok(())
    }
}

/// Primary catalog plus the copies that must match it after every patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorSet {
    pub primary: PathBuf,
    pub mirrors: Vec<PathBuf>,
}

impl MirrorSet {
    pub fn new(primary: impl Into<PathBuf>, mirrors: Vec<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            mirrors,
        }
    }

    /// Primary first, then mirrors in declared order.
    pub fn locations(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.primary.as_path()).chain(self.mirrors.iter().map(PathBuf::as_path))
    }
}

pub fn load_catalog<S: CatalogStore + ?Sized>(
    store: &S,
    path: &Path,
) -> Result<Catalog, CatalogError> {
    let text = read_text(store, path)?;
    let catalog = parse_at(&text, path)?;
    debug!(path = %path.display(), records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn read_text<S: CatalogStore + ?Sized>(store: &S, path: &Path) -> Result<String, CatalogError> {
    store.read(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_at(text: &str, path: &Path) -> Result<Catalog, CatalogError> {
    Catalog::from_json(text).map_err(|err| match err {
        CatalogError::Malformed(message) => {
            CatalogError::Malformed(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Serialize once and write to the primary, then every mirror. Stops at the
/// first failure; locations already written are not rolled back.
pub fn write_all<S: CatalogStore + ?Sized>(
    store: &mut S,
    set: &MirrorSet,
    catalog: &Catalog,
    indent: usize,
) -> Result<Vec<PathBuf>, CatalogError> {
    let text = catalog.to_json(indent)?;
    let mut written = Vec::new();
    for location in set.locations() {
        store
            .write(location, &text)
            .map_err(|source| CatalogError::Write {
                path: location.to_path_buf(),
                source,
            })?;
        info!(path = %location.display(), "catalog written");
        written.push(location.to_path_buf());
    }
    Ok(written)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum MirrorState {
    /// Byte-for-byte identical to the primary.
    InSync,
    /// Same records, different formatting.
    Equivalent,
    Diverged,
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorStatus {
    pub path: PathBuf,
    pub state: MirrorState,
}

impl MirrorStatus {
    pub fn is_consistent(&self) -> bool {
        matches!(self.state, MirrorState::InSync | MirrorState::Equivalent)
    }
}

/// Compare every mirror against the primary. The primary must load; a
/// mirror that fails to load is reported, not raised.
pub fn verify_mirrors<S: CatalogStore + ?Sized>(
    store: &S,
    set: &MirrorSet,
) -> Result<Vec<MirrorStatus>, CatalogError> {
    let primary_text = read_text(store, &set.primary)?;
    let primary = parse_at(&primary_text, &set.primary)?;

    let mut statuses = Vec::with_capacity(set.mirrors.len());
    for mirror in &set.mirrors {
        let state = match store.read(mirror) {
            Err(err) => MirrorState::Unreadable(err.to_string()),
            Ok(text) if text == primary_text => MirrorState::InSync,
            Ok(text) => match Catalog::from_json(&text) {
                Ok(copy) if copy == primary => MirrorState::Equivalent,
                Ok(_) => MirrorState::Diverged,
                Err(err) => MirrorState::Unreadable(err.to_string()),
            },
        };
        statuses.push(MirrorStatus {
            path: mirror.clone(),
            state,
        });
    }
    Ok(statuses)
}
