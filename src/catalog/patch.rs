//! Identifier-scoped field patches.
//!
//! `apply_field_patch` is pure: it returns a new catalog and never touches
//! storage. `PatchRunner` wraps it with the load/write protocol: load the
//! primary, apply patches in order, then write the primary and every mirror.
//! When none of the patches finds its record the runner writes nothing.

use crate::catalog::model::ID_FIELD;
use crate::catalog::store::{CatalogStore, MirrorSet, load_catalog, write_all};
use crate::catalog::{Catalog, PropertyId};
use crate::error::PatchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default indent width for serialized catalogs.
pub const DEFAULT_INDENT: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldPatch {
    pub id: PropertyId,
    pub field: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FieldPatch {
    pub fn new(id: impl Into<String>, field: impl Into<String>, value: Value) -> Self {
        Self {
            id: PropertyId(id.into()),
            field: field.into(),
            value,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn apply(&self, catalog: &Catalog) -> Result<(Catalog, PatchOutcome), PatchError> {
        apply_field_patch(catalog, &self.id, &self.field, &self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    Applied,
    /// Record found; the field already held the value.
    Unchanged,
    NotFound,
}

impl PatchOutcome {
    pub fn matched(self) -> bool {
        !matches!(self, PatchOutcome::NotFound)
    }
}

/// Replace `field` on the record with `id`, returning the new catalog.
///
/// Every other record and field is carried over untouched and in order. A
/// missing record is not an error; the catalog comes back unchanged with
/// `PatchOutcome::NotFound`.
pub fn apply_field_patch(
    catalog: &Catalog,
    id: &PropertyId,
    field: &str,
    value: &Value,
) -> Result<(Catalog, PatchOutcome), PatchError> {
    if field.trim().is_empty() {
        return Err(PatchError::EmptyField { id: id.0.clone() });
    }
    if field == ID_FIELD {
        return Err(PatchError::ImmutableField(field.to_string()));
    }

    let Some(position) = catalog.position(id.as_str()) else {
        return Ok((catalog.clone(), PatchOutcome::NotFound));
    };
    if catalog.entries()[position].get(field) == Some(value) {
        return Ok((catalog.clone(), PatchOutcome::Unchanged));
    }

    let mut entries = catalog.entries().to_vec();
    entries[position].insert(field.to_string(), value.clone());
    let patched = Catalog::from_entries(entries).map_err(|err| PatchError::InvalidValue {
        id: id.0.clone(),
        field: field.to_string(),
        message: err.to_string(),
    })?;
    Ok((patched, PatchOutcome::Applied))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatchResult {
    pub id: PropertyId,
    pub field: String,
    pub outcome: PatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatchReport {
    pub primary: PathBuf,
    pub dry_run: bool,
    pub results: Vec<PatchResult>,
    /// Locations rewritten, in write order. Empty for dry runs and when no
    /// patch matched.
    pub written: Vec<PathBuf>,
}

impl PatchReport {
    pub fn matched(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.matched()).count()
    }

    pub fn applied(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == PatchOutcome::Applied)
            .count()
    }
}

/// Runs a batch of patches against one mirror set through an injected store.
pub struct PatchRunner<S> {
    store: S,
    mirrors: MirrorSet,
    indent: usize,
    dry_run: bool,
}

impl<S: CatalogStore> PatchRunner<S> {
    pub fn new(store: S, mirrors: MirrorSet) -> Self {
        Self {
            store,
            mirrors,
            indent: DEFAULT_INDENT,
            dry_run: false,
        }
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn run(&mut self, patches: &[FieldPatch]) -> Result<PatchReport, PatchError> {
        let mut catalog = load_catalog(&self.store, &self.mirrors.primary)?;
        let mut results = Vec::with_capacity(patches.len());

        for patch in patches {
            let (next, outcome) = patch.apply(&catalog)?;
            match outcome {
                PatchOutcome::Applied => {
                    info!(id = %patch.id, field = %patch.field, "patch applied")
                }
                PatchOutcome::Unchanged => {
                    info!(id = %patch.id, field = %patch.field, "field already up to date")
                }
                PatchOutcome::NotFound => {
                    warn!(id = %patch.id, field = %patch.field, "no property record with this id; skipping")
                }
            }
            catalog = next;
            results.push(PatchResult {
                id: patch.id.clone(),
                field: patch.field.clone(),
                outcome,
                note: patch.note.clone(),
            });
        }

        let any_matched = results.iter().any(|r| r.outcome.matched());
        let written = if self.dry_run {
            info!("dry run; catalog files left untouched");
            Vec::new()
        } else if !any_matched {
            info!("no patch matched a record; catalog files left untouched");
            Vec::new()
        } else {
            write_all(&mut self.store, &self.mirrors, &catalog, self.indent)?
        };

        Ok(PatchReport {
            primary: self.mirrors.primary.clone(),
            dry_run: self.dry_run,
            results,
            written,
        })
    }
}
