//! Error types shared by the catalog and category modules.
//!
//! A missing target record is not an error: patches report it through
//! `PatchOutcome::NotFound` and the runner skips the write.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("reading catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed catalog: {0}")]
    Malformed(String),

    #[error("duplicate property id {0}")]
    DuplicateId(String),

    #[error("serializing catalog")]
    Serialize(#[source] serde_json::Error),

    #[error("writing catalog {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("field '{0}' cannot be patched")]
    ImmutableField(String),

    #[error("patch for {id} names an empty field")]
    EmptyField { id: String },

    #[error("patching {field} on {id} produced an invalid record: {message}")]
    InvalidValue {
        id: String,
        field: String,
        message: String,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlugTableError {
    #[error("label '{0}' appears more than once")]
    DuplicateLabel(String),

    #[error("slug '{0}' appears more than once")]
    DuplicateSlug(String),

    #[error("slug '{0}' is not lowercase ASCII letters, digits and hyphens")]
    InvalidSlug(String),

    #[error("table has no row for the default '{label}' -> '{slug}'")]
    MissingDefault { label: String, slug: String },
}
