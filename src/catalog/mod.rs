//! Property catalog wiring.
//!
//! The catalog is the JSON array of CSS property records the site renders
//! (`data/properties.json`, mirrored under `public/`). This module loads and
//! validates it, applies id-scoped field patches, and writes the result to
//! the primary file and every mirror.

mod index;
pub mod model;
pub mod patch;
mod schema;
pub mod store;

pub use model::{Catalog, EXAMPLES_FIELD, Example, ID_FIELD, PropertyId, PropertyRecord};
pub use patch::{
    DEFAULT_INDENT, FieldPatch, PatchOutcome, PatchReport, PatchResult, PatchRunner,
    apply_field_patch,
};
pub use store::{
    CatalogStore, FsStore, MemoryStore, MirrorSet, MirrorState, MirrorStatus, load_catalog,
    verify_mirrors, write_all,
};

/// Default primary catalog, relative to the site root.
pub const DEFAULT_CATALOG_PATH: &str = "data/properties.json";
/// Default published copy, relative to the site root.
pub const DEFAULT_MIRROR_PATH: &str = "public/data/properties.json";
