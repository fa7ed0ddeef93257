//! Pending catalog corrections.
//!
//! Each entry is one field replacement on one property. Add new fixes here
//! (or hand `catalog-patch` a patch file) instead of writing another script.

use crate::catalog::{EXAMPLES_FIELD, Example, FieldPatch};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Built-in fixes in the order they are applied.
pub fn pending_patches() -> Vec<FieldPatch> {
    vec![opacity_examples()]
}

/// Look up a built-in fix by property id.
pub fn find_pending(id: &str) -> Option<FieldPatch> {
    pending_patches()
        .into_iter()
        .find(|patch| patch.id.as_str() == id)
}

fn opacity_examples() -> FieldPatch {
    let examples = [
        Example::new(
            "opacity: 1;",
            "Fully opaque. The element is drawn as normal.",
        ),
        Example::new(
            "opacity: 0.5;",
            "Half transparent. The content behind shows through.",
        ),
        Example::new(
            "opacity: 0.1;",
            "Almost invisible. Only a faint trace of the element remains.",
        ),
    ];
    FieldPatch::new("opacity", EXAMPLES_FIELD, examples_value(&examples))
        .with_note("opacity examples used values outside the 0..1 range")
}

fn examples_value(examples: &[Example]) -> Value {
    Value::Array(
        examples
            .iter()
            .map(|example| {
                serde_json::json!({
                    "code": example.code,
                    "description": example.description,
                })
            })
            .collect(),
    )
}

/// Read a patch file: a JSON array of `{"id", "field", "value", "note"?}`.
pub fn load_patch_file(path: &Path) -> Result<Vec<FieldPatch>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading patch file {}", path.display()))?;
    let patches: Vec<FieldPatch> = serde_json::from_str(&data)
        .with_context(|| format!("parsing patch file {}", path.display()))?;
    if patches.is_empty() {
        bail!("patch file {} contains no patches", path.display());
    }
    Ok(patches)
}
