//! Bundled JSON Schema for the property catalog.
//!
//! The schema catches structural problems (wrong top-level type, missing
//! `id`, examples without `code`) with a pointer to the offending entry
//! before the typed decode runs.

use crate::error::CatalogError;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const CATALOG_SCHEMA: &str = include_str!("../../schema/property_catalog.schema.json");

// Compiled on first use and shared for the life of the process. A broken
// bundled schema is cached as its error message so every load reports it.
fn compiled_schema() -> Result<&'static JSONSchema, CatalogError> {
    static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    COMPILED
        .get_or_init(|| {
            let schema: Value = serde_json::from_str(CATALOG_SCHEMA)
                .map_err(|err| format!("bundled catalog schema is not JSON: {err}"))?;
            JSONSchema::compile(&schema)
                .map_err(|err| format!("compiling bundled catalog schema: {err}"))
        })
        .as_ref()
        .map_err(|message| CatalogError::Malformed(message.clone()))
}

pub(crate) fn validate_catalog_value(value: &Value) -> Result<(), CatalogError> {
    let compiled = compiled_schema()?;
    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| format!("at '{}': {err}", err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::Malformed(details));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_catalog() {
        let value = json!([
            {"id": "opacity", "category": "visual effects"},
            {"id": "color", "category": "typography", "examples": [
                {"code": "color: red;", "description": "red text"}
            ]}
        ]);
        assert!(validate_catalog_value(&value).is_ok());
    }

    #[test]
    fn schema_is_compiled_once() {
        let first = compiled_schema().unwrap();
        let second = compiled_schema().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(validate_catalog_value(&json!([{"id": "gap", "category": "grid"}])).is_ok());
        assert!(validate_catalog_value(&json!([{"category": "grid"}])).is_err());
    }

    #[test]
    fn rejects_object_at_top_level() {
        let err = validate_catalog_value(&json!({"properties": []})).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn reports_pointer_for_bad_example() {
        let value = json!([
            {"id": "opacity", "category": "visual effects", "examples": [{"code": 1}]}
        ]);
        let err = validate_catalog_value(&value).unwrap_err();
        assert!(err.to_string().contains("/0/examples/0"), "{err}");
    }
}
