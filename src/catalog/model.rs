//! Typed view of the property catalog.
//!
//! A `Catalog` keeps each record's raw JSON object next to its decoded
//! `PropertyRecord`, so serializing an untouched catalog reproduces the
//! source key order. Ids are indexed on load and must be unique.

use crate::catalog::index::build_index;
use crate::catalog::schema::validate_catalog_value;
use crate::category::is_known_label;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// JSON key holding the record identifier.
pub const ID_FIELD: &str = "id";
/// JSON key holding the example list.
pub const EXAMPLES_FIELD: &str = "examples";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub code: String,
    pub description: String,
}

impl Example {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Typed view of one catalog entry. Fields the tooling does not interpret
/// (names, syntax, browser notes, ...) are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub category: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertyRecord {
    fn from_entry(entry: &Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(entry.clone()))
    }
}

/// Ordered property records as stored on disk.
///
/// The raw JSON objects are kept next to their typed views so a record that
/// is not patched serializes back with its original key order.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Map<String, Value>>,
    records: Vec<PropertyRecord>,
    by_id: BTreeMap<String, usize>,
}

impl Catalog {
    /// Parse a serialized catalog: a JSON array of property objects.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| CatalogError::Malformed(format!("not valid JSON: {err}")))?;
        let Value::Array(items) = value else {
            return Err(CatalogError::Malformed(
                "expected a JSON array of property records".to_string(),
            ));
        };

        let mut entries = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(entry) => entries.push(entry),
                other => {
                    return Err(CatalogError::Malformed(format!(
                        "entry {position} is {}, expected an object",
                        json_kind(&other)
                    )));
                }
            }
        }
        Self::from_entries(entries)
    }

    /// Validate raw entries and build the typed view and id index.
    pub fn from_entries(entries: Vec<Map<String, Value>>) -> Result<Self, CatalogError> {
        let as_value = Value::Array(entries.iter().cloned().map(Value::Object).collect());
        validate_catalog_value(&as_value)?;

        let records = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                PropertyRecord::from_entry(entry).map_err(|err| {
                    CatalogError::Malformed(format!("entry {position}: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let by_id = build_index(&records)?;

        Ok(Self {
            entries,
            records,
            by_id,
        })
    }

    /// Pretty JSON with `indent` spaces per level and a trailing newline.
    pub fn to_json(&self, indent: usize) -> Result<String, CatalogError> {
        let pad = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(pad.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries
            .serialize(&mut ser)
            .map_err(CatalogError::Serialize)?;
        buf.push(b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn entries(&self) -> &[Map<String, Value>] {
        &self.entries
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn record(&self, id: &str) -> Option<&PropertyRecord> {
        self.position(id).map(|position| &self.records[position])
    }

    pub fn entry(&self, id: &str) -> Option<&Map<String, Value>> {
        self.position(id).map(|position| &self.entries[position])
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &PropertyId> {
        self.records.iter().map(|record| &record.id)
    }

    /// Records whose category label has no slug of its own; they route
    /// under the fallback category.
    pub fn unknown_categories(&self) -> Vec<&PropertyRecord> {
        self.records
            .iter()
            .filter(|record| !is_known_label(&record.category))
            .collect()
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
