//! Identifier index over catalog records.
//!
//! Record ids are the lookup key for patches, so the index refuses blank and
//! duplicate ids rather than letting a patch hit the wrong record.

use crate::catalog::PropertyRecord;
use crate::error::CatalogError;
use std::collections::BTreeMap;

pub(crate) fn build_index(records: &[PropertyRecord]) -> Result<BTreeMap<String, usize>, CatalogError> {
    let mut map = BTreeMap::new();
    for (position, record) in records.iter().enumerate() {
        if record.id.0.trim().is_empty() {
            return Err(CatalogError::Malformed(format!(
                "record at position {position} has a blank id"
            )));
        }
        if map.insert(record.id.0.clone(), position).is_some() {
            return Err(CatalogError::DuplicateId(record.id.0.clone()));
        }
    }
    Ok(map)
}
