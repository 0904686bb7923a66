//! Person records and custom-field enrichment.
//!
//! OSDI person payloads have no fixed schema across deployments, so a raw
//! person is kept as an open JSON object and enrichment is a shallow merge.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A person record exactly as the remote returned it.
pub type OsdiPerson = Map<String, Value>;

/// A key/value pair the caller wants attached to every imported person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomFieldEntry {
    pub key: String,
    pub value: String,
}

impl CustomFieldEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A raw person merged with the caller's custom fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichedPerson(Map<String, Value>);

impl EnrichedPerson {
    /// Looks up a field on the merged record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Convenience for fields that hold strings.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<OsdiPerson> for EnrichedPerson {
    fn from(raw: OsdiPerson) -> Self {
        Self(raw)
    }
}

/// Rejects entries with an empty key. Duplicates are allowed.
pub fn validate_custom_fields(fields: &[CustomFieldEntry]) -> Result<()> {
    match fields.iter().position(|f| f.key.trim().is_empty()) {
        Some(index) => Err(Error::EmptyFieldKey { index }),
        None => Ok(()),
    }
}

/// Merges `extra` into `raw`.
///
/// Entries are applied in order, so an extra field overrides a field already
/// on the record and the last of several duplicate keys wins.
#[must_use]
pub fn enrich(mut raw: OsdiPerson, extra: &[CustomFieldEntry]) -> EnrichedPerson {
    for field in extra {
        raw.insert(field.key.clone(), Value::String(field.value.clone()));
    }
    EnrichedPerson(raw)
}
