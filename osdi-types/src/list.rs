//! OSDI list summaries.

use serde::{Deserialize, Deserializer, Serialize};

/// A list summary as exposed by the remote catalog.
///
/// Remote deployments differ in which fields they fill in, so every field
/// falls back to its empty value when absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsdiList {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub identifiers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_items: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Narrows a list catalog for the selection dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Case-insensitive text matched against name and summary.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
        }
    }

    /// Whether `list` passes the filter. A blank search matches everything.
    #[must_use]
    pub fn matches(&self, list: &OsdiList) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        list.name.to_lowercase().contains(&needle) || list.summary.to_lowercase().contains(&needle)
    }

    /// Keeps the matching lists, preserving their order.
    #[must_use]
    pub fn apply(&self, lists: Vec<OsdiList>) -> Vec<OsdiList> {
        lists.into_iter().filter(|l| self.matches(l)).collect()
    }
}
