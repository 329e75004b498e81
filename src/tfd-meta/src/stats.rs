//! Stat dictionary
//!
//! Weapons reference their stats by opaque numeric ID. The stat resource
//! maps those IDs to display names; a handful of IDs that show up on
//! weapons are missing from it and are filled in from [`STAT_OVERRIDES`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Stat IDs absent from (or misnamed in) the stat resource.
///
/// Applied after the fetched records, so these always win.
pub const STAT_OVERRIDES: &[(&str, &str)] = &[
    ("105000023", "Rounds per Magazine"),
    ("105000030", "Burst Fire Rate"),
    // Appears on most firearms; what it measures is not known.
    ("105000170", "Mystery Stat"),
];

/// One entry of the stat resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    #[serde(deserialize_with = "id_string")]
    pub stat_id: String,
    pub stat_name: String,
}

impl StatRecord {
    pub fn new(stat_id: impl Into<String>, stat_name: impl Into<String>) -> Self {
        Self {
            stat_id: stat_id.into(),
            stat_name: stat_name.into(),
        }
    }

    /// Parse the stat resource document (a JSON array of records)
    pub fn parse_list(document: &serde_json::Value) -> Result<Vec<StatRecord>, serde_json::Error> {
        Vec::<StatRecord>::deserialize(document)
    }
}

/// Accept IDs published either as strings or as bare numbers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Lookup table from stat ID to stat name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatDictionary {
    names: BTreeMap<String, String>,
}

impl StatDictionary {
    /// Resolve a stat ID to its name
    pub fn get(&self, stat_id: &str) -> Option<&str> {
        self.names.get(stat_id).map(String::as_str)
    }

    pub fn contains(&self, stat_id: &str) -> bool {
        self.names.contains_key(stat_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries as (stat_id, stat_name), ordered by stat_id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stat names, ordered by stat_id
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }
}

/// Build the stat dictionary from fetched records plus [`STAT_OVERRIDES`].
///
/// Duplicate IDs in `records` resolve to the last one seen.
pub fn build_stat_dictionary(records: &[StatRecord]) -> StatDictionary {
    let mut names: BTreeMap<String, String> = records
        .iter()
        .map(|r| (r.stat_id.clone(), r.stat_name.clone()))
        .collect();

    for (id, name) in STAT_OVERRIDES {
        names.insert((*id).to_string(), (*name).to_string());
    }

    StatDictionary { names }
}
